//! Search configuration.
//!
//! Every value has a default, so an empty TOML file (or no file at all) gives
//! the storefront's stock behaviour. Dictionaries live here rather than in
//! globals so callers and tests can supply their own.

use crate::error::{Result, SearchError};
use crate::fuzzy::FuzzyOptions;
use crate::suggest::{DEFAULT_MAX_SUGGESTIONS, MIN_SUGGESTION_SIMILARITY};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// File names searched by [`SearchConfig::discover`], in order.
pub const CONFIG_CANDIDATES: [&str; 3] = [
    ".pharmafinder-search.toml",
    "pharmafinder-search.toml",
    ".config/pharmafinder-search.toml",
];

/// Root configuration schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub fuzzy: FuzzyOptions,

    #[serde(default)]
    pub suggest: SuggestConfig,

    #[serde(default)]
    pub unified: UnifiedConfig,

    #[serde(default)]
    pub ocr: OcrVocabulary,
}

/// Spelling suggestion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Minimum similarity for a suggestion
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,

    /// Maximum number of suggestions
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Known-correct terms, including common misspellings
    #[serde(default = "default_dictionary")]
    pub dictionary: Vec<String>,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            min_similarity: default_min_similarity(),
            max_suggestions: default_max_suggestions(),
            dictionary: default_dictionary(),
        }
    }
}

/// Unified search bar configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedConfig {
    /// Products kept after relevance ranking
    #[serde(default = "default_max_products")]
    pub max_products: usize,

    /// Pharmacies kept after relevance ranking
    #[serde(default = "default_max_pharmacies")]
    pub max_pharmacies: usize,

    /// Total hits returned
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Known neighbourhoods and cities
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,
}

impl Default for UnifiedConfig {
    fn default() -> Self {
        Self {
            max_products: default_max_products(),
            max_pharmacies: default_max_pharmacies(),
            max_results: default_max_results(),
            locations: default_locations(),
        }
    }
}

/// Vocabularies used to classify OCR text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrVocabulary {
    /// Active ingredients
    #[serde(default = "default_drugs")]
    pub drugs: Vec<String>,

    /// Laboratories and generic brands
    #[serde(default = "default_brands")]
    pub brands: Vec<String>,

    /// Pharmaceutical forms
    #[serde(default = "default_forms")]
    pub forms: Vec<String>,
}

impl Default for OcrVocabulary {
    fn default() -> Self {
        Self {
            drugs: default_drugs(),
            brands: default_brands(),
            forms: default_forms(),
        }
    }
}

impl SearchConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SearchError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded search config");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the first config file found in the current directory, or defaults.
    pub fn discover() -> Result<Self> {
        Self::discover_in(".")
    }

    /// Load the first config file found under `dir`, or defaults.
    pub fn discover_in(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        for candidate in CONFIG_CANDIDATES {
            let path = dir.join(candidate);
            if path.is_file() {
                return Self::load(path);
            }
        }

        debug!(dir = %dir.display(), "no search config found, using defaults");
        Ok(Self::default())
    }

    /// Reject values the engine cannot use.
    pub fn validate(&self) -> Result<()> {
        check_unit("fuzzy.threshold", self.fuzzy.threshold)?;
        check_unit("fuzzy.prefix_bonus", self.fuzzy.prefix_bonus)?;
        check_unit("suggest.min_similarity", self.suggest.min_similarity)?;

        let counts = [
            ("fuzzy.prefix_len", self.fuzzy.prefix_len),
            ("unified.max_products", self.unified.max_products),
            ("unified.max_pharmacies", self.unified.max_pharmacies),
            ("unified.max_results", self.unified.max_results),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(SearchError::InvalidConfig(format!("{name} must be at least 1")));
            }
        }

        Ok(())
    }
}

fn check_unit(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SearchError::InvalidConfig(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

fn default_min_similarity() -> f64 {
    MIN_SUGGESTION_SIMILARITY
}

fn default_max_suggestions() -> usize {
    DEFAULT_MAX_SUGGESTIONS
}

fn default_max_products() -> usize {
    8
}

fn default_max_pharmacies() -> usize {
    5
}

fn default_max_results() -> usize {
    8
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_dictionary() -> Vec<String> {
    to_strings(&[
        "paracétamol", "paracetamol", "acetaminophene",
        "ibuprofène", "ibuprofen", "ibuprofene",
        "aspirine", "aspirin", "acide acetylsalicylique",
        "amoxicilline", "amoxiciline", "amoxycilline",
        "doliprane", "dolipranne", "dolipran",
        "efferalgan", "efferalgang", "efferalgant",
        "advil", "adville", "advill",
        "voltarène", "voltaren", "voltarene",
        "augmentin", "augmantín", "augmentine",
        "azithromycine", "azithromicine", "azytromycine",
        "clarithromycine", "claritromycine", "clarythromycine",
        "ciprofloxacine", "ciprofloxacin", "cyprofoxacine",
        "métronidazole", "metronidazole", "metronydazole",
        "céphalex", "cefalexine", "cephalexine",
        "cotrimoxazole", "cotrimoxasole", "co-trimoxazole",
        "atorvastatine", "atorvastatin",
        "lisinopril", "lysinopril", "lisinoprill",
        "hydrochlorothiazide", "hydrochlorothyazide", "hctz",
        "amlodipine", "amlodipin", "amlodypine",
        "metformine", "metformin", "metformina",
        "simvastatine", "simvastatin", "simvastatina",
        "oméprazole", "omeprazole", "omeprasole",
        "lansoprazole", "lanzoprazole", "lansoprasole",
        "cetirizine", "cétirizine", "cetrizine",
        "loratadine", "loratadina",
        "salbutamol", "salbutamoll", "albuterol",
        "prednisolone", "prednisone", "prednysolone",
        "hydrocortisone", "hidrocortisone", "hydrocortisona",
    ])
}

fn default_locations() -> Vec<String> {
    to_strings(&[
        "Lomé", "Tokoin", "Nyékonakpoè", "Amoutivé", "Adidogomé", "Hédzranawoé",
        "Bè", "Aflao", "Djidjolé", "Kégué", "Agbalépédogan", "Totsi",
    ])
}

fn default_drugs() -> Vec<String> {
    to_strings(&[
        "paracétamol", "paracetamol", "acetaminophen",
        "ibuprofène", "ibuprofen", "aspirine", "aspirin",
        "amoxicilline", "amoxicillin", "azithromycine", "azithromycin",
        "ciprofloxacine", "ciprofloxacin", "metronidazole",
        "oméprazole", "omeprazole", "pantoprazole",
        "loratadine", "cetirizine", "prednisolone",
        "salbutamol", "dexamethasone", "diclofenac",
        "metformine", "metformin", "atenolol", "amlodipine",
    ])
}

fn default_brands() -> Vec<String> {
    to_strings(&[
        "biogaran", "sandoz", "teva", "mylan", "arrow",
        "eg", "zentiva", "ratiopharm", "pfizer", "novartis",
        "sanofi", "bayer", "merck", "gsk", "roche",
    ])
}

fn default_forms() -> Vec<String> {
    to_strings(&[
        "comprimé", "comprimés", "gélule", "gélules", "sirop",
        "injection", "capsule", "capsules", "sachet", "sachets",
        "crème", "gel", "pommade", "lotion",
    ])
}
