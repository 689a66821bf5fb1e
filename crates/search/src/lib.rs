//! Search engine for the PharmaFinder storefront.
//!
//! This crate provides:
//! - Text normalization (case, accents, punctuation)
//! - Levenshtein edit distance and similarity
//! - Typo-tolerant fuzzy ranking over arbitrary records
//! - Cheap substring relevance ranking for search-as-you-type
//! - Spelling suggestions against an injected dictionary
//! - Location matching, intent detection and OCR query building
//!
//! # Example
//!
//! ```
//! use pharmafinder_search::{fuzzy_search, match_score, suggest};
//!
//! let drugs = vec!["Paracétamol".to_string(), "Ibuprofène".to_string()];
//! let hits = fuzzy_search(&drugs, "paracetamol", |d: &String| vec![d.clone()], 0.6);
//! assert_eq!(hits[0].score, 1.0);
//!
//! assert_eq!(match_score("Paracetamol", "para"), 90);
//!
//! let dictionary = ["doliprane", "dolipranne", "paracetamol"];
//! assert_eq!(suggest("doliprane", &dictionary, 3), vec!["doliprane", "dolipranne"]);
//! ```

mod normalize;
mod extract;
pub mod fuzzy;
mod relevance;
mod suggest;
pub mod catalog;
mod location;
pub mod unified;
pub mod ocr;
pub mod config;
mod error;

#[cfg(feature = "wasm")]
mod wasm;

pub use normalize::{fold_case, normalize};
pub use extract::{ByFields, FieldExtractor, Searchable};
pub use fuzzy::{
    fuzzy_score, fuzzy_search, fuzzy_search_with, levenshtein_distance, similarity, FuzzyOptions,
};
#[cfg(feature = "parallel")]
pub use fuzzy::par_fuzzy_search_with;
pub use relevance::{
    best_match_score, filter_and_sort_by_relevance, match_score, rank_by_relevance, relevance_level,
    RelevanceScore,
};
pub use suggest::{suggest, SpellingSuggester};
pub use catalog::{Pharmacy, Product};
pub use location::match_locations;
pub use unified::{detect_intent, SearchHit, SearchIntent, UnifiedResults, UnifiedSearch};
pub use ocr::{OcrClassifier, OcrTerms};
pub use config::SearchConfig;
pub use error::{Result, SearchError, SearchErrorCode};

/// Search result with relevance score.
///
/// `S` is `f64` in `[0, 1]` for fuzzy matching and `u32` on the 0-100
/// scale for relevance ranking.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchResult<T, S = f64> {
    /// The matched item
    pub item: T,
    /// Relevance score (higher is better)
    pub score: S,
}

impl<T, S> SearchResult<T, S> {
    /// Pair an item with its score.
    #[inline]
    pub fn new(item: T, score: S) -> Self {
        Self { item, score }
    }

    /// Transform the item, keeping the score.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SearchResult<U, S> {
        SearchResult::new(f(self.item), self.score)
    }
}
