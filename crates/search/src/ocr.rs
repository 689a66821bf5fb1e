//! Turning OCR text from a photographed box or prescription into a query.
//!
//! Recognised text is noisy: logos, lot numbers, legal mentions. Each word
//! is classified against small pharmaceutical vocabularies and the most
//! useful ones are combined into a short search query.

use crate::config::OcrVocabulary;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// Dosage such as `500mg`, `5ml`, `1g` or `2%`.
static DOSAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\d+(mg|ml|g|mcg|ui|%)").expect("valid dosage pattern"));

/// Maximum number of words in a built query.
const MAX_QUERY_TERMS: usize = 4;

/// Words of OCR text grouped by what they probably are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OcrTerms {
    pub drugs: Vec<String>,
    pub brands: Vec<String>,
    pub dosages: Vec<String>,
    pub forms: Vec<String>,
    pub others: Vec<String>,
}

impl OcrTerms {
    /// Returns true if no word was classified.
    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
            && self.brands.is_empty()
            && self.dosages.is_empty()
            && self.forms.is_empty()
            && self.others.is_empty()
    }
}

/// Classifies OCR words and builds search queries from them.
#[derive(Debug, Clone)]
pub struct OcrClassifier {
    drugs: Vec<String>,
    brands: Vec<String>,
    forms: Vec<String>,
}

impl Default for OcrClassifier {
    fn default() -> Self {
        Self::new(&OcrVocabulary::default())
    }
}

impl OcrClassifier {
    /// Build a classifier from vocabularies; entries are matched case-insensitively.
    pub fn new(vocabulary: &OcrVocabulary) -> Self {
        let lower =
            |terms: &[String]| -> Vec<String> { terms.iter().map(|t| t.to_lowercase()).collect() };
        Self {
            drugs: lower(&vocabulary.drugs),
            brands: lower(&vocabulary.brands),
            forms: lower(&vocabulary.forms),
        }
    }

    /// Classify every word of more than two characters.
    ///
    /// The first matching category wins: drug, brand, dosage, form, and
    /// finally "other" for long non-numeric words.
    pub fn classify(&self, text: &str) -> OcrTerms {
        let cleaned = clean_text(text);
        let mut terms = OcrTerms::default();

        for word in cleaned.split(' ').filter(|w| w.chars().count() > 2) {
            let lower = word.to_lowercase();
            let bucket = if self
                .drugs
                .iter()
                .any(|drug| lower.contains(drug.as_str()) || drug.contains(lower.as_str()))
            {
                &mut terms.drugs
            } else if self.brands.iter().any(|brand| lower.contains(brand.as_str())) {
                &mut terms.brands
            } else if DOSAGE.is_match(&lower) || lower.contains("mg") || lower.contains("ml") {
                &mut terms.dosages
            } else if self.forms.iter().any(|form| lower.contains(form.as_str())) {
                &mut terms.forms
            } else if word.chars().count() > 5 && !word.chars().all(|c| c.is_ascii_digit()) {
                &mut terms.others
            } else {
                continue;
            };
            bucket.push(word.to_string());
        }

        terms
    }

    /// Build a search query from OCR text.
    ///
    /// Returns `None` when the text holds nothing searchable.
    ///
    /// # Example
    /// ```
    /// use pharmafinder_search::OcrClassifier;
    ///
    /// let classifier = OcrClassifier::default();
    /// let query = classifier.build_query("Paracétamol BIOGARAN 500 mg - comprimés");
    /// assert_eq!(query.as_deref(), Some("Paracétamol BIOGARAN comprimés"));
    /// ```
    pub fn build_query(&self, text: &str) -> Option<String> {
        let cleaned = clean_text(text);
        if cleaned.is_empty() {
            return None;
        }

        let terms = self.classify(&cleaned);
        debug!(?terms, "classified OCR text");

        let mut components: Vec<&str> = Vec::new();

        components.extend(first(&terms.drugs));
        components.extend(first(&terms.brands));
        components.extend(first(&terms.dosages));

        if terms.drugs.is_empty() {
            components.extend(first(&terms.others));
            components.extend(first(&terms.forms));
        }
        components.extend(first(&terms.forms));

        if components.is_empty() {
            components.extend(terms.others.iter().take(2).map(String::as_str));
        }

        let mut seen = Vec::with_capacity(components.len());
        for component in components {
            if !seen.contains(&component) {
                seen.push(component);
            }
        }

        let query = if seen.is_empty() {
            cleaned.split(' ').take(3).collect::<Vec<_>>().join(" ")
        } else {
            seen.into_iter().take(MAX_QUERY_TERMS).collect::<Vec<_>>().join(" ")
        };

        debug!(%query, "built OCR query");
        Some(query)
    }
}

fn first(words: &[String]) -> Option<&str> {
    words.first().map(String::as_str)
}

/// Replace everything but Latin letters, digits and whitespace with spaces,
/// then collapse whitespace runs into single spaces.
pub fn clean_text(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| {
            let keep = c.is_ascii_alphanumeric()
                || ('\u{00C0}'..='\u{00FF}').contains(&c)
                || c.is_whitespace();
            if keep { c } else { ' ' }
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  DOLIPRANE®\n1000 mg / 8 cp.  "), "DOLIPRANE 1000 mg 8 cp");
        assert_eq!(clean_text("Crème—apaisante"), "Crème apaisante");
        assert_eq!(clean_text("***"), "");
    }

    #[test]
    fn test_classify() {
        let classifier = OcrClassifier::default();
        let terms = classifier.classify("Ibuprofène Sandoz 400mg sirop Laboratoire 123456");

        assert_eq!(terms.drugs, vec!["Ibuprofène"]);
        assert_eq!(terms.brands, vec!["Sandoz"]);
        assert_eq!(terms.dosages, vec!["400mg"]);
        assert_eq!(terms.forms, vec!["sirop"]);
        assert_eq!(terms.others, vec!["Laboratoire"]);
    }

    #[test]
    fn test_short_words_ignored() {
        let classifier = OcrClassifier::default();
        assert!(classifier.classify("eg 5 mg").is_empty());
    }

    #[test]
    fn test_query_with_drug_brand_dosage_form() {
        let classifier = OcrClassifier::default();
        let query = classifier.build_query("AMOXICILLINE Biogaran 500mg gélules boîte de 12");
        assert_eq!(query.as_deref(), Some("AMOXICILLINE Biogaran 500mg gélules"));
    }

    #[test]
    fn test_query_without_drug_uses_other_words() {
        let classifier = OcrClassifier::default();
        let query = classifier.build_query("DOLIPRANE 1000mg comprimés");
        assert_eq!(query.as_deref(), Some("1000mg DOLIPRANE comprimés"));
    }

    #[test]
    fn test_query_falls_back_to_first_words() {
        let classifier = OcrClassifier::default();
        let query = classifier.build_query("Lot 42 exp 2027 abc");
        assert_eq!(query.as_deref(), Some("Lot 42 exp"));
    }

    #[test]
    fn test_query_empty_text() {
        let classifier = OcrClassifier::default();
        assert_eq!(classifier.build_query(" ?! "), None);
    }

    #[test]
    fn test_custom_vocabulary() {
        let vocabulary = OcrVocabulary {
            drugs: vec!["Doliprane".into()],
            brands: Vec::new(),
            forms: Vec::new(),
        };
        let classifier = OcrClassifier::new(&vocabulary);
        let terms = classifier.classify("doliprane enfant");
        assert_eq!(terms.drugs, vec!["doliprane"]);
        assert_eq!(terms.others, vec!["enfant"]);
    }
}
