//! WASM bindings for search utilities.

use crate::{FuzzyOptions, SearchResult};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Normalize text for comparison (lower-case, no accents, no punctuation).
#[wasm_bindgen]
pub fn normalize_text(text: &str) -> String {
    crate::normalize(text)
}

/// Calculate Levenshtein edit distance between two strings.
#[wasm_bindgen]
pub fn edit_distance(a: &str, b: &str) -> usize {
    crate::levenshtein_distance(a, b)
}

/// Similarity between two strings (0-1, 1 is identical).
#[wasm_bindgen]
pub fn similarity_score(a: &str, b: &str) -> f64 {
    crate::similarity(a, b)
}

/// Calculate relevance score for a query against text.
///
/// # Returns
/// Relevance score (0, 60, 70, 90 or 100)
#[wasm_bindgen]
pub fn match_score_for(text: &str, query: &str) -> u32 {
    crate::match_score(text, query)
}

#[derive(Deserialize)]
struct Item {
    id: String,
    #[serde(default)]
    fields: Vec<String>,
}

#[derive(Serialize)]
struct ScoredId<'a> {
    id: &'a str,
    score: f64,
}

/// Fuzzy-search items and return sorted results as JSON.
///
/// # Arguments
/// * `query` - Search query
/// * `items_json` - JSON array of items with `id` and `fields` (array of strings)
/// * `threshold` - Minimum score (0-1)
/// * `max_results` - Maximum results to return (0 for all)
///
/// # Returns
/// JSON array of results with `id` and `score` fields, best first
#[wasm_bindgen]
pub fn fuzzy_search_items(
    query: &str,
    items_json: &str,
    threshold: f64,
    max_results: usize,
) -> String {
    let items: Vec<Item> = match serde_json::from_str(items_json) {
        Ok(items) => items,
        Err(_) => return "[]".to_string(),
    };

    let options = FuzzyOptions::with_threshold(threshold);
    let mut results: Vec<SearchResult<&Item>> =
        crate::fuzzy_search_with(&items, query, |item: &Item| item.fields.clone(), &options);

    if max_results > 0 {
        results.truncate(max_results);
    }

    let scored: Vec<ScoredId<'_>> = results
        .iter()
        .map(|r| ScoredId { id: &r.item.id, score: r.score })
        .collect();

    serde_json::to_string(&scored).unwrap_or_else(|_| "[]".to_string())
}

/// Spelling suggestions for a query as a JSON array of strings.
///
/// # Arguments
/// * `query` - Possibly misspelled query
/// * `dictionary_json` - JSON array of known terms
/// * `max_suggestions` - Maximum suggestions to return
#[wasm_bindgen]
pub fn spelling_suggestions(query: &str, dictionary_json: &str, max_suggestions: usize) -> String {
    let dictionary: Vec<String> = match serde_json::from_str(dictionary_json) {
        Ok(dictionary) => dictionary,
        Err(_) => return "[]".to_string(),
    };

    let suggestions = crate::suggest(query, &dictionary, max_suggestions);
    serde_json::to_string(&suggestions).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_search_items() {
        let items = r#"[
            {"id": "a", "fields": ["Advil 200mg"]},
            {"id": "b", "fields": ["Zyrtec"]},
            {"id": "c"}
        ]"#;
        assert_eq!(fuzzy_search_items("advil", items, 0.6, 0), r#"[{"id":"a","score":1.0}]"#);
    }

    #[test]
    fn test_invalid_json() {
        assert_eq!(fuzzy_search_items("advil", "not json", 0.6, 0), "[]");
        assert_eq!(spelling_suggestions("advil", "{}", 3), "[]");
    }

    #[test]
    fn test_spelling_suggestions() {
        let dictionary = r#"["doliprane", "dolipranne", "paracetamol"]"#;
        assert_eq!(
            spelling_suggestions("doliprane", dictionary, 3),
            r#"["doliprane","dolipranne"]"#
        );
    }
}
