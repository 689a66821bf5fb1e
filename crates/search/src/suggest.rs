//! Spelling suggestions against a dictionary of known terms.

use crate::{normalize, similarity};
use tracing::{debug, instrument};

/// Default number of suggestions returned.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// Minimum similarity for a dictionary term to be suggested.
pub const MIN_SUGGESTION_SIMILARITY: f64 = 0.5;

#[derive(Debug, Clone)]
struct Entry {
    term: String,
    normalized: String,
}

/// Proposes dictionary terms close to a mistyped query.
///
/// The dictionary is normalized once at construction and never changes,
/// so a suggester can be shared freely between threads.
///
/// # Example
/// ```
/// use pharmafinder_search::SpellingSuggester;
///
/// let suggester = SpellingSuggester::new(["doliprane", "dolipranne", "paracetamol"]);
/// assert_eq!(suggester.suggest("doliprane", 3), vec!["doliprane", "dolipranne"]);
/// ```
#[derive(Debug, Clone)]
pub struct SpellingSuggester {
    entries: Vec<Entry>,
    min_similarity: f64,
}

impl SpellingSuggester {
    /// Build a suggester over the given terms, in the given order.
    pub fn new<I, S>(dictionary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = dictionary
            .into_iter()
            .map(|term| {
                let term = term.into();
                let normalized = normalize(&term);
                Entry { term, normalized }
            })
            .collect();

        Self {
            entries,
            min_similarity: MIN_SUGGESTION_SIMILARITY,
        }
    }

    /// Override the minimum similarity (default 0.5).
    pub fn with_min_similarity(mut self, min_similarity: f64) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    /// Number of dictionary terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Terms scored against the query, best first, dictionary order on ties.
    pub fn scored(&self, query: &str) -> Vec<(&str, f64)> {
        let normalized_query = normalize(query);

        let mut scored: Vec<(&str, f64)> = self
            .entries
            .iter()
            .map(|entry| (entry.term.as_str(), similarity(&normalized_query, &entry.normalized)))
            .filter(|(_, score)| *score >= self.min_similarity)
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
    }

    /// Up to `max_suggestions` likely intended terms.
    #[instrument(level = "debug", skip(self), fields(dictionary = self.entries.len()))]
    pub fn suggest(&self, query: &str, max_suggestions: usize) -> Vec<&str> {
        let suggestions: Vec<&str> = self
            .scored(query)
            .into_iter()
            .take(max_suggestions)
            .map(|(term, _)| term)
            .collect();

        debug!(count = suggestions.len(), "spelling suggestions");
        suggestions
    }
}

/// One-shot suggestion lookup without building a [`SpellingSuggester`].
pub fn suggest<'a, S: AsRef<str>>(
    query: &str,
    dictionary: &'a [S],
    max_suggestions: usize,
) -> Vec<&'a str> {
    let normalized_query = normalize(query);

    let mut scored: Vec<(&str, f64)> = dictionary
        .iter()
        .map(|term| {
            let term = term.as_ref();
            (term, similarity(&normalized_query, &normalize(term)))
        })
        .filter(|(_, score)| *score >= MIN_SUGGESTION_SIMILARITY)
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().take(max_suggestions).map(|(term, _)| term).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_exact_first() {
        let dictionary = ["doliprane", "dolipranne", "paracetamol"];
        assert_eq!(suggest("doliprane", &dictionary, 3), vec!["doliprane", "dolipranne"]);
    }

    #[test]
    fn test_suggest_returns_dictionary_spelling() {
        let suggester = SpellingSuggester::new(["Paracétamol", "Ibuprofène"]);
        assert_eq!(suggester.suggest("paracetamole", 3), vec!["Paracétamol"]);
    }

    #[test]
    fn test_suggest_limit() {
        let suggester = SpellingSuggester::new(["advil", "adville", "advill", "aspirine"]);
        let suggestions = suggester.suggest("advil", 2);
        assert_eq!(suggestions, vec!["advil", "advill"]);
    }

    #[test]
    fn test_suggest_ties_keep_dictionary_order() {
        let suggester = SpellingSuggester::new(["advill", "adville", "advil"]);
        // "advill" and "advil" both score 5/6 against "advile"
        let scored = suggester.scored("advile");
        let terms: Vec<&str> = scored.iter().map(|(term, _)| *term).collect();
        assert_eq!(terms, vec!["adville", "advill", "advil"]);
        assert_eq!(scored[1].1, scored[2].1);
    }

    #[test]
    fn test_suggest_nothing_close() {
        let suggester = SpellingSuggester::new(["amlodipine", "metformine"]);
        assert!(suggester.suggest("xyz", 3).is_empty());
    }

    #[test]
    fn test_suggest_zero_max() {
        let suggester = SpellingSuggester::new(["advil"]);
        assert!(suggester.suggest("advil", 0).is_empty());
    }

    #[test]
    fn test_custom_min_similarity() {
        let suggester =
            SpellingSuggester::new(["doliprane", "dolipranne"]).with_min_similarity(0.95);
        assert_eq!(suggester.suggest("doliprane", 3), vec!["doliprane"]);
    }

    #[test]
    fn test_empty_dictionary() {
        let suggester = SpellingSuggester::new(Vec::<String>::new());
        assert!(suggester.is_empty());
        assert!(suggester.suggest("advil", 3).is_empty());
    }
}
