//! Relevance scoring for live-typing suggestions.
//!
//! Cheaper than fuzzy matching: only exact, prefix, substring and
//! word-prefix matches count. Text is lower-cased and trimmed but accents
//! are kept.

use crate::normalize::fold_case;
use crate::{FieldExtractor, SearchResult};
use tracing::{debug, instrument};

/// Relevance score levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelevanceScore {
    /// No match
    None = 0,
    /// A word of the text starts with a word of the query
    WordPrefix = 60,
    /// Contains substring
    Contains = 70,
    /// Starts with query
    StartsWith = 90,
    /// Exact match
    Exact = 100,
}

impl RelevanceScore {
    /// Numeric score on the 0-100 scale.
    #[inline]
    pub fn value(self) -> u32 {
        self as u32
    }
}

impl From<RelevanceScore> for u32 {
    fn from(score: RelevanceScore) -> Self {
        score.value()
    }
}

/// Classify how well a text matches a query.
pub fn relevance_level(text: &str, query: &str) -> RelevanceScore {
    let text_lower = fold_case(text);
    let query_lower = fold_case(query);

    if text_lower.is_empty() || query_lower.is_empty() {
        return RelevanceScore::None;
    }

    // Exact match
    if text_lower == query_lower {
        return RelevanceScore::Exact;
    }

    // Starts with
    if text_lower.starts_with(&query_lower) {
        return RelevanceScore::StartsWith;
    }

    // Contains
    if text_lower.contains(&query_lower) {
        return RelevanceScore::Contains;
    }

    // Word prefix
    let word_prefix = text_lower.split_whitespace().any(|word| {
        query_lower
            .split_whitespace()
            .any(|query_word| word.starts_with(query_word))
    });
    if word_prefix {
        return RelevanceScore::WordPrefix;
    }

    RelevanceScore::None
}

/// Calculate relevance score for a text against a query.
///
/// # Arguments
/// * `text` - The text to score
/// * `query` - The search query
///
/// # Returns
/// 100, 90, 70, 60 or 0 (higher is better)
///
/// # Example
/// ```
/// use pharmafinder_search::match_score;
///
/// assert_eq!(match_score("Paracetamol", "para"), 90);
/// assert_eq!(match_score("Sirop contre la toux", "toux"), 70);
/// ```
#[inline]
pub fn match_score(text: &str, query: &str) -> u32 {
    relevance_level(text, query).value()
}

/// Best score across a set of fields. No fields scores 0.
pub fn best_match_score<S: AsRef<str>>(fields: &[S], query: &str) -> u32 {
    fields
        .iter()
        .map(|field| match_score(field.as_ref(), query))
        .max()
        .unwrap_or(0)
}

/// Score items, drop non-matches and order best first, or pass every item
/// through unranked (score 0) when the query is blank.
///
/// A score of 0 therefore only ever means "unranked": for a non-blank query
/// every returned item scores at least [`RelevanceScore::WordPrefix`].
#[instrument(level = "debug", skip_all, fields(query = %query, items = items.len()))]
pub fn rank_by_relevance<'a, T, E>(
    items: &'a [T],
    query: &str,
    extractor: E,
) -> Vec<SearchResult<&'a T, u32>>
where
    E: FieldExtractor<T>,
{
    if query.trim().is_empty() {
        return items.iter().map(|item| SearchResult::new(item, 0)).collect();
    }

    let mut results: Vec<SearchResult<&T, u32>> = items
        .iter()
        .map(|item| {
            let score = best_match_score(&extractor.extract_fields(item), query);
            SearchResult::new(item, score)
        })
        .filter(|r| r.score > 0)
        .collect();

    // Stable: equal scores keep input order.
    results.sort_by(|a, b| b.score.cmp(&a.score));

    debug!(matches = results.len(), "relevance ranking complete");
    results
}

/// Filter items to those matching the query, most relevant first.
///
/// A blank query returns every item unfiltered, in input order.
pub fn filter_and_sort_by_relevance<'a, T, E>(
    items: &'a [T],
    query: &str,
    extractor: E,
) -> Vec<&'a T>
where
    E: FieldExtractor<T>,
{
    rank_by_relevance(items, query, extractor)
        .into_iter()
        .map(|r| r.item)
        .collect()
}
