//! Fuzzy matching algorithms.
//!
//! Typo-tolerant ranking built on Levenshtein similarity between the
//! normalized query and the normalized candidate fields.

use crate::{normalize, FieldExtractor, SearchResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Default minimum score for a fuzzy match.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Score granted when a field word starts with the query's prefix.
pub const PREFIX_BONUS: f64 = 0.8;

/// Number of leading query characters compared for the prefix bonus.
pub const PREFIX_LEN: usize = 3;

/// Tuning knobs for [`fuzzy_search_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyOptions {
    /// Candidates scoring below this are dropped
    pub threshold: f64,
    /// Score granted by a word-prefix match
    pub prefix_bonus: f64,
    /// Leading query characters used for the prefix match
    pub prefix_len: usize,
    /// Shortest normalized query (in characters) eligible for the prefix bonus
    pub min_prefix_query_len: usize,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            prefix_bonus: PREFIX_BONUS,
            prefix_len: PREFIX_LEN,
            min_prefix_query_len: PREFIX_LEN,
        }
    }
}

impl FuzzyOptions {
    /// Default options with a custom threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}

/// Calculate Levenshtein edit distance between two strings.
///
/// Works on Unicode scalar values and fills the complete
/// `(len(b) + 1) x (len(a) + 1)` dynamic-programming table.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let width = a_chars.len() + 1;
    let height = b_chars.len() + 1;

    // Row i, column j: distance between b[..i] and a[..j].
    let mut table = vec![0usize; width * height];
    for (j, cell) in table.iter_mut().take(width).enumerate() {
        *cell = j;
    }
    for i in 0..height {
        table[i * width] = i;
    }

    for i in 1..height {
        for j in 1..width {
            let cost = usize::from(b_chars[i - 1] != a_chars[j - 1]);
            let substitution = table[(i - 1) * width + (j - 1)] + cost;
            let insertion = table[i * width + (j - 1)] + 1;
            let deletion = table[(i - 1) * width + j] + 1;
            table[i * width + j] = substitution.min(insertion).min(deletion);
        }
    }

    table[width * height - 1]
}

/// Similarity in `[0, 1]` derived from the edit distance.
///
/// `1 - distance / max(len(a), len(b))`, and `1.0` when both are empty.
///
/// ```
/// use pharmafinder_search::similarity;
///
/// assert_eq!(similarity("", ""), 1.0);
/// assert_eq!(similarity("advil", "advill"), 1.0 - 1.0 / 6.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    1.0 - levenshtein_distance(a, b) as f64 / max_len as f64
}

/// Score raw fields against a raw query.
///
/// Both sides are normalized first. An empty normalized query scores 1.
pub fn fuzzy_score<S: AsRef<str>>(query: &str, fields: &[S], options: &FuzzyOptions) -> f64 {
    let normalized_query = normalize(query);
    if normalized_query.is_empty() {
        return 1.0;
    }

    let fields: Vec<String> = fields.iter().map(|f| normalize(f.as_ref())).collect();
    score_normalized(&normalized_query, &fields, options)
}

/// Score already-normalized fields against a non-empty normalized query.
fn score_normalized(query: &str, fields: &[String], options: &FuzzyOptions) -> f64 {
    if fields.iter().any(|field| field.contains(query)) {
        return 1.0;
    }

    let query_words: Vec<&str> = query.split_whitespace().collect();
    let prefix: Option<String> = (query.chars().count() >= options.min_prefix_query_len)
        .then(|| query.chars().take(options.prefix_len).collect());

    let mut best = 0.0_f64;
    for field in fields {
        best = best.max(similarity(query, field));

        for field_word in field.split_whitespace() {
            for query_word in &query_words {
                best = best.max(similarity(query_word, field_word));
            }

            if let Some(prefix) = prefix.as_deref() {
                if field_word.starts_with(prefix) {
                    best = best.max(options.prefix_bonus);
                }
            }
        }
    }

    best
}

#[inline]
fn score_candidate<T, E>(query: &str, item: &T, extractor: &E, options: &FuzzyOptions) -> f64
where
    E: FieldExtractor<T> + ?Sized,
{
    let fields: Vec<String> = extractor
        .extract_fields(item)
        .iter()
        .map(|f| normalize(f))
        .collect();

    let score = score_normalized(query, &fields, options);
    trace!(score, fields = fields.len(), "scored candidate");
    score
}

/// Keep scores at or above the threshold, best first, ties in input order.
fn rank<T>(mut scored: Vec<SearchResult<T>>, threshold: f64) -> Vec<SearchResult<T>> {
    scored.retain(|r| r.score >= threshold);
    // slice::sort_by is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Rank candidates against a query, tolerating typos.
///
/// # Arguments
/// * `candidates` - Items to search
/// * `query` - Raw user query
/// * `extractor` - Supplies the searchable fields of each item
/// * `threshold` - Minimum score to keep (see [`DEFAULT_THRESHOLD`])
///
/// # Returns
/// Matching items with their score, best first. An empty query returns
/// every item with score 1 in input order.
///
/// # Example
/// ```
/// use pharmafinder_search::fuzzy_search;
///
/// let drugs = vec!["Doliprane".to_string(), "Advil".to_string()];
/// let hits = fuzzy_search(&drugs, "dolipran", |d: &String| vec![d.clone()], 0.6);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].item, "Doliprane");
/// assert_eq!(hits[0].score, 1.0);
/// ```
pub fn fuzzy_search<'a, T, E>(
    candidates: &'a [T],
    query: &str,
    extractor: E,
    threshold: f64,
) -> Vec<SearchResult<&'a T>>
where
    E: FieldExtractor<T>,
{
    fuzzy_search_with(candidates, query, extractor, &FuzzyOptions::with_threshold(threshold))
}

/// [`fuzzy_search`] with full control over the scoring options.
#[instrument(level = "debug", skip_all, fields(query = %query, candidates = candidates.len()))]
pub fn fuzzy_search_with<'a, T, E>(
    candidates: &'a [T],
    query: &str,
    extractor: E,
    options: &FuzzyOptions,
) -> Vec<SearchResult<&'a T>>
where
    E: FieldExtractor<T>,
{
    let normalized_query = normalize(query);
    if normalized_query.is_empty() {
        return candidates.iter().map(|item| SearchResult::new(item, 1.0)).collect();
    }

    let scored = candidates
        .iter()
        .map(|item| {
            let score = score_candidate(&normalized_query, item, &extractor, options);
            SearchResult::new(item, score)
        })
        .collect();

    let results = rank(scored, options.threshold);
    debug!(matches = results.len(), "fuzzy search complete");
    results
}

/// Parallel [`fuzzy_search_with`]. Output is identical to the sequential
/// version, including tie order.
#[cfg(feature = "parallel")]
#[instrument(level = "debug", skip_all, fields(query = %query, candidates = candidates.len()))]
pub fn par_fuzzy_search_with<'a, T, E>(
    candidates: &'a [T],
    query: &str,
    extractor: E,
    options: &FuzzyOptions,
) -> Vec<SearchResult<&'a T>>
where
    T: Sync,
    E: FieldExtractor<T> + Sync,
{
    use rayon::prelude::*;

    let normalized_query = normalize(query);
    if normalized_query.is_empty() {
        return candidates.iter().map(|item| SearchResult::new(item, 1.0)).collect();
    }

    let scored = candidates
        .par_iter()
        .map(|item| {
            let score = score_candidate(&normalized_query, item, &extractor, options);
            SearchResult::new(item, score)
        })
        .collect();

    let results = rank(scored, options.threshold);
    debug!(matches = results.len(), "parallel fuzzy search complete");
    results
}
