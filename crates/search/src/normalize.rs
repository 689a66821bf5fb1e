//! Canonical comparison form for search text.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize text for comparison.
///
/// Lower-cases, decomposes (NFD) and drops combining marks, removes every
/// character that is neither alphanumeric nor whitespace, then trims.
/// The result is stable under a second application.
///
/// # Example
/// ```
/// use pharmafinder_search::normalize;
///
/// assert_eq!(normalize("  Ibuprofène 400mg! "), "ibuprofene 400mg");
/// assert_eq!(normalize("Co-Trimoxazole"), "cotrimoxazole");
/// ```
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    folded.trim().to_string()
}

/// Lower-case and trim without stripping accents or punctuation.
///
/// This is the lighter folding used by substring relevance ranking and
/// location matching.
#[inline]
pub fn fold_case(text: &str) -> String {
    text.trim().to_lowercase()
}
