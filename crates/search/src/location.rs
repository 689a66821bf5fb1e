//! Neighbourhood and city matching.

use crate::normalize::{fold_case, normalize};

/// Match a query against known location names.
///
/// Locations that start with or contain the query (case-insensitive,
/// trimmed) are kept. Prefix matches come first, then the rest; within each
/// group names are ordered alphabetically ignoring case and accents.
///
/// # Example
/// ```
/// use pharmafinder_search::match_locations;
///
/// let places = ["Lomé", "Tokoin", "Totsi", "Aflao"];
/// assert_eq!(match_locations("to", &places), vec!["Tokoin", "Totsi"]);
/// assert_eq!(match_locations("la", &places), vec!["Aflao"]);
/// ```
pub fn match_locations<'a, S: AsRef<str>>(query: &str, locations: &'a [S]) -> Vec<&'a str> {
    let query = fold_case(query);
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(bool, String, &str)> = locations
        .iter()
        .map(|location| location.as_ref())
        .filter_map(|location| {
            let lower = location.to_lowercase();
            if lower.starts_with(&query) {
                Some((true, normalize(location), location))
            } else if lower.contains(&query) {
                Some((false, normalize(location), location))
            } else {
                None
            }
        })
        .collect();

    // prefix matches first
    matches.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| a.1.cmp(&b.1))
            .then_with(|| a.2.cmp(b.2))
    });
    matches.into_iter().map(|(_, _, location)| location).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCATIONS: [&str; 6] = ["Lomé", "Tokoin", "Bè", "Aflao", "Kégué", "Agbalépédogan"];

    #[test]
    fn test_prefix_before_contains() {
        let locations = ["Adidogomé", "Gomé Est", "Lomé"];
        // "Gomé Est" starts with the query, the others only contain it
        assert_eq!(match_locations("gomé", &locations), vec!["Gomé Est", "Adidogomé"]);
    }

    #[test]
    fn test_accent_sensitive_containment() {
        assert_eq!(match_locations("lome", &LOCATIONS), Vec::<&str>::new());
        assert_eq!(match_locations("LOM", &LOCATIONS), vec!["Lomé"]);
    }

    #[test]
    fn test_alphabetical_within_group() {
        let locations = ["Agoè", "Aflao", "Agbalépédogan", "Adidogomé"];
        assert_eq!(
            match_locations("a", &locations),
            vec!["Adidogomé", "Aflao", "Agbalépédogan", "Agoè"]
        );
    }

    #[test]
    fn test_blank_query() {
        assert!(match_locations("  ", &LOCATIONS).is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(match_locations("kara", &LOCATIONS).is_empty());
    }
}
