//! Field extraction strategies.
//!
//! The engine never inspects candidates directly. It asks a
//! [`FieldExtractor`] for the searchable text of each one.

/// Extracts the searchable text fields of a candidate.
///
/// Any `Fn(&T) -> Vec<String>` closure is an extractor, so ad-hoc
/// searches need no extra type:
///
/// ```
/// use pharmafinder_search::FieldExtractor;
///
/// struct Drug { name: String }
///
/// let by_name = |d: &Drug| vec![d.name.clone()];
/// let drug = Drug { name: "Advil".into() };
/// assert_eq!(by_name.extract_fields(&drug), vec!["Advil".to_string()]);
/// ```
pub trait FieldExtractor<T: ?Sized> {
    /// Returns the text fields to match against. An empty list is valid and
    /// means the candidate can never match a non-empty query.
    fn extract_fields(&self, item: &T) -> Vec<String>;
}

impl<T: ?Sized, F> FieldExtractor<T> for F
where
    F: Fn(&T) -> Vec<String>,
{
    #[inline]
    fn extract_fields(&self, item: &T) -> Vec<String> {
        self(item)
    }
}

/// Types that know their own searchable fields.
pub trait Searchable {
    /// Searchable text, most significant field first.
    fn search_fields(&self) -> Vec<String>;
}

impl Searchable for str {
    fn search_fields(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl Searchable for String {
    fn search_fields(&self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: Searchable + ?Sized> Searchable for &S {
    fn search_fields(&self) -> Vec<String> {
        (**self).search_fields()
    }
}

/// Extractor that defers to [`Searchable::search_fields`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ByFields;

impl<T: Searchable + ?Sized> FieldExtractor<T> for ByFields {
    #[inline]
    fn extract_fields(&self, item: &T) -> Vec<String> {
        item.search_fields()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shop {
        name: String,
        city: Option<String>,
    }

    impl Searchable for Shop {
        fn search_fields(&self) -> Vec<String> {
            vec![self.name.clone(), self.city.clone().unwrap_or_default()]
        }
    }

    #[test]
    fn test_closure_extractor() {
        let shop = Shop { name: "Pharmacie du Port".into(), city: None };
        let extractor = |s: &Shop| vec![s.name.to_uppercase()];
        assert_eq!(extractor.extract_fields(&shop), vec!["PHARMACIE DU PORT"]);
    }

    #[test]
    fn test_by_fields_extractor() {
        let shop = Shop { name: "Pharmacie Bè".into(), city: Some("Lomé".into()) };
        assert_eq!(ByFields.extract_fields(&shop), vec!["Pharmacie Bè", "Lomé"]);
    }

    #[test]
    fn test_strings_are_searchable() {
        assert_eq!(ByFields.extract_fields("aspirine"), vec!["aspirine"]);
        assert_eq!(ByFields.extract_fields(&String::from("advil")), vec!["advil"]);
    }
}
