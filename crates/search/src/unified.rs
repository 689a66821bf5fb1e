//! Unified product / pharmacy / location search.
//!
//! Mirrors the storefront search bar: each catalog is ranked by relevance,
//! locations are matched by name, the dominant intent decides the order of
//! the merged list, and spelling suggestions are offered when nothing hits.

use crate::catalog::{Pharmacy, Product};
use crate::config::SearchConfig;
use crate::location::match_locations;
use crate::relevance::filter_and_sort_by_relevance;
use crate::suggest::SpellingSuggester;
use crate::ByFields;
use serde::Serialize;
use tracing::{debug, instrument};

/// What the user is most likely looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchIntent {
    Product,
    Pharmacy,
    Location,
    Mixed,
}

/// Guess the intent from per-category match counts.
///
/// Only locations matched → `Location`; strictly more products than
/// pharmacies → `Product`; strictly more pharmacies → `Pharmacy`;
/// anything else → `Mixed`.
pub fn detect_intent(products: usize, pharmacies: usize, locations: usize) -> SearchIntent {
    if locations > 0 && products == 0 && pharmacies == 0 {
        SearchIntent::Location
    } else if products > pharmacies {
        SearchIntent::Product
    } else if pharmacies > products {
        SearchIntent::Pharmacy
    } else {
        SearchIntent::Mixed
    }
}

/// One entry of the merged result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchHit<'a> {
    Product { item: &'a Product, sponsored: bool },
    Pharmacy { item: &'a Pharmacy },
    Location { name: &'a str },
}

/// Result of a unified search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnifiedResults<'a> {
    pub intent: SearchIntent,
    pub hits: Vec<SearchHit<'a>>,
    pub suggestions: Vec<&'a str>,
}

impl UnifiedResults<'_> {
    fn empty() -> Self {
        Self {
            intent: SearchIntent::Mixed,
            hits: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}

/// Search engine for the unified search bar.
#[derive(Debug, Clone)]
pub struct UnifiedSearch {
    max_products: usize,
    max_pharmacies: usize,
    max_results: usize,
    max_suggestions: usize,
    locations: Vec<String>,
    suggester: SpellingSuggester,
}

impl Default for UnifiedSearch {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

impl UnifiedSearch {
    /// Build from configuration.
    pub fn new(config: &SearchConfig) -> Self {
        let suggester = SpellingSuggester::new(config.suggest.dictionary.iter().cloned())
            .with_min_similarity(config.suggest.min_similarity);

        Self {
            max_products: config.unified.max_products,
            max_pharmacies: config.unified.max_pharmacies,
            max_results: config.unified.max_results,
            max_suggestions: config.suggest.max_suggestions,
            locations: config.unified.locations.clone(),
            suggester,
        }
    }

    /// The spelling suggester used when a search has no hits.
    pub fn suggester(&self) -> &SpellingSuggester {
        &self.suggester
    }

    /// Search products, pharmacies and known locations at once.
    #[instrument(
        level = "debug",
        skip(self, products, pharmacies),
        fields(products = products.len(), pharmacies = pharmacies.len())
    )]
    pub fn search<'a>(
        &'a self,
        query: &str,
        products: &'a [Product],
        pharmacies: &'a [Pharmacy],
    ) -> UnifiedResults<'a> {
        if query.trim().is_empty() {
            return UnifiedResults::empty();
        }

        let mut matched_products = filter_and_sort_by_relevance(products, query, ByFields);
        matched_products.truncate(self.max_products);

        let mut matched_pharmacies = filter_and_sort_by_relevance(pharmacies, query, ByFields);
        matched_pharmacies.truncate(self.max_pharmacies);

        let matched_locations = match_locations(query, &self.locations);

        let intent = detect_intent(
            matched_products.len(),
            matched_pharmacies.len(),
            matched_locations.len(),
        );

        let mut hits = Vec::new();
        if matches!(intent, SearchIntent::Product | SearchIntent::Mixed) {
            hits.extend(matched_products.into_iter().map(|item| SearchHit::Product {
                item,
                sponsored: item.is_sponsored,
            }));
        }
        if matches!(intent, SearchIntent::Pharmacy | SearchIntent::Mixed) {
            hits.extend(matched_pharmacies.into_iter().map(|item| SearchHit::Pharmacy { item }));
        }
        if matches!(intent, SearchIntent::Location | SearchIntent::Mixed) {
            hits.extend(matched_locations.into_iter().map(|name| SearchHit::Location { name }));
        }
        hits.truncate(self.max_results);

        let suggestions = if hits.is_empty() {
            self.suggester.suggest(query, self.max_suggestions)
        } else {
            Vec::new()
        };

        debug!(
            ?intent,
            hits = hits.len(),
            suggestions = suggestions.len(),
            "unified search complete"
        );
        UnifiedResults { intent, hits, suggestions }
    }
}
