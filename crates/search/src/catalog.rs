//! Catalog records returned by the PharmaFinder backend.
//!
//! Only the fields used for searching are modelled; anything else in the
//! backend payload is ignored on deserialization.

use crate::{Result, Searchable};
use serde::{Deserialize, Serialize};

/// A product listed by one or more pharmacies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend identifier (a UUID string)
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub generic_name: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub active_ingredient: Option<String>,
    #[serde(default)]
    pub is_sponsored: bool,
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.generic_name.clone().unwrap_or_default(),
            self.manufacturer.clone().unwrap_or_default(),
            self.active_ingredient.clone().unwrap_or_default(),
        ]
    }
}

/// A pharmacy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pharmacy {
    /// Backend identifier (a UUID string)
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl Searchable for Pharmacy {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.address.clone().unwrap_or_default(),
            self.city.clone().unwrap_or_default(),
        ]
    }
}

/// Parse a JSON array of products.
pub fn parse_products(json: &str) -> Result<Vec<Product>> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a JSON array of pharmacies.
pub fn parse_pharmacies(json: &str) -> Result<Vec<Pharmacy>> {
    Ok(serde_json::from_str(json)?)
}
