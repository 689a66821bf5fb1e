//! Error types for the search crate.
//!
//! The matching functions themselves are total; only configuration loading
//! and catalog parsing can fail.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while preparing a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read
    #[error("Failed to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the schema
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Catalog JSON could not be parsed
    #[error("Catalog parsing error: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

/// Error code for integration with PharmaFinder error reporting.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Out-of-range configuration value
    InvalidConfig = 11001,
    /// Unreadable configuration file
    ConfigIo = 11002,
    /// Malformed configuration file
    ConfigParse = 11003,
    /// Malformed catalog
    CatalogParse = 11004,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidConfig(_) => SearchErrorCode::InvalidConfig,
            SearchError::ConfigIo { .. } => SearchErrorCode::ConfigIo,
            SearchError::ConfigParse(_) => SearchErrorCode::ConfigParse,
            SearchError::CatalogParse(_) => SearchErrorCode::CatalogParse,
        }
    }
}
