//! Catalog-Harvest: a product catalog harvester
//!
//! This crate discovers product pages inside vendor catalog hierarchies,
//! extracts structured attributes from each page through ordered fallback
//! strategies, downloads the associated media and technical assets into
//! deterministically named folders, and later reorganizes those folders
//! into a category/format tree.

pub mod config;
pub mod discover;
pub mod download;
pub mod extract;
pub mod naming;
pub mod organize;
pub mod output;
pub mod scrape;
pub mod session;
pub mod url;
pub mod vendor;

use thiserror::Error;

/// Main error type for Catalog-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Download of {url} abandoned after {attempts} attempts: {message}")]
    Download {
        url: String,
        attempts: u32,
        message: String,
    },

    #[error("Empty body received from {url}")]
    EmptyDownload { url: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Session error: {0}")]
    Session(String),

    #[error("No URLs to process in {path}")]
    EmptyUrlList { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown vendor: {0}")]
    UnknownVendor(String),
}

/// Result type alias for Catalog-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crate::url::{classify, Level, UrlClassifier};
pub use vendor::{Vendor, VendorGrammar};
