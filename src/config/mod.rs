//! Configuration module for Catalog-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every setting has a default, so the tool also runs without a file.
//!
//! # Example
//!
//! ```no_run
//! use catalog_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Names are capped at {} characters", config.naming.max_length);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_categories, CategoryEntry, Config, DiscoveryConfig, DownloadConfig, NamingConfig,
    SessionConfig, VendorEntry, ASSET_PAUSE_MS, DEFAULT_USER_AGENT, LISTING_SCROLL_SETTLE_MS,
    LOAD_MORE_SETTLE_MS, RETRY_PAUSE_MS, SCREENSHOT_SCROLL_SETTLE_MS, SPEC_PANEL_SETTLE_MS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
