use crate::config::types::{
    CategoryEntry, Config, DiscoveryConfig, DownloadConfig, NamingConfig, SessionConfig,
    VendorEntry,
};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_session_config(&config.session)?;
    validate_discovery_config(&config.discovery)?;
    validate_download_config(&config.download)?;
    validate_naming_config(&config.naming)?;
    validate_vendors(&config.vendors)?;
    validate_categories(&config.categories)?;
    Ok(())
}

/// Validates page session configuration
fn validate_session_config(config: &SessionConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.page_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "page-timeout-secs must be >= 1, got {}",
            config.page_timeout_secs
        )));
    }

    Ok(())
}

/// Validates discovery configuration
fn validate_discovery_config(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    if config.max_load_more_clicks < 1 {
        return Err(ConfigError::Validation(format!(
            "max-load-more-clicks must be >= 1, got {}",
            config.max_load_more_clicks
        )));
    }

    if config.load_more_timeout_ms < 1 {
        return Err(ConfigError::Validation(
            "load-more-timeout-ms must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates download configuration
fn validate_download_config(config: &DownloadConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 || config.max_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be between 1 and 10, got {}",
            config.max_attempts
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates naming configuration
fn validate_naming_config(config: &NamingConfig) -> Result<(), ConfigError> {
    if config.max_length < 3 {
        return Err(ConfigError::Validation(format!(
            "max-length must be >= 3, got {}",
            config.max_length
        )));
    }

    if config.min_length > config.max_length {
        return Err(ConfigError::Validation(format!(
            "min-length ({}) cannot exceed max-length ({})",
            config.min_length, config.max_length
        )));
    }

    Ok(())
}

/// Validates vendor overrides
fn validate_vendors(vendors: &[VendorEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in vendors {
        if !seen.insert(entry.name) {
            return Err(ConfigError::Validation(format!(
                "Vendor '{}' is configured more than once",
                entry.name
            )));
        }

        if let Some(root_url) = &entry.root_url {
            let url = Url::parse(root_url).map_err(|e| {
                ConfigError::InvalidUrl(format!("Invalid root-url '{}': {}", root_url, e))
            })?;

            if url.scheme() != "https" && url.scheme() != "http" {
                return Err(ConfigError::Validation(format!(
                    "root-url '{}' must use HTTP(S)",
                    root_url
                )));
            }
        }

        if let Some(link_file) = &entry.link_file {
            if link_file.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "link-file for vendor '{}' cannot be empty",
                    entry.name
                )));
            }
        }
    }

    Ok(())
}

/// Validates the organizer keyword table
fn validate_categories(categories: &[CategoryEntry]) -> Result<(), ConfigError> {
    if categories.is_empty() {
        return Err(ConfigError::Validation(
            "At least one category must be configured".to_string(),
        ));
    }

    let mut seen = HashSet::new();

    for entry in categories {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "Category name cannot be empty".to_string(),
            ));
        }

        if name.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "Category name '{}' cannot contain path separators",
                name
            )));
        }

        if !seen.insert(name.to_string()) {
            return Err(ConfigError::Validation(format!(
                "Duplicate category '{}'",
                name
            )));
        }

        if entry.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "Category '{}' must have at least one keyword",
                name
            )));
        }
    }

    Ok(())
}
