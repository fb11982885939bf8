//! Configuration loading
//!
//! Parses privacy-configuration JSON, tracker entity data, and user
//! allowlist snapshots into the `wp-core` model. Parsing is the only
//! fallible boundary: once a [`Config`] exists, every evaluator call on
//! it is infallible.

use std::collections::HashMap;

use log::debug;
use serde_json::Value;

use wp_core::types::{AllowList, Config, Entity};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("empty input")]
    EmptyInput,
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object at the top level")]
    NotAnObject,
}

/// Parse a privacy-configuration document.
pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ConfigError::EmptyInput);
    }

    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(ConfigError::NotAnObject);
    }

    let config: Config = serde_json::from_value(value)?;
    debug!(
        "loaded config: {} features, {} unprotected sites, {} entity domains",
        config.features.len(),
        config.unprotected_temporary.len(),
        config.domains.len()
    );
    Ok(config)
}

/// Parse a tracker data set's `domains` map and merge it into `config`.
///
/// Entity data often ships separately from the feature configuration;
/// on key collision the tracker data wins.
pub fn merge_domains(config: &mut Config, text: &str) -> Result<(), ConfigError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ConfigError::EmptyInput);
    }

    let value: Value = serde_json::from_str(text)?;
    let domains_value = match value.get("domains") {
        Some(domains) => domains.clone(),
        // A bare domain map is accepted too.
        None => value,
    };

    let domains: HashMap<String, Entity> = serde_json::from_value(domains_value)?;
    debug!("merging {} entity domains", domains.len());
    config.domains.extend(domains);
    Ok(())
}

/// Parse a user allowlist snapshot: `{"hostname": true, ...}`.
pub fn parse_allowlist(text: &str) -> Result<AllowList, ConfigError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ConfigError::EmptyInput);
    }
    let allowlist: AllowList = serde_json::from_str(text)?;
    Ok(allowlist)
}
