//! Configuration validation and summary statistics
//!
//! Validation never rejects a config - evaluators tolerate every issue
//! found here - but surfacing irregularities at load time makes bad list
//! data visible before it silently weakens matching.

use log::warn;

use wp_core::types::{Config, FeatureState};

/// A tolerated irregularity found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// `domains` key is not lower-case; lookups are exact, so this key
    /// can never match a normalized hostname.
    NonLowercaseDomainKey { key: String },
    /// Exception entry with an empty domain; it can never match.
    EmptyExceptionDomain { feature: String, index: usize },
    /// Feature state string this build does not recognize; treated as
    /// disabled.
    UnknownFeatureState { feature: String },
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonLowercaseDomainKey { key } => {
                write!(f, "domain key '{key}' is not lower-case")
            }
            Self::EmptyExceptionDomain { feature, index } => {
                write!(f, "feature '{feature}' exception #{index} has an empty domain")
            }
            Self::UnknownFeatureState { feature } => {
                write!(f, "feature '{feature}' has an unrecognized state")
            }
        }
    }
}

/// Scan a configuration for tolerated irregularities, logging each one.
pub fn validate(config: &Config) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for key in config.domains.keys() {
        if key.chars().any(|c| c.is_ascii_uppercase()) {
            issues.push(ValidationIssue::NonLowercaseDomainKey { key: key.clone() });
        }
    }

    for (name, feature) in &config.features {
        if feature.state == FeatureState::Unknown {
            issues.push(ValidationIssue::UnknownFeatureState {
                feature: name.clone(),
            });
        }
        for (index, entry) in feature.exceptions.iter().enumerate() {
            if entry.domain.is_empty() {
                issues.push(ValidationIssue::EmptyExceptionDomain {
                    feature: name.clone(),
                    index,
                });
            }
        }
    }

    for issue in &issues {
        warn!("config: {issue}");
    }

    issues
}

/// Summary counts for a loaded configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigStats {
    pub feature_count: usize,
    pub enabled_feature_count: usize,
    pub exception_count: usize,
    pub unprotected_count: usize,
    pub entity_domain_count: usize,
}

pub fn stats(config: &Config) -> ConfigStats {
    ConfigStats {
        feature_count: config.features.len(),
        enabled_feature_count: config
            .features
            .values()
            .filter(|f| f.state == FeatureState::Enabled)
            .count(),
        exception_count: config.features.values().map(|f| f.exceptions.len()).sum(),
        unprotected_count: config.unprotected_temporary.len(),
        entity_domain_count: config.domains.len(),
    }
}
