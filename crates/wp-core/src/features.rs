//! Feature policy evaluation
//!
//! Pure functions over a [`Config`] snapshot: is a feature on, is it
//! turned off for this URL, which features are broken here. Missing or
//! malformed configuration never fails - it resolves to the default that
//! keeps protections active.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::exceptions::{exception_index, exception_index_for_url};
use crate::types::{Config, ExceptionEntry, FeatureState};
use crate::url;

// =============================================================================
// Feature Settings View
// =============================================================================

/// Read-only view of a feature's settings map.
///
/// A missing feature or missing settings behaves as an empty map, so
/// every accessor has a documented "absent" result instead of an error.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSettings<'a>(Option<&'a Map<String, Value>>);

impl<'a> FeatureSettings<'a> {
    pub fn is_empty(&self) -> bool {
        self.0.map_or(true, Map::is_empty)
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.and_then(|map| map.get(key))
    }

    /// String value for `key`, or `None` when absent or not a string.
    pub fn str_value(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Domain-entry list for `key` (`[{"domain": ...}, ...]`).
    /// Absent, malformed, or non-list values yield an empty list;
    /// malformed elements are skipped.
    pub fn entry_list(&self, key: &str) -> Vec<ExceptionEntry> {
        let Some(Value::Array(items)) = self.get(key) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| item.get("domain")?.as_str())
            .map(ExceptionEntry::new)
            .collect()
    }
}

/// Settings for `feature`, behaving as `{}` when the feature or its
/// settings are absent.
pub fn feature_settings<'a>(config: &'a Config, feature: &str) -> FeatureSettings<'a> {
    FeatureSettings(config.feature(feature).map(|f| &f.settings))
}

// =============================================================================
// Feature Policy
// =============================================================================

/// True iff the feature exists and its state is `enabled`.
pub fn is_feature_enabled(config: &Config, feature: &str) -> bool {
    config
        .feature(feature)
        .map_or(false, |f| f.state == FeatureState::Enabled)
}

/// True iff the feature's exception list covers the URL. A feature with
/// no exceptions is never broken.
pub fn is_feature_broken_for_url(config: &Config, url: &str, feature: &str) -> bool {
    let Some(feature) = config.feature(feature) else {
        return false;
    };
    if feature.exceptions.is_empty() {
        return false;
    }
    exception_index_for_url(url, &feature.exceptions).is_some()
}

/// Names of features that do not protect this URL: disabled features and
/// features with a matching exception entry.
///
/// A feature that is both disabled and excepted appears twice; callers
/// only test membership, so duplicates are harmless and kept for parity
/// with the shipped behavior.
pub fn broken_features(config: &Config, url: &str) -> Vec<String> {
    let hostname = url::host_or_input(url);
    let mut broken = Vec::new();

    for (name, feature) in &config.features {
        if feature.state != FeatureState::Enabled {
            broken.push(name.clone());
        }
        if exception_index(hostname, &feature.exceptions).is_some() {
            broken.push(name.clone());
        }
    }

    broken
}

/// Names of features that must not run in `about:blank` frames opened
/// by this URL: features with `aboutBlankEnabled == "disabled"`, and
/// features whose `aboutBlankSites` list covers the URL.
pub fn broken_features_about_blank(config: &Config, url: &str) -> Vec<String> {
    let hostname = url::host_or_input(url);
    let mut broken = Vec::new();

    for name in config.features.keys() {
        let settings = feature_settings(config, name);

        if settings.str_value("aboutBlankEnabled") == Some("disabled") {
            broken.push(name.clone());
        }
        if exception_index(hostname, &settings.entry_list("aboutBlankSites")).is_some() {
            broken.push(name.clone());
        }
    }

    broken
}

/// Per-feature script domains (`settings.scripts[*].domain`) to hand to
/// content-script injection. Features without scripts map to an empty
/// list.
pub fn broken_script_lists(config: &Config) -> BTreeMap<String, Vec<String>> {
    config
        .features
        .keys()
        .map(|name| {
            let domains = feature_settings(config, name)
                .entry_list("scripts")
                .into_iter()
                .map(|entry| entry.domain)
                .collect();
            (name.clone(), domains)
        })
        .collect()
}
