//! Configuration data model
//!
//! These types mirror the JSON privacy configuration and tracker data set
//! that an external loader hands to the evaluators. Every optional field
//! has a documented default so that a sparse config deserializes without
//! errors; evaluators never see a missing-field failure.

use std::collections::{BTreeMap, HashMap};

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Feature State
// =============================================================================

/// Rollout state of a protection feature.
///
/// Only `Enabled` turns a feature on; every other state (including states
/// this build does not know about) counts as off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureState {
    Enabled,
    #[default]
    Disabled,
    Beta,
    Internal,
    /// Any state string this build does not recognize.
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Exception Entries
// =============================================================================

/// A single domain entry in an exception list.
///
/// Matches a hostname if the hostname equals `domain` or ends with
/// `"." + domain`, so one entry for `example.com` covers all subdomains.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExceptionEntry {
    pub domain: String,
    /// Free-form annotation carried by site-breakage reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ExceptionEntry {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            reason: None,
        }
    }
}

// =============================================================================
// Features
// =============================================================================

/// Per-feature configuration block.
///
/// `settings` and `exceptions` deserialize leniently: a wrong-typed
/// value behaves as absent, so one malformed feature never rejects the
/// whole snapshot.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Feature {
    #[serde(default)]
    pub state: FeatureState,
    /// Opaque feature settings; evaluators read individual keys and treat
    /// anything missing or malformed as absent.
    #[serde(default, deserialize_with = "lenient_settings")]
    pub settings: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient_exceptions")]
    pub exceptions: Vec<ExceptionEntry>,
}

/// Tolerate a wrong-typed settings value: anything but an object is the
/// empty map.
fn lenient_settings<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => {
            warn!("ignoring non-object feature settings: {other}");
            Ok(Map::new())
        }
    }
}

/// Tolerate a wrong-typed exception list; malformed elements (no string
/// `domain`) are skipped, since they could never match a hostname.
fn lenient_exceptions<'de, D>(deserializer: D) -> Result<Vec<ExceptionEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(|item| {
                let domain = item.get("domain")?.as_str()?.to_string();
                let reason = item.get("reason").and_then(Value::as_str).map(str::to_string);
                Some(ExceptionEntry { domain, reason })
            })
            .collect()),
        Value::Null => Ok(Vec::new()),
        other => {
            warn!("ignoring non-list feature exceptions: {other}");
            Ok(Vec::new())
        }
    }
}

// =============================================================================
// Entities
// =============================================================================

/// Ownership record grouping tracker domains under a corporate owner.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub prevalence: f64,
    #[serde(default)]
    pub domains: Vec<String>,
}

// =============================================================================
// Configuration Snapshot
// =============================================================================

/// Immutable configuration snapshot.
///
/// Created whole by an external loader and replaced whole on refresh. The
/// single sanctioned mutation is removing a broken-site entry from
/// `unprotected_temporary` (see `remove_broken_site_entry`), which requires
/// exclusive access.
///
/// `features` is ordered so that list-producing evaluators are
/// deterministic across calls; `domains` is lookup-only and keyed by
/// lower-case registrable domain.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub features: BTreeMap<String, Feature>,
    /// Site-reported broken sites, temporarily unprotected.
    #[serde(default)]
    pub unprotected_temporary: Vec<ExceptionEntry>,
    /// Registrable domain -> owning entity.
    #[serde(default)]
    pub domains: HashMap<String, Entity>,
}

impl Config {
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.get(name)
    }
}

// =============================================================================
// User Allow List
// =============================================================================

/// User-managed allowlist: hostname -> enabled flag.
///
/// Persisted by an external store; read-only to the evaluators. Entries
/// with a `false` value are treated as absent.
pub type AllowList = HashMap<String, bool>;
