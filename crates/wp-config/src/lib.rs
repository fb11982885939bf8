//! WebPrivacy Configuration Ingestion
//!
//! This crate turns external JSON documents - privacy configuration,
//! tracker entity data, user allowlists - into the immutable snapshot
//! model evaluated by `wp-core`.

pub mod loader;
pub mod validate;

pub use loader::{merge_domains, parse_allowlist, parse_config, ConfigError};
pub use validate::{stats, validate, ConfigStats, ValidationIssue};
