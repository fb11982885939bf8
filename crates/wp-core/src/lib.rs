//! WebPrivacy Core Library
//!
//! Policy-decision core for a browser privacy-protection engine: given a
//! URL and a loaded configuration snapshot, decide whether a protection
//! (tracker blocking, cookie blocking, click-to-load) is suppressed for
//! that URL, and resolve which corporate entity owns a tracker domain.
//!
//! Everything here is a pure, synchronous function over an immutable
//! [`Config`] value supplied by the caller; the one sanctioned mutation
//! is [`remove_broken_site_entry`]. Malformed input never panics or
//! errors - it resolves to the default that keeps protections active.
//!
//! # Modules
//!
//! - `types`: configuration snapshot model
//! - `url`: hostname normalization and limited-domain extraction
//! - `psl`: Public Suffix List rules for registrable-domain extraction
//! - `exceptions`: domain exception-list matching
//! - `features`: per-feature policy evaluation
//! - `entities`: tracker ownership resolution
//! - `allowlist`: user allowlist, cookie exclusions, broken-site handling

pub mod allowlist;
pub mod entities;
pub mod exceptions;
pub mod features;
pub mod psl;
pub mod types;
pub mod url;

// Re-export commonly used items
pub use allowlist::{
    is_broken, is_cookie_excluded, is_domain_cookie_excluded, is_safe_listed,
    remove_broken_site_entry, COOKIE_FEATURE,
};
pub use entities::find_parent_entity;
pub use exceptions::{exception_index, exception_index_for_url, host_matches_domain};
pub use features::{
    broken_features, broken_features_about_blank, broken_script_lists, feature_settings,
    is_feature_broken_for_url, is_feature_enabled, FeatureSettings,
};
pub use psl::SuffixList;
pub use types::{AllowList, Config, Entity, ExceptionEntry, Feature, FeatureState};
pub use url::{extract_host, extract_limited_domain, host_or_input, normalize_host};
