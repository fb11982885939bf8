//! Tracker ownership resolution
//!
//! Walks a hostname's suffixes against the `domains` map to find the
//! entity that owns it.

use crate::types::{Config, Entity};
use crate::url;

/// Owning entity for the URL's host, if any.
///
/// The host is tried longest-first: the full hostname, then with the
/// leftmost label dropped, and so on, so the most specific registered
/// suffix wins. The bare TLD is never looked up.
pub fn find_parent_entity<'a>(config: &'a Config, target: &str) -> Option<&'a Entity> {
    let host = url::normalize_host(target, false);
    let labels: Vec<&str> = host.split('.').collect();

    let mut start = 0;
    while labels.len() - start > 1 {
        let key = labels[start..].join(".");
        if let Some(entity) = config.domains.get(&key) {
            return Some(entity);
        }
        start += 1;
    }

    None
}
