//! User allowlist, cookie exclusions, and broken-site handling
//!
//! These decisions suppress protections for a site, so every ambiguous
//! input resolves to "not listed" - protections stay on.

use log::debug;

use crate::exceptions::{exception_index, exception_index_for_url};
use crate::features::feature_settings;
use crate::types::{AllowList, Config, ExceptionEntry};
use crate::url;

/// Feature whose settings carry the third-party cookie exclusions.
pub const COOKIE_FEATURE: &str = "trackingCookies3p";

// =============================================================================
// Broken Sites
// =============================================================================

/// True iff the URL matches the site-reported broken list
/// (`unprotectedTemporary`).
pub fn is_broken(config: &Config, target: &str) -> bool {
    exception_index_for_url(target, &config.unprotected_temporary).is_some()
}

/// Remove the broken-site entry covering `domain`, returning it.
///
/// Find-and-remove in one exclusive borrow, so no other mutation can
/// interleave between the index lookup and the removal. Unmatched
/// domains are a no-op, not an error.
pub fn remove_broken_site_entry(config: &mut Config, domain: &str) -> Option<ExceptionEntry> {
    let hostname = url::host_or_input(domain);
    let index = exception_index(hostname, &config.unprotected_temporary)?;
    let removed = config.unprotected_temporary.remove(index);
    debug!("removed broken-site entry {}", removed.domain);
    Some(removed)
}

// =============================================================================
// User Allowlist
// =============================================================================

/// True iff the URL's host - or any parent of it - is allowlisted by the
/// user, or the URL is on the broken-site list.
pub fn is_safe_listed(config: &Config, allowlist: &AllowList, target: &str) -> bool {
    let host = url::normalize_host(target, false);
    let labels: Vec<&str> = host.split('.').collect();

    let mut start = 0;
    while labels.len() - start > 1 {
        let key = labels[start..].join(".");
        if allowlist.get(&key).copied().unwrap_or(false) {
            return true;
        }
        start += 1;
    }

    is_broken(config, &host)
}

// =============================================================================
// Cookie Exclusions
// =============================================================================

/// True iff the domain - or any parent down to the registrable domain -
/// appears in the cookie feature's `excludedCookieDomains`.
///
/// Reduction stops at two labels: a bare registrable domain is never
/// stripped further, which bounds the scan by the label count.
pub fn is_domain_cookie_excluded(config: &Config, domain: &str) -> bool {
    let excluded = feature_settings(config, COOKIE_FEATURE).entry_list("excludedCookieDomains");
    if excluded.is_empty() {
        return false;
    }

    let domain = domain.to_ascii_lowercase();
    let labels: Vec<&str> = domain.split('.').collect();

    let mut start = 0;
    loop {
        let candidate = labels[start..].join(".");
        if excluded.iter().any(|entry| entry.domain == candidate) {
            return true;
        }
        if labels.len() - start <= 2 {
            return false;
        }
        start += 1;
    }
}

/// [`is_domain_cookie_excluded`] for a URL; the host keeps its port,
/// matching how cookie scopes are keyed.
pub fn is_cookie_excluded(config: &Config, target: &str) -> bool {
    let Some((host_start, host_end)) = url::get_host_position(target) else {
        return false;
    };
    // Include an explicit port.
    let host_with_port = match url::extract_port(target) {
        Some(port) => &target[host_start..host_end + 1 + port.len()],
        None => &target[host_start..host_end],
    };
    is_domain_cookie_excluded(config, host_with_port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> Config {
        serde_json::from_value(json!({
            "features": {
                "trackingCookies3p": {
                    "state": "enabled",
                    "settings": {
                        "excludedCookieDomains": [
                            { "domain": "accounts.example.com" },
                            { "domain": "sso.example" }
                        ]
                    }
                }
            },
            "unprotectedTemporary": [
                { "domain": "reported.example", "reason": "login loops" },
                { "domain": "other.example" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_is_broken() {
        let config = config();
        assert!(is_broken(&config, "https://reported.example/login"));
        assert!(is_broken(&config, "sub.reported.example"));
        assert!(!is_broken(&config, "https://fine.example/"));
    }

    #[test]
    fn test_remove_broken_site_entry() {
        let mut config = config();
        let removed = remove_broken_site_entry(&mut config, "reported.example").unwrap();
        assert_eq!(removed.domain, "reported.example");
        assert_eq!(config.unprotected_temporary.len(), 1);
        assert_eq!(config.unprotected_temporary[0].domain, "other.example");
        assert!(!is_broken(&config, "https://reported.example/"));
    }

    #[test]
    fn test_remove_unmatched_is_noop() {
        let mut config = config();
        let before = config.unprotected_temporary.clone();
        assert!(remove_broken_site_entry(&mut config, "unknown.example").is_none());
        assert_eq!(config.unprotected_temporary, before);
    }

    #[test]
    fn test_remove_takes_matching_index_only() {
        let mut config = config();
        // A subdomain matches the first entry; exactly that one goes.
        remove_broken_site_entry(&mut config, "deep.reported.example").unwrap();
        assert_eq!(config.unprotected_temporary.len(), 1);
        assert_eq!(config.unprotected_temporary[0].domain, "other.example");
    }

    #[test]
    fn test_is_safe_listed_walks_parents() {
        let config = config();
        let mut allowlist = AllowList::new();
        allowlist.insert("example.com".to_string(), true);
        allowlist.insert("off.example".to_string(), false);

        assert!(is_safe_listed(&config, &allowlist, "https://example.com/"));
        assert!(is_safe_listed(&config, &allowlist, "https://deep.sub.example.com/"));
        // www is normalized away before the walk.
        assert!(is_safe_listed(&config, &allowlist, "https://www.example.com/"));
        // A false flag is the same as absent.
        assert!(!is_safe_listed(&config, &allowlist, "https://off.example/"));
        assert!(!is_safe_listed(&config, &allowlist, "https://stranger.example/"));
    }

    #[test]
    fn test_is_safe_listed_accepts_bare_hostnames() {
        let config = config();
        let mut allowlist = AllowList::new();
        allowlist.insert("allowed.example".to_string(), true);

        assert!(is_safe_listed(&config, &allowlist, "sub.allowed.example"));
        assert!(is_safe_listed(&config, &allowlist, "www.allowed.example"));
        assert!(!is_safe_listed(&config, &allowlist, "sub.other.example"));
    }

    #[test]
    fn test_is_safe_listed_falls_through_to_broken_list() {
        let config = config();
        let allowlist = AllowList::new();
        assert!(is_safe_listed(&config, &allowlist, "https://reported.example/"));
        assert!(!is_safe_listed(&config, &allowlist, "https://fine.example/"));
    }

    #[test]
    fn test_cookie_exclusion_exact_and_reduced() {
        let config = config();
        assert!(is_domain_cookie_excluded(&config, "accounts.example.com"));
        // Reduces label by label until a hit.
        assert!(is_domain_cookie_excluded(&config, "login.accounts.example.com"));
        assert!(is_domain_cookie_excluded(&config, "a.b.sso.example"));
        assert!(!is_domain_cookie_excluded(&config, "example.com"));
    }

    #[test]
    fn test_cookie_exclusion_stops_at_two_labels() {
        let config: Config = serde_json::from_value(json!({
            "features": {
                "trackingCookies3p": {
                    "settings": {
                        "excludedCookieDomains": [{ "domain": "com" }]
                    }
                }
            }
        }))
        .unwrap();

        // "example.com" is the floor; the bare "com" is never produced
        // by reduction.
        assert!(!is_domain_cookie_excluded(&config, "shop.example.com"));
        // A direct single-label query still checks the exact entry.
        assert!(is_domain_cookie_excluded(&config, "com"));
    }

    #[test]
    fn test_cookie_exclusion_without_settings() {
        let config = Config::default();
        assert!(!is_domain_cookie_excluded(&config, "accounts.example.com"));
    }

    #[test]
    fn test_is_cookie_excluded_url_keeps_port() {
        let config: Config = serde_json::from_value(json!({
            "features": {
                "trackingCookies3p": {
                    "settings": {
                        "excludedCookieDomains": [{ "domain": "sso.example:8443" }]
                    }
                }
            }
        }))
        .unwrap();

        assert!(is_cookie_excluded(&config, "https://sso.example:8443/auth"));
        assert!(!is_cookie_excluded(&config, "https://sso.example/auth"));
        assert!(!is_cookie_excluded(&config, "not a url"));
    }
}
