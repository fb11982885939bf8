//! Public Suffix List support for registrable-domain extraction
//!
//! A [`SuffixList`] is built from Public Suffix List text and answers
//! "what is the eTLD+1 of this host?". It is a plain value passed to the
//! functions that need it; callers that have no list get a heuristic
//! fallback that knows the common two-part TLDs.

use std::collections::HashSet;
use std::net::IpAddr;

/// Common two-part TLDs for the no-list fallback.
const COMMON_TWO_PART_TLDS: &[&str] = &[
    "co.uk", "co.jp", "co.nz", "co.za", "co.in", "co.kr",
    "com.au", "com.br", "com.cn", "com.mx", "com.tw", "com.hk",
    "net.au", "net.nz",
    "org.uk", "org.au",
    "gov.uk", "gov.au",
    "ac.uk", "ac.jp",
    "ne.jp", "or.jp",
];

/// Parsed Public Suffix List rules.
#[derive(Debug, Default, Clone)]
pub struct SuffixList {
    /// Exact rules (e.g., "com", "co.uk")
    exact: HashSet<String>,
    /// Wildcard rules (e.g., "*.ck" stored as "ck")
    wildcard: HashSet<String>,
    /// Exception rules (e.g., "!www.ck" stored as "www.ck")
    exception: HashSet<String>,
}

impl SuffixList {
    /// Create an empty list. Lookups fall back to the two-part-TLD
    /// heuristic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse rules from Public Suffix List text (one rule per line,
    /// `//` comments, `*.` wildcards, `!` exceptions).
    pub fn parse(text: &str) -> Self {
        let mut list = Self::new();

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            // Rules are separated from any trailing annotation by whitespace.
            let rule = line.split_whitespace().next().unwrap_or("");
            if rule.is_empty() {
                continue;
            }

            let rule = rule.to_lowercase();
            if let Some(rest) = rule.strip_prefix('!') {
                list.exception.insert(rest.to_string());
            } else if let Some(rest) = rule.strip_prefix("*.") {
                list.wildcard.insert(rest.to_string());
            } else {
                list.exact.insert(rule);
            }
        }

        list
    }

    /// Number of loaded rules.
    pub fn len(&self) -> usize {
        self.exact.len() + self.wildcard.len() + self.exception.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compute the registrable domain (eTLD+1) for a hostname.
    ///
    /// Returns `None` when the host has no recognized registrable domain:
    /// an IP address, a single label (`localhost`), a bare public suffix,
    /// or - when rules are loaded - a TLD the list does not know. Callers
    /// fall back to the raw hostname in that case.
    pub fn registrable_domain(&self, host: &str) -> Option<String> {
        let host = host.trim_end_matches('.').to_lowercase();
        if host.is_empty() || is_ip_host(&host) {
            return None;
        }

        let labels: Vec<&str> = host.split('.').collect();
        let n = labels.len();
        if n <= 1 || labels.iter().any(|label| label.is_empty()) {
            return None;
        }

        if self.is_empty() {
            return Some(fallback_etld1(&labels));
        }

        // Walk suffixes from longest to shortest; the first rule hit
        // decides the public suffix, so the match is longest-suffix-first.
        for i in 0..n {
            let suffix = labels[i..].join(".");

            // An exception rule makes the suffix itself registrable.
            if self.exception.contains(&suffix) {
                return Some(suffix);
            }

            if self.exact.contains(&suffix) {
                return registrable_at(&labels, i);
            }

            // A wildcard rule on the parent makes this suffix public.
            if i + 1 < n && self.wildcard.contains(&labels[i + 1..].join(".")) {
                return registrable_at(&labels, i);
            }
        }

        None
    }
}

/// Registrable domain when `labels[boundary..]` is the public suffix.
fn registrable_at(labels: &[&str], boundary: usize) -> Option<String> {
    if boundary == 0 {
        // The whole host is a public suffix.
        return None;
    }
    Some(labels[boundary - 1..].join("."))
}

/// Heuristic eTLD+1 used when no rules are loaded.
fn fallback_etld1(labels: &[&str]) -> String {
    let n = labels.len();
    if n <= 2 {
        return labels.join(".");
    }

    let last_two = format!("{}.{}", labels[n - 2], labels[n - 1]);
    if COMMON_TWO_PART_TLDS.contains(&last_two.as_str()) {
        return labels[n - 3..].join(".");
    }

    labels[n - 2..].join(".")
}

/// IPv4/IPv6 literal check; IPv6 hosts appear bracketed in URLs.
fn is_ip_host(host: &str) -> bool {
    let bare = host
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(host);
    bare.parse::<IpAddr>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> SuffixList {
        SuffixList::parse(
            "// ===BEGIN ICANN DOMAINS===\n\
             com\n\
             uk\n\
             co.uk\n\
             jp\n\
             *.ck\n\
             !www.ck\n",
        )
    }

    #[test]
    fn test_parse_rule_kinds() {
        let list = sample_list();
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn test_registrable_domain_exact_rules() {
        let list = sample_list();
        assert_eq!(
            list.registrable_domain("sub.example.com").as_deref(),
            Some("example.com")
        );
        assert_eq!(
            list.registrable_domain("a.b.example.co.uk").as_deref(),
            Some("example.co.uk")
        );
        assert_eq!(
            list.registrable_domain("example.com").as_deref(),
            Some("example.com")
        );
    }

    #[test]
    fn test_registrable_domain_wildcard_and_exception() {
        let list = sample_list();
        // "*.ck": every "x.ck" is a public suffix.
        assert_eq!(
            list.registrable_domain("shop.example.ck").as_deref(),
            Some("shop.example.ck")
        );
        // "!www.ck" is registrable itself.
        assert_eq!(
            list.registrable_domain("www.ck").as_deref(),
            Some("www.ck")
        );
    }

    #[test]
    fn test_no_registrable_domain() {
        let list = sample_list();
        assert_eq!(list.registrable_domain("localhost"), None);
        assert_eq!(list.registrable_domain("192.168.0.1"), None);
        assert_eq!(list.registrable_domain("[::1]"), None);
        // Bare public suffix.
        assert_eq!(list.registrable_domain("co.uk"), None);
        // Unknown TLD with rules loaded.
        assert_eq!(list.registrable_domain("foo.internal"), None);
    }

    #[test]
    fn test_fallback_without_rules() {
        let list = SuffixList::new();
        assert_eq!(
            list.registrable_domain("sub.example.com").as_deref(),
            Some("example.com")
        );
        assert_eq!(
            list.registrable_domain("sub.example.co.uk").as_deref(),
            Some("example.co.uk")
        );
        assert_eq!(list.registrable_domain("localhost"), None);
    }

    #[test]
    fn test_case_and_trailing_dot() {
        let list = sample_list();
        assert_eq!(
            list.registrable_domain("Sub.Example.COM.").as_deref(),
            Some("example.com")
        );
    }
}
