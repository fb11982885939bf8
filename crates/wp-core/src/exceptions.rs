//! Exception list matching
//!
//! An entry for `example.com` covers `example.com` itself and every
//! subdomain. Matching is case-insensitive and positional: callers that
//! remove an entry do so at the returned index, so the first match wins
//! and the scan order is the list order.

use crate::types::ExceptionEntry;
use crate::url;

/// Whether `hostname` is covered by `domain`: equal, or a subdomain of it.
#[inline]
pub fn host_matches_domain(hostname: &str, domain: &str) -> bool {
    if domain.is_empty() {
        return false;
    }
    if hostname.eq_ignore_ascii_case(domain) {
        return true;
    }

    // Suffix match with a '.' boundary: "shop.example.com" matches
    // "example.com" but "notexample.com" does not.
    let Some(dot_pos) = hostname.len().checked_sub(domain.len() + 1) else {
        return false;
    };
    if !hostname.is_char_boundary(dot_pos + 1) {
        return false;
    }
    hostname.as_bytes()[dot_pos] == b'.' && hostname[dot_pos + 1..].eq_ignore_ascii_case(domain)
}

/// Index of the first entry covering `hostname`, or `None`.
pub fn exception_index(hostname: &str, list: &[ExceptionEntry]) -> Option<usize> {
    list.iter()
        .position(|entry| host_matches_domain(hostname, &entry.domain))
}

/// Like [`exception_index`] but takes a URL, falling back to the raw
/// input when it does not parse as one.
pub fn exception_index_for_url(target: &str, list: &[ExceptionEntry]) -> Option<usize> {
    exception_index(url::host_or_input(target), list)
}
