//! Public Suffix List (PSL) helpers for domain comparison.
//!
//! Uses Mozilla's Public Suffix List via the `psl` crate.

use psl::{List, Psl};
use std::net::IpAddr;

/// Reduce a cookie domain, bare host or full URL to a comparable host.
///
/// Strips scheme, userinfo, port, path, leading dots and a trailing dot,
/// then lower-cases. Applying it twice gives the same result as once.
pub fn host_of(input: &str) -> String {
    let mut rest = input.trim();

    if let Some(idx) = rest.find("://") {
        rest = &rest[idx + 3..];
    }
    if let Some(idx) = rest.find(['/', '?', '#']) {
        rest = &rest[..idx];
    }
    if let Some(idx) = rest.rfind('@') {
        rest = &rest[idx + 1..];
    }

    // Bracketed IPv6 keeps its colons; anything else loses a trailing port.
    let host = if rest.starts_with('[') {
        match rest.find(']') {
            Some(end) => &rest[..=end],
            None => rest,
        }
    } else if rest.matches(':').count() == 1 {
        rest.split(':').next().unwrap_or(rest)
    } else {
        rest
    };

    host.trim_start_matches('.')
        .trim_end_matches('.')
        .to_lowercase()
}

/// Check if a host is an IPv4 or IPv6 literal (brackets allowed).
pub fn is_ip_address(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    host.parse::<IpAddr>().is_ok()
}

/// Check if a domain is a public suffix (e.g., "com", "co.uk").
pub fn is_public_suffix(domain: &str) -> bool {
    let domain_lower = domain.to_lowercase();
    let domain_bytes = domain_lower.as_bytes();

    match List.suffix(domain_bytes) {
        Some(suffix) => suffix.as_bytes() == domain_bytes,
        None => false,
    }
}

/// Get the registrable domain (eTLD+1) for a host.
///
/// For "sub.example.com", returns "example.com".
/// For "com", an IP address, or an empty host, returns None.
pub fn registrable_domain(domain: &str) -> Option<String> {
    let host = host_of(domain);
    if host.is_empty() || is_ip_address(&host) {
        return None;
    }

    psl::domain(host.as_bytes())
        .and_then(|d| std::str::from_utf8(d.as_bytes()).ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_of_strips_everything() {
        assert_eq!(host_of("https://user@Sub.Example.com:8080/a?b#c"), "sub.example.com");
        assert_eq!(host_of(".example.com"), "example.com");
        assert_eq!(host_of("example.com."), "example.com");
        assert_eq!(host_of("example.com/path"), "example.com");
        assert_eq!(host_of("[::1]:443"), "[::1]");
        assert_eq!(host_of("::1"), "::1");
        assert_eq!(host_of(""), "");
    }

    #[test]
    fn test_host_of_idempotent() {
        for input in ["https://A.b.C/x", "..lead.example.org", "host:99"] {
            let once = host_of(input);
            assert_eq!(host_of(&once), once);
        }
    }

    #[test]
    fn test_is_public_suffix() {
        assert!(is_public_suffix("com"));
        assert!(is_public_suffix("CO.UK"));
        assert!(is_public_suffix("github.io"));
        assert!(!is_public_suffix("example.com"));
        assert!(!is_public_suffix("sub.example.com"));
    }

    #[test]
    fn test_registrable_domain() {
        assert_eq!(
            registrable_domain("sub.example.com"),
            Some("example.com".to_string())
        );
        assert_eq!(
            registrable_domain("deep.sub.example.co.uk"),
            Some("example.co.uk".to_string())
        );
        assert_eq!(
            registrable_domain(".Example.COM"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_registrable_domain_none() {
        assert_eq!(registrable_domain("com"), None);
        assert_eq!(registrable_domain("co.uk"), None);
        assert_eq!(registrable_domain("192.168.0.1"), None);
        assert_eq!(registrable_domain("[2001:db8::1]"), None);
        assert_eq!(registrable_domain(""), None);
    }

    #[test]
    fn test_ip_detection() {
        assert!(is_ip_address("10.0.0.1"));
        assert!(is_ip_address("[::1]"));
        assert!(!is_ip_address("example.com"));
    }
}
