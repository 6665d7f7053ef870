//! Vendor labelling by cookie domain.
//!
//! The built-in table is a small preloaded subset of well-known third-party
//! cookie setters. It is built once per process and never mutated; callers
//! with their own data load a [`VendorTable`] from JSON instead.

use crate::base::error::{CookieLensError, Result};
use crate::cookies::normalizedcookie::{normalize_domain, NormalizedCookie};
use crate::cookies::psl::registrable_domain;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

/// Human-readable vendor name for a cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TechnologyLabel(String);

impl TechnologyLabel {
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TechnologyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Domain to vendor mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorTable {
    entries: HashMap<String, String>,
}

// Subset of common third-party cookie domains.
const BUILTIN_VENDORS: &[(&str, &str)] = &[
    ("google-analytics.com", "Google Analytics"),
    ("analytics.google.com", "Google Analytics"),
    ("googletagmanager.com", "Google Tag Manager"),
    ("doubleclick.net", "Google DoubleClick"),
    ("googlesyndication.com", "Google AdSense"),
    ("googleadservices.com", "Google Ads"),
    ("youtube.com", "YouTube"),
    ("facebook.com", "Facebook"),
    ("facebook.net", "Facebook"),
    ("instagram.com", "Instagram"),
    ("linkedin.com", "LinkedIn"),
    ("ads.linkedin.com", "LinkedIn Ads"),
    ("twitter.com", "Twitter"),
    ("x.com", "Twitter"),
    ("tiktok.com", "TikTok"),
    ("bing.com", "Microsoft Advertising"),
    ("clarity.ms", "Microsoft Clarity"),
    ("hotjar.com", "Hotjar"),
    ("hubspot.com", "HubSpot"),
    ("hs-analytics.net", "HubSpot"),
    ("criteo.com", "Criteo"),
    ("adnxs.com", "Xandr"),
    ("taboola.com", "Taboola"),
    ("outbrain.com", "Outbrain"),
    ("quantserve.com", "Quantcast"),
    ("scorecardresearch.com", "Comscore"),
    ("amazon-adsystem.com", "Amazon Advertising"),
    ("pinterest.com", "Pinterest"),
    ("reddit.com", "Reddit"),
    ("snapchat.com", "Snapchat"),
    ("yandex.ru", "Yandex"),
    ("cloudflare.com", "Cloudflare"),
    ("stripe.com", "Stripe"),
    ("mixpanel.com", "Mixpanel"),
    ("segment.io", "Segment"),
    ("optimizely.com", "Optimizely"),
    ("addthis.com", "AddThis"),
    ("sharethis.com", "ShareThis"),
];

static BUILTIN: LazyLock<VendorTable> =
    LazyLock::new(|| VendorTable::new(BUILTIN_VENDORS.iter().copied()));

impl VendorTable {
    pub fn new<D, V>(entries: impl IntoIterator<Item = (D, V)>) -> Self
    where
        D: AsRef<str>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(domain, vendor)| (normalize_domain(domain.as_ref()), vendor.into()))
            .filter(|(domain, _)| !domain.is_empty())
            .collect();
        Self { entries }
    }

    /// The process-wide preloaded table.
    pub fn builtin() -> &'static VendorTable {
        &BUILTIN
    }

    /// Load `{ "domain": "Vendor", ... }` JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let map: HashMap<String, String> = serde_json::from_str(json)?;
        let table = Self::new(map);
        tracing::debug!(entries = table.len(), "loaded vendor table");
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CookieLensError::io(path.display().to_string(), &e))?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest-suffix match of `domain` against the table.
    ///
    /// Candidates run from the full host down to its registrable domain, so
    /// a bare public suffix never matches. Hosts without a registrable
    /// domain only match exactly.
    pub fn lookup(&self, domain: &str) -> Option<&str> {
        let host = normalize_domain(domain);
        if host.is_empty() {
            return None;
        }

        let Some(site) = registrable_domain(&host) else {
            return self.entries.get(&host).map(String::as_str);
        };

        let mut candidate = host.as_str();
        loop {
            if let Some(vendor) = self.entries.get(candidate) {
                return Some(vendor);
            }
            if candidate.len() <= site.len() {
                return None;
            }
            match candidate.split_once('.') {
                Some((_, parent)) => candidate = parent,
                None => return None,
            }
        }
    }

    /// Label a cookie, `Unknown` on a miss.
    pub fn technology_for(&self, cookie: &NormalizedCookie) -> TechnologyLabel {
        self.lookup(&cookie.domain)
            .map(TechnologyLabel::new)
            .unwrap_or_else(TechnologyLabel::unknown)
    }
}

/// Label a cookie with the built-in vendor table.
pub fn generate_technology(cookie: &NormalizedCookie) -> TechnologyLabel {
    VendorTable::builtin().technology_for(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::{normalize_cookie, CookieRecord};

    fn cookie_on(domain: &str) -> NormalizedCookie {
        normalize_cookie(&CookieRecord::new("c", domain, "/"), "https://example.com/")
    }

    #[test]
    fn test_exact_match() {
        assert_eq!(
            generate_technology(&cookie_on(".doubleclick.net")).as_str(),
            "Google DoubleClick"
        );
    }

    #[test]
    fn test_subdomain_match() {
        assert_eq!(
            generate_technology(&cookie_on("stats.g.doubleclick.net")).as_str(),
            "Google DoubleClick"
        );
    }

    #[test]
    fn test_longest_suffix_wins() {
        assert_eq!(
            generate_technology(&cookie_on("px.ads.linkedin.com")).as_str(),
            "LinkedIn Ads"
        );
        assert_eq!(
            generate_technology(&cookie_on("www.linkedin.com")).as_str(),
            "LinkedIn"
        );
    }

    #[test]
    fn test_unknown() {
        let label = generate_technology(&cookie_on("example.com"));
        assert!(label.is_unknown());
        assert_eq!(label.to_string(), "Unknown");
        assert!(generate_technology(&cookie_on("")).is_unknown());
    }

    #[test]
    fn test_public_suffix_entry_never_matches() {
        let table = VendorTable::new([("com", "Everything"), ("localhost", "Dev")]);
        assert_eq!(table.lookup("example.com"), None);
        assert_eq!(table.lookup("localhost"), Some("Dev"));
        assert_eq!(table.lookup("127.0.0.1"), None);
    }

    #[test]
    fn test_custom_table_from_json() {
        let table =
            VendorTable::from_json(r#"{".Tracker.Example": "Example Tracker"}"#).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("cdn.tracker.example"), Some("Example Tracker"));
        assert!(VendorTable::from_json("[]").is_err());
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(VendorTable::builtin(), VendorTable::builtin()));
        assert!(!VendorTable::builtin().is_empty());
    }
}
