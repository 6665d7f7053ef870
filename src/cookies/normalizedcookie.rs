use crate::cookies::firstparty::is_first_party;
use crate::cookies::rawcookie::CookieRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// SameSite policy after normalization.
///
/// Browsers treat an unspecified policy as Lax, so there is no
/// "unspecified" variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    /// Map any browser spelling to a policy. Unknown values become Lax.
    pub fn from_browser(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return SameSite::Lax;
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => SameSite::Strict,
            "lax" => SameSite::Lax,
            "none" | "no_restriction" => SameSite::None,
            "" | "unspecified" => SameSite::Lax,
            other => {
                tracing::debug!(same_site = %other, "unknown SameSite value, using Lax");
                SameSite::Lax
            }
        }
    }

    /// Strict parse of the exported spelling (`Strict`, `Lax`, `None`).
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Strict" => Some(SameSite::Strict),
            "Lax" => Some(SameSite::Lax),
            "None" => Some(SameSite::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CookieFlags {
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
}

/// Canonical cookie shape used by classification and export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCookie {
    pub name: String,
    pub value: String,
    /// Lower-cased, without leading dots.
    pub domain: String,
    pub path: String,
    /// Derived from the page URL, never taken from input.
    pub is_first_party: bool,
    /// None for session cookies.
    pub expiry: Option<OffsetDateTime>,
    pub flags: CookieFlags,
}

impl NormalizedCookie {
    pub fn is_session(&self) -> bool {
        self.expiry.is_none()
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        self.expiry.is_some_and(|expiry| expiry < current_time)
    }

    /// Identity used to merge sightings of the same cookie.
    pub fn key(&self) -> (String, String, String) {
        (self.name.clone(), self.domain.clone(), self.path.clone())
    }
}

/// Lower-case a cookie domain and strip leading dots and a trailing dot.
pub fn normalize_domain(domain: &str) -> String {
    domain
        .trim()
        .trim_start_matches('.')
        .trim_end_matches('.')
        .to_lowercase()
}

/// Convert browser expiry seconds to a timestamp. Zero, negative and
/// non-finite values mean a session cookie.
fn expiry_from_seconds(seconds: f64) -> Option<OffsetDateTime> {
    if !seconds.is_finite() || seconds <= 0.0 {
        tracing::debug!(expiration_date = seconds, "treating expiry as session");
        return None;
    }

    let nanos = (seconds * 1_000_000_000.0) as i128;
    match OffsetDateTime::from_unix_timestamp_nanos(nanos) {
        Ok(t) => Some(t),
        Err(e) => {
            tracing::debug!(expiration_date = seconds, error = %e, "expiry out of range");
            None
        }
    }
}

/// Map a raw browser cookie to its canonical shape for the given page.
///
/// Pure: the same record and page URL always give the same result.
pub fn normalize_cookie(raw: &CookieRecord, page_url: &str) -> NormalizedCookie {
    let domain = normalize_domain(&raw.domain);

    let path = if raw.path.trim().is_empty() {
        "/".to_string()
    } else {
        raw.path.trim().to_string()
    };

    let expiry = if raw.session == Some(true) {
        None
    } else {
        raw.expiration_date.and_then(expiry_from_seconds)
    };

    NormalizedCookie {
        name: raw.name.clone(),
        value: raw.value.clone(),
        is_first_party: is_first_party(&domain, page_url),
        domain,
        path,
        expiry,
        flags: CookieFlags {
            http_only: raw.http_only.unwrap_or(false),
            secure: raw.secure.unwrap_or(false),
            same_site: SameSite::from_browser(raw.same_site.as_deref()),
        },
    }
}
