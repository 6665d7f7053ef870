//! Raw cookie records as delivered by a browser's cookie inspection API.

use crate::base::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use url::Url;

/// A cookie exactly as the browser reported it.
///
/// Every field is optional on the wire; `null` and missing values both fall
/// back to the type default. Field names follow the browser API (camelCase).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CookieRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    /// Seconds since the Unix epoch, fractional allowed.
    pub expiration_date: Option<f64>,
    pub http_only: Option<bool>,
    pub secure: Option<bool>,
    /// "strict", "lax", "no_restriction"/"none" or "unspecified".
    pub same_site: Option<String>,
    pub host_only: Option<bool>,
    pub session: Option<bool>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl CookieRecord {
    pub fn new(name: impl Into<String>, domain: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Parse a `Set-Cookie` header line observed on a response for `url`.
    ///
    /// Returns None if the line is not a cookie.
    pub fn from_set_cookie(line: &str, url: &Url) -> Option<Self> {
        Self::from_set_cookie_at(line, url, OffsetDateTime::now_utc())
    }

    /// Same as [`from_set_cookie`](Self::from_set_cookie), resolving
    /// `Max-Age` against `now`.
    pub fn from_set_cookie_at(line: &str, url: &Url, now: OffsetDateTime) -> Option<Self> {
        let parsed = match cookie::Cookie::parse(line) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(line = %line, error = %e, "failed to parse Set-Cookie line");
                return None;
            }
        };

        let (domain, host_only) = match parsed.domain() {
            Some(d) if !d.trim_start_matches('.').is_empty() => {
                (format!(".{}", d.trim_start_matches('.').to_lowercase()), false)
            }
            _ => (url.host_str().unwrap_or("").to_lowercase(), true),
        };

        // Max-Age wins over Expires. An unrepresentable Max-Age leaves a
        // session cookie.
        let expires_at = match parsed.max_age() {
            Some(max_age) => {
                let at = now.checked_add(max_age);
                if at.is_none() {
                    tracing::debug!(
                        name = %parsed.name(),
                        max_age = max_age.whole_seconds(),
                        "Max-Age out of range, treating as session"
                    );
                }
                at
            }
            None => parsed.expires().and_then(|e| e.datetime()),
        };

        let same_site = match parsed.same_site() {
            Some(cookie::SameSite::Strict) => "strict",
            Some(cookie::SameSite::Lax) => "lax",
            Some(cookie::SameSite::None) => "no_restriction",
            None => "unspecified",
        };

        Some(Self {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain,
            path: parsed.path().unwrap_or("/").to_string(),
            expiration_date: expires_at.map(|t| t.unix_timestamp() as f64),
            http_only: Some(parsed.http_only().unwrap_or(false)),
            secure: Some(parsed.secure().unwrap_or(false)),
            same_site: Some(same_site.to_string()),
            host_only: Some(host_only),
            session: Some(expires_at.is_none()),
        })
    }
}

/// Decode a JSON array of browser cookie objects.
pub fn parse_cookie_records(json: &str) -> Result<Vec<CookieRecord>> {
    Ok(serde_json::from_str(json)?)
}
