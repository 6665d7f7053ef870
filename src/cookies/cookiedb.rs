//! Cookie name lookup against an Open Cookie Database style dataset.
//!
//! The dataset maps platform names to lists of known cookies:
//!
//! ```json
//! {
//!   "Google Analytics": [
//!     { "name": "_ga", "category": "Analytics", "wildcardMatch": "0", ... }
//!   ]
//! }
//! ```
//!
//! Entries flagged as wildcard match any cookie whose name starts with the
//! entry name (e.g. `_ga_` matches `_ga_XYZ123`).

use crate::base::error::{CookieLensError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Category reported when a cookie is not in the database.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CookieDefinition {
    pub platform: String,
    pub category: String,
    pub name: String,
    pub domain: String,
    pub description: String,
    pub retention: String,
    pub data_controller: String,
    pub gdpr_url: String,
    #[serde(deserialize_with = "flag_from_any")]
    pub wildcard_match: bool,
}

/// Accepts `"1"`/`"0"`, `1`/`0` and booleans.
fn flag_from_any<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(n)) => n != 0,
        Some(Flag::Text(s)) => matches!(s.trim(), "1" | "true" | "TRUE" | "True"),
        None => false,
    })
}

/// The fields of a definition that a report shows for a cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieAnalytics {
    pub platform: String,
    pub category: String,
    pub description: String,
    pub retention: String,
    pub data_controller: String,
    pub gdpr_url: String,
}

impl Default for CookieAnalytics {
    fn default() -> Self {
        Self {
            platform: String::new(),
            category: UNCATEGORIZED.to_string(),
            description: String::new(),
            retention: String::new(),
            data_controller: String::new(),
            gdpr_url: String::new(),
        }
    }
}

impl From<&CookieDefinition> for CookieAnalytics {
    fn from(def: &CookieDefinition) -> Self {
        let category = if def.category.trim().is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            def.category.clone()
        };
        Self {
            platform: def.platform.clone(),
            category,
            description: def.description.clone(),
            retention: def.retention.clone(),
            data_controller: def.data_controller.clone(),
            gdpr_url: def.gdpr_url.clone(),
        }
    }
}

/// Indexed, read-only cookie database.
#[derive(Debug, Clone, Default)]
pub struct CookieDatabase {
    exact: HashMap<String, CookieDefinition>,
    /// Sorted by descending name length so the first hit is the longest.
    wildcards: Vec<CookieDefinition>,
}

impl CookieDatabase {
    pub fn new(definitions: impl IntoIterator<Item = CookieDefinition>) -> Self {
        let mut exact = HashMap::new();
        let mut wildcards = Vec::new();

        for def in definitions {
            if def.name.is_empty() {
                continue;
            }
            if def.wildcard_match {
                wildcards.push(def);
            } else {
                // First definition for a name wins.
                exact.entry(def.name.clone()).or_insert(def);
            }
        }

        wildcards.sort_by(|a, b| b.name.len().cmp(&a.name.len()));

        Self { exact, wildcards }
    }

    /// Load from JSON text: an object of platform name to definitions.
    pub fn from_json(json: &str) -> Result<Self> {
        let grouped: BTreeMap<String, Vec<CookieDefinition>> = serde_json::from_str(json)?;

        let definitions = grouped.into_iter().flat_map(|(platform, defs)| {
            defs.into_iter().map(move |mut def| {
                if def.platform.is_empty() {
                    def.platform = platform.clone();
                }
                def
            })
        });

        let db = Self::new(definitions);
        tracing::debug!(
            exact = db.exact.len(),
            wildcard = db.wildcards.len(),
            "loaded cookie database"
        );
        Ok(db)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CookieLensError::io(path.display().to_string(), &e))?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.wildcards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the definition for a cookie name: exact match first, then the
    /// longest wildcard prefix.
    pub fn lookup(&self, cookie_name: &str) -> Option<&CookieDefinition> {
        if cookie_name.is_empty() {
            return None;
        }

        self.exact.get(cookie_name).or_else(|| {
            self.wildcards
                .iter()
                .find(|def| cookie_name.starts_with(def.name.as_str()))
        })
    }

    /// Report fields for a cookie name, `Uncategorized` on a miss.
    pub fn analytics_for(&self, cookie_name: &str) -> CookieAnalytics {
        self.lookup(cookie_name)
            .map(CookieAnalytics::from)
            .unwrap_or_default()
    }
}
