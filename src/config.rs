//! Analysis configuration.
//!
//! Everything here is optional; [`AnalysisConfig::default`] uses the
//! built-in vendor table, no cookie database, and LF-terminated CSV with a
//! header row.
//!
//! ```json
//! {
//!   "csv": { "line_ending": "crlf", "include_header": true },
//!   "vendor_table": "/etc/cookielens/vendors.json",
//!   "cookie_database": "/etc/cookielens/open-cookie-database.json"
//! }
//! ```

use crate::base::error::{CookieLensError, Result};
use crate::cookies::cookiedb::CookieDatabase;
use crate::report::csv::CsvOptions;
use crate::report::technology::VendorTable;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub csv: CsvOptions,
    /// JSON file of `{ "domain": "Vendor" }`, replacing the built-in table.
    pub vendor_table: Option<PathBuf>,
    /// Open Cookie Database JSON file.
    pub cookie_database: Option<PathBuf>,
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_csv(mut self, csv: CsvOptions) -> Self {
        self.csv = csv;
        self
    }

    pub fn with_vendor_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.vendor_table = Some(path.into());
        self
    }

    pub fn with_cookie_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_database = Some(path.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CookieLensError::io(path.display().to_string(), &e))?;
        Self::from_json(&json)
    }

    /// The configured vendor table, or the built-in one.
    pub fn load_vendor_table(&self) -> Result<Cow<'static, VendorTable>> {
        match &self.vendor_table {
            Some(path) => Ok(Cow::Owned(VendorTable::from_path(path)?)),
            None => Ok(Cow::Borrowed(VendorTable::builtin())),
        }
    }

    pub fn load_cookie_database(&self) -> Result<Option<CookieDatabase>> {
        self.cookie_database
            .as_deref()
            .map(CookieDatabase::from_path)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::csv::LineEnding;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::from_json("{}").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.csv.line_ending, LineEnding::Lf);
        assert!(config.csv.include_header);
        assert!(config.load_cookie_database().unwrap().is_none());
        assert!(matches!(config.load_vendor_table().unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_parse_csv_section() {
        let config = AnalysisConfig::from_json(r#"{"csv": {"line_ending": "crlf"}}"#).unwrap();
        assert_eq!(config.csv.line_ending, LineEnding::CrLf);
        assert!(config.csv.include_header);
    }

    #[test]
    fn test_load_files() {
        let dir = tempfile::tempdir().unwrap();
        let vendors = dir.path().join("vendors.json");
        let db = dir.path().join("ocd.json");
        std::fs::write(&vendors, r#"{"tracker.example": "Tracker"}"#).unwrap();
        std::fs::write(&db, r#"{"Tracker": [{"name": "tid", "category": "Marketing"}]}"#)
            .unwrap();

        let config = AnalysisConfig::new()
            .with_vendor_table(&vendors)
            .with_cookie_database(&db);

        let table = config.load_vendor_table().unwrap();
        assert_eq!(table.lookup("a.tracker.example"), Some("Tracker"));
        let db = config.load_cookie_database().unwrap().unwrap();
        assert_eq!(db.analytics_for("tid").category, "Marketing");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let config = AnalysisConfig::new().with_vendor_table("/nonexistent/vendors.json");
        assert!(matches!(
            config.load_vendor_table(),
            Err(CookieLensError::Io { .. })
        ));
    }
}
