//! Labelling, grouping and CSV export of normalized cookies.
//!
//! - [`technology`]: vendor lookup by domain ([`generate_technology`])
//! - [`prefix`]: grouping keys ([`generate_prefix`])
//! - [`csv`]: CSV export and re-import ([`get_csv_by_object`])
//!
//! [`build_report`] combines all three into one row per cookie.
//!
//! # Example
//!
//! ```rust
//! use cookielens::cookies::{normalize_cookie, CookieRecord};
//! use cookielens::report::{build_report, get_csv_by_object, VendorTable};
//!
//! let cookies = vec![normalize_cookie(
//!     &CookieRecord::new("IDE", ".doubleclick.net", "/"),
//!     "https://news.example.com/",
//! )];
//! let rows = build_report(&cookies, VendorTable::builtin(), None);
//! let csv = get_csv_by_object(&rows);
//! assert!(csv.contains("Google DoubleClick"));
//! ```

pub mod csv;
pub mod prefix;
pub mod technology;

pub use self::csv::{
    get_csv_by_object, get_csv_by_object_with, parse_csv, read_cookies_csv, CsvOptions,
    CsvRecord, LineEnding,
};
pub use prefix::generate_prefix;
pub use technology::{generate_technology, TechnologyLabel, VendorTable};

use crate::cookies::cookiedb::{CookieDatabase, UNCATEGORIZED};
use crate::cookies::normalizedcookie::NormalizedCookie;

/// A normalized cookie with its derived labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub cookie: NormalizedCookie,
    pub technology: TechnologyLabel,
    pub prefix: String,
    pub category: String,
}

/// Label every cookie. Without a cookie database the category is
/// `Uncategorized`.
pub fn build_report(
    cookies: &[NormalizedCookie],
    vendors: &VendorTable,
    cookie_db: Option<&CookieDatabase>,
) -> Vec<ReportRow> {
    cookies
        .iter()
        .map(|cookie| ReportRow {
            technology: vendors.technology_for(cookie),
            prefix: generate_prefix(cookie),
            category: cookie_db
                .map(|db| db.analytics_for(&cookie.name).category)
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
            cookie: cookie.clone(),
        })
        .collect()
}

const REPORT_HEADERS: [&str; 12] = [
    "name",
    "value",
    "domain",
    "path",
    "firstParty",
    "expiry",
    "httpOnly",
    "secure",
    "sameSite",
    "technology",
    "prefix",
    "category",
];

impl CsvRecord for ReportRow {
    fn headers() -> &'static [&'static str] {
        &REPORT_HEADERS
    }

    fn fields(&self) -> Vec<String> {
        let mut fields = self.cookie.fields();
        fields.push(self.technology.to_string());
        fields.push(self.prefix.clone());
        fields.push(self.category.clone());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::{normalize_cookie, CookieRecord};

    #[test]
    fn test_build_report_labels() {
        let db = CookieDatabase::from_json(
            r#"{"Google Analytics": [{"name": "_ga", "category": "Analytics"}]}"#,
        )
        .unwrap();
        let cookies = vec![
            normalize_cookie(
                &CookieRecord::new("_ga_XY", ".google-analytics.com", "/"),
                "https://example.com",
            ),
            normalize_cookie(
                &CookieRecord::new("_ga", ".example.com", "/"),
                "https://example.com",
            ),
        ];

        let rows = build_report(&cookies, VendorTable::builtin(), Some(&db));
        assert_eq!(rows[0].technology.as_str(), "Google Analytics");
        assert_eq!(rows[0].prefix, "/:_ga");
        assert_eq!(rows[0].category, UNCATEGORIZED);
        assert!(rows[1].technology.is_unknown());
        assert_eq!(rows[1].category, "Analytics");
    }

    #[test]
    fn test_report_csv_columns() {
        let rows = build_report(&[], VendorTable::builtin(), None);
        assert_eq!(
            get_csv_by_object(&rows),
            "name,value,domain,path,firstParty,expiry,httpOnly,secure,sameSite,technology,prefix,category\n"
        );
    }
}
