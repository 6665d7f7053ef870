//! # cookielens
//!
//! Cookie normalization and classification for browser privacy analysis.
//!
//! `cookielens` takes the raw cookies a browser reports for a page and turns
//! them into canonical records: domains reduced for comparison, first-party
//! status derived from the Public Suffix List, SameSite and expiry defaults
//! applied. The records can be labelled by vendor, grouped, and exported as
//! CSV.
//!
//! ## Quick Start
//!
//! ```rust
//! use cookielens::cookies::{normalize_cookie, parse_cookie_records};
//! use cookielens::report::{generate_technology, get_csv_by_object};
//!
//! let raw = parse_cookie_records(
//!     r#"[{"name": "IDE", "domain": ".doubleclick.net", "path": "/", "secure": true}]"#,
//! )?;
//! let cookies: Vec<_> = raw
//!     .iter()
//!     .map(|c| normalize_cookie(c, "https://news.example.com/"))
//!     .collect();
//!
//! assert!(!cookies[0].is_first_party);
//! assert_eq!(generate_technology(&cookies[0]).as_str(), "Google DoubleClick");
//! println!("{}", get_csv_by_object(&cookies));
//! # Ok::<(), cookielens::base::error::CookieLensError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error type and the `delay` helper
//! - [`config`] - Analysis configuration
//! - [`cookies`] - Raw cookie input, PSL, first-party classification, normalization
//! - [`report`] - Vendor labels, grouping prefixes, CSV export
//! - [`urlparse`] - Lenient URL decomposition
//!
//! ## Errors
//!
//! Malformed cookies and URLs never produce errors; they are recovered with
//! documented defaults. Only loading data files and reading CSV back in can
//! fail, with [`CookieLensError`](base::error::CookieLensError).

pub mod base;
pub mod config;
pub mod cookies;
pub mod report;
pub mod urlparse;
