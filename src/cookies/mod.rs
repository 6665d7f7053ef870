//! Cookie normalization and classification.
//!
//! Raw cookies arrive either as browser-API objects ([`CookieRecord`]
//! decoded from JSON) or as `Set-Cookie` lines. Both are turned into a
//! [`NormalizedCookie`] for a given page:
//!
//! | Step | Item | Responsibility |
//! |------|------|----------------|
//! | Host reduction | [`psl::host_of`] | Strip scheme, port, path, dots |
//! | eTLD+1 | [`psl::registrable_domain`] | Public Suffix List lookup |
//! | Classification | [`is_first_party`] | Same registrable domain as page |
//! | Normalization | [`normalize_cookie`] | Defaults, lower-casing, expiry |
//! | Enrichment | [`cookiedb::CookieDatabase`] | Category by cookie name |
//! | Aggregation | [`pagevisit::PageVisitCookies`] | Merge across pages |
//!
//! # Example
//!
//! ```rust
//! use cookielens::cookies::{normalize_cookie, CookieRecord};
//!
//! let raw = CookieRecord::new("_ga", ".example.com", "/");
//! let cookie = normalize_cookie(&raw, "https://example.com/home");
//! assert!(cookie.is_first_party);
//! assert_eq!(cookie.domain, "example.com");
//! ```

pub mod cookiedb;
pub mod firstparty;
pub mod normalizedcookie;
pub mod pagevisit;
pub mod psl;
pub mod rawcookie;

pub use firstparty::is_first_party;
pub use normalizedcookie::{normalize_cookie, CookieFlags, NormalizedCookie, SameSite};
pub use rawcookie::{parse_cookie_records, CookieRecord};
