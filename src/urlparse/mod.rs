//! Lenient URL decomposition.
//!
//! Page and request URLs come straight from browser context and are not
//! trusted to be well formed. [`parse_url`] never fails: a bad URL yields a
//! [`ParsedUrl`] with empty fields and a [`ParseStatus`] saying why.

pub mod parsedurl;

pub use parsedurl::{parse_url, ParseStatus, ParsedUrl};
