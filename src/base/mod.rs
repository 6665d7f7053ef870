//! Base types and error handling.
//!
//! - [`CookieLensError`](error::CookieLensError): errors from the fallible edges
//! - [`delay`](delay::delay): cooperative suspension for polling loops

pub mod delay;
pub mod error;

#[cfg(test)]
mod tests;
