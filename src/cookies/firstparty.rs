//! First-party classification.
//!
//! A cookie is first party when its domain shares a registrable domain
//! (eTLD+1) with the page being inspected.

use crate::cookies::psl::{host_of, registrable_domain};

/// Decide whether `cookie_domain` is first party relative to `page_domain`.
///
/// Both arguments may be bare hosts, cookie domains with a leading dot, or
/// full URLs. When the page host has no registrable domain (IP address,
/// `localhost`, a bare public suffix) the stripped hosts must be equal.
pub fn is_first_party(cookie_domain: &str, page_domain: &str) -> bool {
    let cookie_host = host_of(cookie_domain);
    let page_host = host_of(page_domain);

    if cookie_host.is_empty() || page_host.is_empty() {
        return false;
    }

    match registrable_domain(&page_host) {
        Some(page_site) => registrable_domain(&cookie_host).is_some_and(|site| site == page_site),
        None => cookie_host == page_host,
    }
}
