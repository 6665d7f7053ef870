//! Merging cookies observed across several page visits.
//!
//! The same cookie is usually seen on many pages of a site. Aggregation
//! keeps one record per `(name, domain, path)` along with every page it was
//! seen on.

use crate::cookies::normalizedcookie::{normalize_cookie, NormalizedCookie};
use crate::cookies::rawcookie::CookieRecord;
use std::collections::HashMap;

/// Cookies captured while visiting one page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageVisit {
    pub page_url: String,
    pub cookies: Vec<CookieRecord>,
}

impl PageVisit {
    pub fn new(page_url: impl Into<String>, cookies: Vec<CookieRecord>) -> Self {
        Self {
            page_url: page_url.into(),
            cookies,
        }
    }
}

/// One cookie with the pages it appeared on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedCookie {
    /// Normalized against the first page it was seen on.
    pub cookie: NormalizedCookie,
    pub first_seen_on: String,
    /// Distinct pages in first-seen order.
    pub pages: Vec<String>,
    /// Total sightings, including repeats on the same page.
    pub frequency: usize,
}

/// Builder accumulating visits in order.
#[derive(Debug, Default)]
pub struct PageVisitCookies {
    records: Vec<AggregatedCookie>,
    index: HashMap<(String, String, String), usize>,
}

impl PageVisitCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and merge the cookies seen on `page_url`.
    pub fn add_visit(&mut self, page_url: &str, cookies: &[CookieRecord]) {
        for raw in cookies {
            let cookie = normalize_cookie(raw, page_url);
            let key = cookie.key();

            match self.index.get(&key) {
                Some(&idx) => {
                    let record = &mut self.records[idx];
                    record.frequency += 1;
                    if !record.pages.iter().any(|p| p == page_url) {
                        record.pages.push(page_url.to_string());
                    }
                }
                None => {
                    self.index.insert(key, self.records.len());
                    self.records.push(AggregatedCookie {
                        cookie,
                        first_seen_on: page_url.to_string(),
                        pages: vec![page_url.to_string()],
                        frequency: 1,
                    });
                }
            }
        }

        tracing::debug!(
            page = %page_url,
            seen = cookies.len(),
            distinct = self.records.len(),
            "aggregated page visit"
        );
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AggregatedCookie] {
        &self.records
    }

    /// Aggregated cookies in first-seen order.
    pub fn into_records(self) -> Vec<AggregatedCookie> {
        self.records
    }
}

/// One-shot aggregation over a list of visits.
pub fn generate_page_visit_cookies(visits: &[PageVisit]) -> Vec<AggregatedCookie> {
    let mut builder = PageVisitCookies::new();
    for visit in visits {
        builder.add_visit(&visit.page_url, &visit.cookies);
    }
    builder.into_records()
}
