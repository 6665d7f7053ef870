//! CSV export and re-import.
//!
//! Output is UTF-8, comma-delimited, with RFC 4180 double-quote escaping.
//! Lines end with LF unless [`LineEnding::CrLf`] is selected, and every row
//! including the last is terminated. The reader accepts either ending.

use crate::base::error::{CookieLensError, Result};
use crate::cookies::normalizedcookie::{CookieFlags, NormalizedCookie, SameSite};
use crate::cookies::pagevisit::AggregatedCookie;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// A type that exports as one CSV row with a fixed column order.
pub trait CsvRecord {
    fn headers() -> &'static [&'static str];
    fn fields(&self) -> Vec<String>;
}

/// A type that can be rebuilt from a row it exported.
pub trait FromCsvRecord: CsvRecord + Sized {
    fn from_fields(fields: &[String]) -> Result<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub line_ending: LineEnding,
    pub include_header: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Lf,
            include_header: true,
        }
    }
}

impl CsvOptions {
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }
}

/// Quote a field if it contains a delimiter, quote, line break, or
/// leading/trailing whitespace.
pub fn escape_field(field: &str) -> String {
    let needs_quotes = field.contains([',', '"', '\r', '\n'])
        || field.starts_with(char::is_whitespace)
        || field.ends_with(char::is_whitespace);

    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row<S: AsRef<str>>(out: &mut String, fields: &[S], line_ending: LineEnding) {
    let line = fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push_str(line_ending.as_str());
}

/// Serialize records to CSV with default options. Empty input gives the
/// header row only.
pub fn get_csv_by_object<T: CsvRecord>(records: &[T]) -> String {
    get_csv_by_object_with(records, &CsvOptions::default())
}

pub fn get_csv_by_object_with<T: CsvRecord>(records: &[T], options: &CsvOptions) -> String {
    let mut out = String::new();

    if options.include_header {
        push_row(&mut out, T::headers(), options.line_ending);
    }
    for record in records {
        push_row(&mut out, record.fields().as_slice(), options.line_ending);
    }

    out
}

fn finish_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>, field: &mut String, quoted: bool) {
    row.push(std::mem::take(field));
    if row.len() == 1 && row[0].is_empty() && !quoted {
        row.clear();
    } else {
        rows.push(std::mem::take(row));
    }
}

/// Split CSV text into rows of unescaped fields.
///
/// Blank lines are skipped. A quote that is never closed is an error.
pub fn parse_csv(text: &str) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quoted_field = false;
    let mut line = 1;
    let mut quote_line = 1;

    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' if field.is_empty() && !quoted_field => {
                in_quotes = true;
                quoted_field = true;
                quote_line = line;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                quoted_field = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                finish_row(&mut rows, &mut row, &mut field, quoted_field);
                quoted_field = false;
                line += 1;
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(CookieLensError::CsvUnterminatedQuote { line: quote_line });
    }
    if !row.is_empty() || !field.is_empty() || quoted_field {
        finish_row(&mut rows, &mut row, &mut field, quoted_field);
    }

    Ok(rows)
}

/// Rebuild records from CSV text. A first row equal to the header is
/// skipped.
pub fn read_csv<T: FromCsvRecord>(text: &str) -> Result<Vec<T>> {
    let rows = parse_csv(text)?;
    let headers = T::headers();

    let has_header = rows.first().is_some_and(|first| {
        first.len() == headers.len() && first.iter().zip(headers).all(|(a, b)| a.as_str() == *b)
    });
    let skip = usize::from(has_header);

    rows.iter()
        .enumerate()
        .skip(skip)
        .map(|(idx, row)| {
            if row.len() != headers.len() {
                return Err(CookieLensError::CsvColumnCount {
                    row: idx + 1,
                    expected: headers.len(),
                    found: row.len(),
                });
            }
            T::from_fields(row)
        })
        .collect()
}

/// Rebuild normalized cookies from exported CSV text.
pub fn read_cookies_csv(text: &str) -> Result<Vec<NormalizedCookie>> {
    read_csv(text)
}

const SESSION: &str = "Session";

fn format_expiry(expiry: Option<OffsetDateTime>) -> String {
    match expiry {
        None => SESSION.to_string(),
        Some(t) => t
            .format(&Rfc3339)
            .unwrap_or_else(|_| t.unix_timestamp().to_string()),
    }
}

fn parse_expiry(value: &str) -> Result<Option<OffsetDateTime>> {
    if value == SESSION {
        return Ok(None);
    }
    if let Ok(t) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(Some(t));
    }
    value
        .parse::<i64>()
        .ok()
        .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
        .map(Some)
        .ok_or_else(|| CookieLensError::csv_invalid_field("expiry", value))
}

fn parse_bool(column: &'static str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CookieLensError::csv_invalid_field(column, value)),
    }
}

const COOKIE_HEADERS: [&str; 9] = [
    "name",
    "value",
    "domain",
    "path",
    "firstParty",
    "expiry",
    "httpOnly",
    "secure",
    "sameSite",
];

impl CsvRecord for NormalizedCookie {
    fn headers() -> &'static [&'static str] {
        &COOKIE_HEADERS
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.value.clone(),
            self.domain.clone(),
            self.path.clone(),
            self.is_first_party.to_string(),
            format_expiry(self.expiry),
            self.flags.http_only.to_string(),
            self.flags.secure.to_string(),
            self.flags.same_site.to_string(),
        ]
    }
}

impl FromCsvRecord for NormalizedCookie {
    fn from_fields(fields: &[String]) -> Result<Self> {
        let [name, value, domain, path, first_party, expiry, http_only, secure, same_site] =
            fields
        else {
            return Err(CookieLensError::CsvColumnCount {
                row: 0,
                expected: COOKIE_HEADERS.len(),
                found: fields.len(),
            });
        };

        Ok(Self {
            name: name.clone(),
            value: value.clone(),
            domain: domain.clone(),
            path: path.clone(),
            is_first_party: parse_bool("firstParty", first_party)?,
            expiry: parse_expiry(expiry)?,
            flags: CookieFlags {
                http_only: parse_bool("httpOnly", http_only)?,
                secure: parse_bool("secure", secure)?,
                same_site: SameSite::from_label(same_site).ok_or_else(|| {
                    CookieLensError::csv_invalid_field("sameSite", same_site.as_str())
                })?,
            },
        })
    }
}

impl NormalizedCookie {
    /// Rebuild a cookie from one exported CSV row.
    pub fn from_csv_row(fields: &[String]) -> Result<Self> {
        Self::from_fields(fields)
    }
}

const PAGE_SEPARATOR: &str = "|";

/// Escape `%` and the page separator so a URL containing `|` survives the
/// joined `pages` column.
fn encode_page(page: &str) -> String {
    page.replace('%', "%25").replace('|', "%7C")
}

fn decode_page(page: &str) -> String {
    let mut out = String::with_capacity(page.len());
    let mut rest = page;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match tail.get(..3) {
            Some("%25") => out.push('%'),
            Some(code) if code.eq_ignore_ascii_case("%7C") => out.push('|'),
            _ => {
                out.push('%');
                rest = &tail[1..];
                continue;
            }
        }
        rest = &tail[3..];
    }
    out.push_str(rest);
    out
}

const AGGREGATED_HEADERS: [&str; 12] = [
    "name",
    "value",
    "domain",
    "path",
    "firstParty",
    "expiry",
    "httpOnly",
    "secure",
    "sameSite",
    "frequency",
    "firstSeenOn",
    "pages",
];

impl CsvRecord for AggregatedCookie {
    fn headers() -> &'static [&'static str] {
        &AGGREGATED_HEADERS
    }

    fn fields(&self) -> Vec<String> {
        let mut fields = self.cookie.fields();
        fields.push(self.frequency.to_string());
        fields.push(self.first_seen_on.clone());
        let pages: Vec<String> = self.pages.iter().map(|p| encode_page(p)).collect();
        fields.push(pages.join(PAGE_SEPARATOR));
        fields
    }
}

impl FromCsvRecord for AggregatedCookie {
    fn from_fields(fields: &[String]) -> Result<Self> {
        if fields.len() != AGGREGATED_HEADERS.len() {
            return Err(CookieLensError::CsvColumnCount {
                row: 0,
                expected: AGGREGATED_HEADERS.len(),
                found: fields.len(),
            });
        }

        let (cookie_fields, rest) = fields.split_at(COOKIE_HEADERS.len());
        let frequency = rest[0]
            .parse()
            .map_err(|_| CookieLensError::csv_invalid_field("frequency", rest[0].as_str()))?;
        let pages = if rest[2].is_empty() {
            Vec::new()
        } else {
            rest[2].split(PAGE_SEPARATOR).map(decode_page).collect()
        };

        Ok(Self {
            cookie: NormalizedCookie::from_fields(cookie_fields)?,
            frequency,
            first_seen_on: rest[1].clone(),
            pages,
        })
    }
}
