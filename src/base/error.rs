use thiserror::Error;

/// Errors raised at the fallible edges of the crate: loading configuration
/// data and reading CSV text back in.
///
/// Malformed cookies and URLs are never errors; they are recovered with
/// defaults by the normalizer and parser.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CookieLensError {
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },
    #[error("Unterminated quoted CSV field starting on line {line}")]
    CsvUnterminatedQuote { line: usize },
    #[error("CSV row {row} has {found} columns, expected {expected}")]
    CsvColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid value {value:?} in CSV column {column}")]
    CsvInvalidField { column: &'static str, value: String },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CookieLensError>;

impl CookieLensError {
    /// Stable negative code, grouped by area (100s: data files, 200s: CSV).
    pub fn as_i32(&self) -> i32 {
        match self {
            CookieLensError::InvalidJson { .. } => -100,
            CookieLensError::Io { .. } => -101,
            CookieLensError::CsvUnterminatedQuote { .. } => -200,
            CookieLensError::CsvColumnCount { .. } => -201,
            CookieLensError::CsvInvalidField { .. } => -202,
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        CookieLensError::InvalidJson {
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        CookieLensError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn csv_invalid_field(column: &'static str, value: impl Into<String>) -> Self {
        CookieLensError::CsvInvalidField {
            column,
            value: value.into(),
        }
    }

    /// True for errors produced while reading CSV text.
    pub fn is_csv_error(&self) -> bool {
        matches!(
            self,
            CookieLensError::CsvUnterminatedQuote { .. }
                | CookieLensError::CsvColumnCount { .. }
                | CookieLensError::CsvInvalidField { .. }
        )
    }
}

impl From<serde_json::Error> for CookieLensError {
    fn from(err: serde_json::Error) -> Self {
        CookieLensError::invalid_json(err.to_string())
    }
}
