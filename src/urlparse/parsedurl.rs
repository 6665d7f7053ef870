use std::collections::BTreeMap;
use url::Url;

/// Outcome of [`parse_url`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseStatus {
    Parsed,
    /// Input was empty or whitespace only.
    #[default]
    Empty,
    /// Input was rejected by the URL parser.
    Malformed,
}

/// A URL split into the parts cookie analysis cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedUrl {
    pub scheme: String,
    /// Lower-cased host, empty for URLs without one.
    pub host: String,
    /// Explicit non-default port.
    pub port: Option<u16>,
    pub path: String,
    /// Percent-decoded query pairs. Last value wins on duplicate keys.
    pub query: BTreeMap<String, String>,
    pub status: ParseStatus,
}

impl ParsedUrl {
    fn with_status(status: ParseStatus) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == ParseStatus::Parsed
    }

    /// Rebuild a URL equivalent to the parsed one.
    ///
    /// Returns an empty string for anything that did not parse.
    pub fn to_url_string(&self) -> String {
        if !self.is_valid() {
            return String::new();
        }

        let mut out = format!("{}:", self.scheme);
        if !self.host.is_empty() {
            out.push_str("//");
            out.push_str(&self.host);
            if let Some(port) = self.port {
                out.push_str(&format!(":{}", port));
            }
        }
        out.push_str(&self.path);

        if !self.query.is_empty() {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            out.push('?');
            out.push_str(&query);
        }

        out
    }
}

/// Parse a raw URL string. Never panics and never returns an error.
///
/// URLs with an opaque path and no host are `Malformed`. This catches a
/// scheme-less `host:port` such as `localhost:3000`, which would otherwise
/// read as scheme `localhost` with path `3000`. It also rejects `mailto:`
/// and `data:` URLs, which have no host a cookie could belong to.
pub fn parse_url(raw: &str) -> ParsedUrl {
    let raw = raw.trim();
    if raw.is_empty() {
        return ParsedUrl::with_status(ParseStatus::Empty);
    }

    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(url = %raw, error = %e, "failed to parse URL");
            return ParsedUrl::with_status(ParseStatus::Malformed);
        }
    };

    if url.cannot_be_a_base() && url.host_str().is_none() {
        tracing::debug!(url = %raw, scheme = %url.scheme(), "URL has no host");
        return ParsedUrl::with_status(ParseStatus::Malformed);
    }

    let query = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    ParsedUrl {
        scheme: url.scheme().to_string(),
        host: url.host_str().unwrap_or("").to_lowercase(),
        port: url.port(),
        path: url.path().to_string(),
        query,
        status: ParseStatus::Parsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_case_host() {
        let parsed = parse_url("https://sub.Example.COM/path?x=1");
        assert_eq!(parsed.scheme, "https");
        assert_eq!(parsed.host, "sub.example.com");
        assert_eq!(parsed.path, "/path");
        assert_eq!(parsed.query.get("x").map(String::as_str), Some("1"));
        assert_eq!(parsed.query.len(), 1);
        assert!(parsed.is_valid());
    }

    #[test]
    fn test_parse_empty() {
        let parsed = parse_url("   ");
        assert_eq!(parsed.status, ParseStatus::Empty);
        assert!(parsed.host.is_empty());
        assert!(!parsed.is_valid());
    }

    #[test]
    fn test_parse_malformed() {
        let parsed = parse_url("http://exa mple.com");
        assert_eq!(parsed.status, ParseStatus::Malformed);
        assert!(parsed.scheme.is_empty());
        assert!(parsed.path.is_empty());
        assert!(parsed.query.is_empty());

        assert_eq!(parse_url("not a url").status, ParseStatus::Malformed);
    }

    #[test]
    fn test_host_port_without_scheme_is_malformed() {
        let parsed = parse_url("localhost:3000");
        assert_eq!(parsed.status, ParseStatus::Malformed);
        assert!(parsed.scheme.is_empty());
        assert!(parsed.path.is_empty());

        assert_eq!(parse_url("mailto:a@example.com").status, ParseStatus::Malformed);
        assert!(parse_url("http://localhost:3000").is_valid());
        assert!(parse_url("file:///tmp/cookies.json").is_valid());
    }

    #[test]
    fn test_parse_port_and_duplicate_keys() {
        let parsed = parse_url("http://localhost:8080/a/b?k=1&k=2&q=hello%20world");
        assert_eq!(parsed.host, "localhost");
        assert_eq!(parsed.port, Some(8080));
        assert_eq!(parsed.query.get("k").map(String::as_str), Some("2"));
        assert_eq!(
            parsed.query.get("q").map(String::as_str),
            Some("hello world")
        );
    }

    #[test]
    fn test_default_port_dropped() {
        let parsed = parse_url("https://example.com:443/");
        assert_eq!(parsed.port, None);
    }

    #[test]
    fn test_reconstruct_equivalent() {
        let original = "https://sub.example.com:8443/path/to?a=1&b=two%20words";
        let parsed = parse_url(original);
        let rebuilt = parse_url(&parsed.to_url_string());
        assert_eq!(parsed, rebuilt);
    }

    #[test]
    fn test_reconstruct_invalid_is_empty() {
        assert_eq!(parse_url("::::").to_url_string(), "");
    }
}
