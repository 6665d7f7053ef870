use crate::cookies::normalizedcookie::NormalizedCookie;

const NAME_SEPARATORS: [char; 3] = ['_', '-', '.'];

/// Grouping key for report views: `"<segment>:<name-prefix>"`.
///
/// `segment` is `/` plus the first non-empty path segment (`/` alone for
/// the root path). `name-prefix` is the cookie name cut at the first `_`,
/// `-` or `.` that follows a non-separator character, so `_ga_ABC` groups
/// under `_ga`. A cookie without a name yields the empty string.
pub fn generate_prefix(cookie: &NormalizedCookie) -> String {
    let name = name_prefix(&cookie.name);
    if name.is_empty() {
        return String::new();
    }

    let segment = cookie
        .path
        .split('/')
        .find(|s| !s.is_empty())
        .unwrap_or("");

    format!("/{}:{}", segment, name)
}

fn name_prefix(name: &str) -> &str {
    let name = name.trim();
    let mut seen_body = false;

    for (idx, ch) in name.char_indices() {
        if NAME_SEPARATORS.contains(&ch) {
            if seen_body {
                return &name[..idx];
            }
        } else {
            seen_body = true;
        }
    }

    name
}
