//! Filename extraction from URL path.

use super::content_disposition::percent_decode;
use super::sanitize::sanitize_filename;
use crate::classify::strip_query_and_fragment;

/// Extracts the last path segment from a URL for use as a filename hint.
///
/// Query and fragment are ignored and percent-escapes decoded. Returns `None`
/// when the path is empty or ends with `/`. Strings that are not absolute URLs
/// (e.g. `/models/a.glb`) are split by hand.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let segment = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().rsplit('/').next().unwrap_or("").to_string(),
        Err(_) => strip_query_and_fragment(url.trim())
            .rsplit('/')
            .next()
            .unwrap_or("")
            .to_string(),
    };
    let decoded = String::from_utf8_lossy(&percent_decode(&segment)).into_owned();
    final_component(&decoded)
}

/// Last component of a `/` or `\` separated name, sanitized for the
/// filesystem. `None` for empty, `.`, `..` or names with nothing usable left.
pub fn final_component(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or("").trim();
    if last.is_empty() || last == "." || last == ".." {
        return None;
    }
    let cleaned = sanitize_filename(last);
    (!cleaned.is_empty()).then_some(cleaned)
}
