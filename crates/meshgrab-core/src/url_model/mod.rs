//! Filename derivation for fetched resources.
//!
//! The URL path gives the first guess; a Content-Disposition filename replaces
//! it. When neither yields a name, one is synthesized from the current time
//! and the Content-Type.

mod content_disposition;
mod path;
mod sanitize;

pub use content_disposition::parse_content_disposition_filename;
pub use path::{filename_from_url_path, final_component};
pub use sanitize::sanitize_filename;

use crate::classify::AssetClassifier;
use crate::http::ResponseHeaders;

/// Extension used when no recognized format can be inferred.
pub const FALLBACK_EXTENSION: &str = ".bin";

/// Picks the local filename for a response to `url`.
///
/// # Examples
///
/// - `https://example.com/asset.obj` with no headers → `"asset.obj"`
/// - any URL with `Content-Disposition: attachment; filename="mesh.glb"` → `"mesh.glb"`
/// - `https://example.com/` with `Content-Type: model/stl` → `"downloaded_<secs>.stl"`
pub fn pick_filename(url: &str, headers: &ResponseHeaders, classifier: &AssetClassifier) -> String {
    let from_header = headers
        .content_disposition()
        .and_then(parse_content_disposition_filename)
        .and_then(|name| final_component(&name));

    if let Some(name) = from_header.or_else(|| filename_from_url_path(url)) {
        return name;
    }

    let ext = headers
        .content_type()
        .map(|ct| ct.split(';').next().unwrap_or(ct))
        .and_then(|mime| classifier.extension_for_mime(mime))
        .unwrap_or(FALLBACK_EXTENSION);
    format!("downloaded_{}{}", chrono::Utc::now().timestamp(), ext)
}
