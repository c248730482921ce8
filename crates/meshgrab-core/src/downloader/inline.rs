//! Saving inline `data:` references.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;

use crate::classify::AssetClassifier;
use crate::error::FetchError;
use crate::paths::{ensure_folder, unique_path};
use crate::url_model::FALLBACK_EXTENSION;

/// Decodes a `data:<mime>[;params],<base64>` reference into
/// `out_folder/embedded_<unix-millis><ext>` and returns the path.
///
/// The extension comes from the MIME type via the classifier (`.bin` when
/// nothing matches). The payload is always treated as standard base64.
pub fn save_inline_resource(
    data_url: &str,
    out_folder: &Path,
    classifier: &AssetClassifier,
) -> Result<PathBuf, FetchError> {
    let result = write_inline(data_url, out_folder, classifier);
    match &result {
        Ok(path) => tracing::info!(path = %path.display(), "saved inline resource"),
        Err(e) => tracing::warn!(error = %e, "inline resource failed: {}", preview(data_url)),
    }
    result
}

fn write_inline(
    data_url: &str,
    out_folder: &Path,
    classifier: &AssetClassifier,
) -> Result<PathBuf, FetchError> {
    let (header, payload) = data_url
        .trim()
        .split_once(',')
        .ok_or_else(|| FetchError::MalformedDataUrl(preview(data_url)))?;

    let mime = mime_of(header);
    let ext = classifier
        .extension_for_mime(mime)
        .unwrap_or(FALLBACK_EXTENSION);

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD.decode(compact.as_bytes())?;

    ensure_folder(out_folder)?;
    let name = format!("embedded_{}{}", chrono::Utc::now().timestamp_millis(), ext);
    let path = unique_path(&out_folder.join(name));
    fs::write(&path, &bytes)?;
    Ok(path)
}

/// Text between `:` and the first `;` of the header (`data:model/stl;base64` -> `model/stl`).
fn mime_of(header: &str) -> &str {
    let after_colon = header.split_once(':').map(|(_, rest)| rest).unwrap_or(header);
    after_colon.split(';').next().unwrap_or("").trim()
}

/// Short form of a (possibly huge) data URL for log lines.
fn preview(data_url: &str) -> String {
    const MAX: usize = 48;
    let trimmed = data_url.trim();
    match trimmed.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
