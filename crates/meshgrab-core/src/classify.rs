//! 3D asset reference classification.
//!
//! A candidate is either an inline `data:` reference or a URL whose path ends
//! in one of the configured extensions (query and fragment ignored).

use crate::config::DEFAULT_ASSET_EXTENSIONS;

/// Scheme prefix of inline embedded-data references.
pub const DATA_URL_PREFIX: &str = "data:";

/// True if `s` (after trimming) is an inline `data:` reference.
pub fn is_data_url(s: &str) -> bool {
    s.trim_start().starts_with(DATA_URL_PREFIX)
}

/// Decides which candidate strings are fetchable 3D assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetClassifier {
    /// Lower-case, dot-prefixed extensions in match order.
    extensions: Vec<String>,
}

impl Default for AssetClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_EXTENSIONS)
    }
}

impl AssetClassifier {
    /// Builds a classifier from extensions such as `".glb"`, `"GLB"` or `"glb"`.
    /// Empty entries are ignored; duplicates keep their first position.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim().trim_start_matches('.').to_lowercase();
            if ext.is_empty() {
                continue;
            }
            let ext = format!(".{}", ext);
            if !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }
        Self {
            extensions: normalized,
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns true if `candidate` is a data reference or names a recognized 3D file.
    pub fn is_asset_reference(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return false;
        }
        if candidate.starts_with(DATA_URL_PREFIX) {
            return true;
        }
        let path = strip_query_and_fragment(candidate).to_lowercase();
        self.extensions.iter().any(|ext| path.ends_with(ext.as_str()))
    }

    /// First extension whose bare name occurs in `mime` (case-insensitive).
    ///
    /// Substring containment means order matters: `model/gltf-binary`
    /// contains `gltf` and so maps to `.gltf` while that entry precedes `.glb`.
    pub fn extension_for_mime(&self, mime: &str) -> Option<&str> {
        let mime = mime.to_lowercase();
        if mime.trim().is_empty() {
            return None;
        }
        self.extensions
            .iter()
            .find(|ext| mime.contains(&ext[1..]))
            .map(|ext| ext.as_str())
    }
}

/// Cuts `s` at the first `?`, then at the first `#`.
pub(crate) fn strip_query_and_fragment(s: &str) -> &str {
    let s = s.split('?').next().unwrap_or(s);
    s.split('#').next().unwrap_or(s)
}
