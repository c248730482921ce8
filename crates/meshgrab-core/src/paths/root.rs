//! Default download root selection.

use std::fs;
use std::path::{Path, PathBuf};

/// Platform-appropriate home-relative download directories, in preference order.
pub fn default_root_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = dirs::download_dir() {
        candidates.push(dir);
    }
    if let Some(home) = dirs::home_dir() {
        for name in ["Downloads", "Загрузки"] {
            let dir = home.join(name);
            if !candidates.contains(&dir) {
                candidates.push(dir);
            }
        }
    }
    candidates
}

/// Returns the first candidate that exists or can be created, else `fallback`.
pub fn first_creatable(candidates: &[PathBuf], fallback: &Path) -> PathBuf {
    for candidate in candidates {
        match fs::create_dir_all(candidate) {
            Ok(()) => return candidate.clone(),
            Err(e) => {
                tracing::debug!(
                    candidate = %candidate.display(),
                    error = %e,
                    "download root candidate unusable"
                );
            }
        }
    }
    fallback.to_path_buf()
}

/// Default download root: first creatable candidate, else `./downloads`.
///
/// Pass as the fallback to [`super::resolve_out_folder`] so it only runs when
/// no folder was given.
pub fn default_download_root() -> PathBuf {
    let fallback = std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("downloads");
    first_creatable(&default_root_candidates(), &fallback)
}
