//! Output folder resolution and collision-free file paths.
//!
//! The default download root is computed by the entry point with
//! [`default_download_root`], only when no folder was given; nothing here
//! caches state.

mod expand;
mod root;
mod unique;

pub use expand::expand_path;
pub use root::{default_download_root, default_root_candidates, first_creatable};
pub use unique::unique_path;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Recursively creates `path`. No error if it already exists.
pub fn ensure_folder(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Normalizes an output folder and makes sure it exists.
///
/// `None` or an empty string selects the folder produced by `default_root`, which
/// is only called in that case. Environment variables and a leading `~` are
/// expanded; relative paths are anchored at the current directory.
pub fn resolve_out_folder<F>(path_like: Option<&str>, default_root: F) -> io::Result<PathBuf>
where
    F: FnOnce() -> PathBuf,
{
    let expanded = match path_like.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => expand_path(raw),
        None => default_root(),
    };
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()?.join(expanded)
    };
    ensure_folder(&absolute)?;
    tracing::debug!(folder = %absolute.display(), "output folder resolved");
    Ok(absolute)
}
