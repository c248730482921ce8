//! Collision-free file naming: `name.ext`, `name (1).ext`, `name (2).ext`, ...

use std::path::{Path, PathBuf};

/// Returns `candidate` if nothing exists there, otherwise the first free
/// `stem (n).ext` sibling counting from 1. Every probe hits the filesystem.
pub fn unique_path(candidate: &Path) -> PathBuf {
    if !candidate.exists() {
        return candidate.to_path_buf();
    }
    let stem = candidate
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = candidate
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let parent = candidate.parent().unwrap_or_else(|| Path::new(""));

    let mut n: u64 = 1;
    loop {
        let next = parent.join(format!("{} ({}){}", stem, n, ext));
        if !next.exists() {
            return next;
        }
        n += 1;
    }
}
