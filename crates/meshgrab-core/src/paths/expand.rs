//! `~` and environment variable expansion for user-supplied paths.

use std::env;
use std::path::PathBuf;

/// Expands a leading `~` and then `$VAR` / `${VAR}` references (plus `%VAR%` on Windows).
/// Unknown variables are left as written.
pub fn expand_path(raw: &str) -> PathBuf {
    let with_home = expand_home(raw);
    PathBuf::from(expand_vars(&with_home))
}

fn expand_home(raw: &str) -> String {
    let rest = match raw.strip_prefix('~') {
        Some(rest) => rest,
        None => return raw.to_string(),
    };
    if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with(std::path::MAIN_SEPARATOR)) {
        // `~user` forms are not supported.
        return raw.to_string();
    }
    match dirs::home_dir() {
        Some(home) => format!("{}{}", home.display(), rest),
        None => raw.to_string(),
    }
}

fn expand_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(|c: char| c == '$' || (cfg!(windows) && c == '%')) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match expand_one(tail) {
            Some((value, consumed)) => {
                out.push_str(&value);
                rest = &tail[consumed..];
            }
            None => {
                out.push_str(&tail[..1]);
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Expands the reference at the start of `tail`; returns the value and bytes consumed.
fn expand_one(tail: &str) -> Option<(String, usize)> {
    let (name, consumed) = if let Some(braced) = tail.strip_prefix("${") {
        let end = braced.find('}')?;
        (&braced[..end], end + 3)
    } else if let Some(bare) = tail.strip_prefix('$') {
        let end = bare
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(bare.len());
        (&bare[..end], end + 1)
    } else {
        let inner = tail.strip_prefix('%')?;
        let end = inner.find('%')?;
        (&inner[..end], end + 2)
    };
    if name.is_empty() {
        return None;
    }
    env::var(name).ok().map(|value| (value, consumed))
}
