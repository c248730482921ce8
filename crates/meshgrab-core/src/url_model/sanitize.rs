//! Filesystem-safe local filenames.

/// Longest filename most filesystems accept, in bytes.
const NAME_MAX: usize = 255;

/// Makes a derived filename safe to create in the output folder.
///
/// - NUL, control characters, `/` and `\` become `_`, with runs collapsed
/// - leading/trailing spaces and dots are trimmed
/// - names over 255 bytes are shortened, keeping the extension
///
/// Returns an empty string when nothing usable is left.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_replaced = false;
    for c in name.chars() {
        if c == '/' || c == '\\' || c.is_control() {
            if !prev_replaced {
                out.push('_');
            }
            prev_replaced = true;
        } else {
            out.push(c);
            prev_replaced = false;
        }
    }

    let trimmed = out.trim_matches(|c: char| c == ' ' || c == '.');
    if trimmed.trim_matches('_').is_empty() {
        return String::new();
    }
    truncate_keeping_extension(trimmed, NAME_MAX)
}

fn truncate_keeping_extension(name: &str, max: usize) -> String {
    if name.len() <= max {
        return name.to_string();
    }
    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot <= 16 => name.split_at(dot),
        _ => (name, ""),
    };
    let mut take = max - ext.len();
    while take > 0 && !stem.is_char_boundary(take) {
        take -= 1;
    }
    format!("{}{}", &stem[..take], ext)
}
