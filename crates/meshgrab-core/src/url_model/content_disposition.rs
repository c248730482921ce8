//! Content-Disposition header parsing (filename and filename*).
//!
//! Grammar accepted (lenient where servers commonly are):
//!
//! ```text
//! header     = [ disposition-type ] *( ";" param )
//! param      = name "=" value
//! value      = quoted-string | token
//! ext-value  = [ charset "'" [ language ] "'" ] pct-encoded-chars   ; filename* only
//! ```
//!
//! Semicolons inside quoted strings do not split parameters. A quoted string
//! missing its closing quote runs to the end of the parameter.

/// Extracts the filename from a raw Content-Disposition header value.
///
/// If both `filename*` and `filename` are usable, `filename*` takes precedence.
/// The first occurrence of each parameter wins.
pub fn parse_content_disposition_filename(header_value: &str) -> Option<String> {
    let mut plain: Option<String> = None;
    let mut extended: Option<String> = None;

    for param in split_params(header_value) {
        let Some((name, raw)) = param.split_once('=') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "filename*" if extended.is_none() => {
                extended = Some(decode_ext_value(raw)).filter(|v| !v.is_empty());
            }
            "filename" if plain.is_none() => {
                plain = Some(unquote(raw)).filter(|v| !v.is_empty());
            }
            _ => {}
        }
    }

    extended.or(plain)
}

/// Splits on `;` outside of double quotes, honouring backslash escapes inside quotes.
fn split_params(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                parts.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts.into_iter().map(str::trim).filter(|p| !p.is_empty()).collect()
}

/// Quoted string (escapes removed, closing quote optional) or bare token.
fn unquote(raw: &str) -> String {
    let raw = raw.trim();
    match raw.strip_prefix('"') {
        Some(inner) => {
            let body = match find_closing_quote(inner) {
                Some(end) => &inner[..end],
                None => inner,
            };
            decode_quoted_filename(body)
        }
        None => raw.to_string(),
    }
}

fn find_closing_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return Some(i);
        }
    }
    None
}

/// RFC 5987 ext-value with an optional `charset'lang'` marker.
fn decode_ext_value(raw: &str) -> String {
    let raw = unquote(raw);
    let (charset, encoded) = match raw.split_once('\'') {
        Some((charset, rest)) => match rest.split_once('\'') {
            Some((_lang, encoded)) => (charset.to_ascii_lowercase(), encoded.to_string()),
            None => (String::new(), raw.clone()),
        },
        None => (String::new(), raw.clone()),
    };
    let bytes = percent_decode(&encoded);
    if charset == "iso-8859-1" || charset == "latin1" {
        bytes.iter().map(|&b| b as char).collect()
    } else {
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

/// Decode backslash-escaped characters in a quoted filename value.
pub(super) fn decode_quoted_filename(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Percent-decode; malformed escapes are kept literally.
pub(super) fn percent_decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(high), Some(low)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(high << 4 | low);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
