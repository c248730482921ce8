//! Response status line and header parsing.

/// Header list with case-insensitive lookup. Keeps duplicates in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: Vec<(String, String)>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value for `name`, compared ASCII case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_length(&self) -> Option<u64> {
        self.get("content-length")
            .and_then(|v| v.trim().parse::<u64>().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get("content-type")
    }

    pub fn content_disposition(&self) -> Option<&str> {
        self.get("content-disposition")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ResponseHeaders {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = ResponseHeaders::new();
        for (n, v) in iter {
            headers.insert(n, v);
        }
        headers
    }
}

/// Status code plus headers of one response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    /// 0 when no status line was seen.
    pub status: u32,
    pub headers: ResponseHeaders,
}

impl ResponseHead {
    /// Parse raw header lines of a single response (status line first).
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut head = ResponseHead::default();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with("HTTP/") {
                head.status = parse_status_line(line).unwrap_or(0);
                continue;
            }
            if let Some((name, value)) = line.split_once(':') {
                head.headers.insert(name.trim(), value.trim());
            }
        }
        head
    }
}

/// `HTTP/1.1 404 Not Found` -> 404.
fn parse_status_line(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}
