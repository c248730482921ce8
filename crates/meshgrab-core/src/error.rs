//! Per-asset failure type.

use thiserror::Error;

/// Why a single fetch or inline save failed. Returned as a value and logged at
/// the download boundary so the caller can move on to the next candidate.
#[derive(Debug, Error)]
pub enum FetchError {
    /// libcurl reported an error (connect failure, timeout, TLS, ...).
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    /// The transfer ended without delivering a response head.
    #[error("no response received")]
    NoResponse,
    /// Final response status was not 200.
    #[error("HTTP {0}")]
    Http(u32),
    /// Creating or writing the output file failed.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
    /// Inline reference without the `header,payload` comma.
    #[error("malformed data URL: {0}")]
    MalformedDataUrl(String),
    /// Inline payload is not valid standard base64.
    #[error("base64 decode: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl FetchError {
    /// HTTP status for `Http` failures.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Http(code) => Some(*code),
            _ => None,
        }
    }
}
