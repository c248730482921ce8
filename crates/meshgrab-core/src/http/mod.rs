//! Blocking HTTP GET seam.
//!
//! Downloads and page fetches talk to a [`Transport`]; the libcurl-backed
//! [`CurlSession`] is the production implementation. A handler sees the final
//! response head (after redirects) before any body bytes, then the body in
//! chunks.

mod curl_session;
mod head;

pub use curl_session::CurlSession;
pub use head::{ResponseHead, ResponseHeaders};

use crate::error::FetchError;
use std::time::Duration;

/// One GET request.
#[derive(Debug, Clone, Copy)]
pub struct GetRequest<'a> {
    pub url: &'a str,
    pub user_agent: &'a str,
    /// Connect timeout, and how long the body may stall before the transfer
    /// is abandoned. There is no cap on total transfer time.
    pub timeout: Duration,
    /// Preferred maximum size of each body chunk.
    pub chunk_size: usize,
}

/// What the transport knows once a GET has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSummary {
    pub status: u32,
    /// URL of the final response after redirects, if the client reports it.
    pub effective_url: Option<String>,
    /// Body bytes accepted by the handler.
    pub bytes: u64,
}

/// Receives a streamed response.
pub trait ResponseHandler {
    /// Called exactly once with the final response head, before any body chunk.
    /// Returning an error aborts the transfer.
    fn on_response(&mut self, head: &ResponseHead) -> Result<(), FetchError>;

    /// Called for each body chunk in order. Returning an error aborts the transfer.
    fn on_chunk(&mut self, chunk: &[u8]) -> Result<(), FetchError>;
}

/// Blocking HTTP client. Implementations may pool connections across calls.
pub trait Transport {
    fn get(
        &mut self,
        request: &GetRequest<'_>,
        handler: &mut dyn ResponseHandler,
    ) -> Result<TransferSummary, FetchError>;
}
