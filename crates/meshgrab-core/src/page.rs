//! Page sessions: where markup and observed request URLs come from.
//!
//! A browser-driven session, a HAR export ([`crate::har::HarCapture`]) and a
//! plain GET ([`StaticPage`]) all look the same to the crawl driver and the
//! artifact recorder.

use anyhow::Result;

use crate::downloader::FetchOptions;
use crate::error::FetchError;
use crate::http::{ResponseHandler, ResponseHead, Transport};

/// A loaded page.
pub trait PageSession {
    /// Current rendered markup.
    fn page_source(&self) -> Result<String>;

    /// URLs of the network requests observed while loading the page, in order.
    /// Reading any single entry may fail without affecting the others.
    fn request_urls(&self) -> Vec<Result<String>>;
}

/// A page fetched with one GET; no scripts run, so the only observed requests
/// are the page itself and where it redirected to.
#[derive(Debug, Clone)]
pub struct StaticPage {
    url: String,
    effective_url: Option<String>,
    markup: String,
}

impl StaticPage {
    /// GETs `url` into memory. Non-200 responses and transport errors fail.
    pub fn fetch(session: &mut dyn Transport, url: &str, opts: &FetchOptions) -> Result<Self, FetchError> {
        let mut buffer = BodyBuffer::default();
        let summary = session.get(&opts.request(url), &mut buffer)?;
        tracing::debug!(url, bytes = summary.bytes, "fetched page");
        Ok(Self {
            url: url.to_string(),
            effective_url: summary.effective_url.filter(|u| u != url),
            markup: String::from_utf8_lossy(&buffer.body).into_owned(),
        })
    }

    /// Wraps markup obtained elsewhere.
    pub fn from_markup(url: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            effective_url: None,
            markup: markup.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Final URL after redirects, when it differs from the requested one.
    /// Relative links resolve against this.
    pub fn base_url(&self) -> &str {
        self.effective_url.as_deref().unwrap_or(&self.url)
    }
}

impl PageSession for StaticPage {
    fn page_source(&self) -> Result<String> {
        Ok(self.markup.clone())
    }

    fn request_urls(&self) -> Vec<Result<String>> {
        std::iter::once(self.url.clone())
            .chain(self.effective_url.clone())
            .map(Ok)
            .collect()
    }
}

/// Collects a 200 body in memory.
#[derive(Default)]
struct BodyBuffer {
    body: Vec<u8>,
}

impl ResponseHandler for BodyBuffer {
    fn on_response(&mut self, head: &ResponseHead) -> Result<(), FetchError> {
        if head.status != 200 {
            return Err(FetchError::Http(head.status));
        }
        if let Some(len) = head.headers.content_length() {
            self.body.reserve(len.min(16 * 1024 * 1024) as usize);
        }
        Ok(())
    }

    fn on_chunk(&mut self, chunk: &[u8]) -> Result<(), FetchError> {
        self.body.extend_from_slice(chunk);
        Ok(())
    }
}
