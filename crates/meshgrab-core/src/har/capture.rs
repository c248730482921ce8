//! Load a HAR file into a [`PageSession`].

use anyhow::{Context, Result};
use base64::Engine;
use std::path::Path;

use super::parse::{HarEntry, HarLog};
use crate::page::PageSession;

/// Page markup and request list recovered from a HAR export.
#[derive(Debug, Clone)]
pub struct HarCapture {
    page_url: Option<String>,
    markup: Option<String>,
    /// Request URL per entry; empty when the entry has none.
    request_urls: Vec<String>,
}

impl HarCapture {
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read HAR file: {}", path.display()))?;
        Self::from_slice(&bytes).with_context(|| format!("parse HAR JSON: {}", path.display()))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let har: HarLog = serde_json::from_slice(bytes)?;
        let entries = har.log.entries;

        let document = entries.iter().find(|e| is_html_document(e));
        let markup = document.and_then(decode_text);
        let page_url = document
            .map(|e| e.request.url.clone())
            .filter(|u| !u.is_empty())
            .or_else(|| {
                har.log
                    .pages
                    .iter()
                    .map(|p| p.title.trim())
                    .find(|t| url::Url::parse(t).is_ok())
                    .map(str::to_string)
            })
            .or_else(|| {
                entries
                    .iter()
                    .map(|e| e.request.url.clone())
                    .find(|u| !u.is_empty())
            });

        Ok(Self {
            page_url,
            markup,
            request_urls: entries.into_iter().map(|e| e.request.url).collect(),
        })
    }

    /// URL of the captured document, if one can be identified.
    pub fn page_url(&self) -> Option<&str> {
        self.page_url.as_deref()
    }
}

impl PageSession for HarCapture {
    fn page_source(&self) -> Result<String> {
        self.markup
            .clone()
            .context("HAR contains no HTML response body")
    }

    fn request_urls(&self) -> Vec<Result<String>> {
        self.request_urls
            .iter()
            .enumerate()
            .map(|(i, url)| {
                if url.trim().is_empty() {
                    Err(anyhow::anyhow!("HAR entry {} has no request URL", i))
                } else {
                    Ok(url.clone())
                }
            })
            .collect()
    }
}

fn is_html_document(entry: &HarEntry) -> bool {
    entry.response.status == 200
        && entry.response.content.mime_type.to_ascii_lowercase().contains("html")
        && entry.response.content.text.is_some()
}

fn decode_text(entry: &HarEntry) -> Option<String> {
    let content = &entry.response.content;
    let text = content.text.as_ref()?;
    let is_base64 = content
        .encoding
        .as_deref()
        .map(|e| e.eq_ignore_ascii_case("base64"))
        .unwrap_or(false);
    if !is_base64 {
        return Some(text.clone());
    }
    match base64::engine::general_purpose::STANDARD.decode(text.trim()) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::warn!(url = %entry.request.url, error = %e, "HAR body is not valid base64");
            None
        }
    }
}
