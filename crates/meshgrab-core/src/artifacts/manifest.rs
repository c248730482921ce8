//! `manifest_<ts>.json` record.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub page_html: String,
    pub network_urls: String,
}

/// Ties one page URL to the snapshot and request list captured for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub timestamp: String,
    pub page_url: String,
    pub artifacts: ArtifactPaths,
}

impl Manifest {
    pub fn new(
        timestamp: &str,
        page_url: &str,
        page_html: &Path,
        network_urls: &Path,
    ) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            page_url: page_url.to_string(),
            artifacts: ArtifactPaths {
                page_html: page_html.to_string_lossy().into_owned(),
                network_urls: network_urls.to_string_lossy().into_owned(),
            },
        }
    }

    /// Pretty JSON; serde_json leaves non-ASCII characters unescaped.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
