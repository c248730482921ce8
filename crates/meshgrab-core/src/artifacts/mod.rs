//! Page artifacts for debugging a crawl: HTML snapshot, observed request URLs
//! and a JSON manifest tying them to the page URL.

mod manifest;

pub use manifest::{ArtifactPaths, Manifest};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::page::PageSession;
use crate::paths::{ensure_folder, unique_path};

/// `strftime` format of the timestamp shared by one bundle.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub const ROLE_PAGE_HTML: &str = "page_html";
pub const ROLE_NETWORK_URLS: &str = "network_urls";
pub const ROLE_MANIFEST: &str = "manifest";

/// Paths written by [`save_page_artifacts`], keyed by role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactBundle {
    pub timestamp: String,
    pub page_html: PathBuf,
    pub network_urls: PathBuf,
    pub manifest: PathBuf,
}

impl ArtifactBundle {
    /// `(role, path)` pairs in write order.
    pub fn roles(&self) -> [(&'static str, &Path); 3] {
        [
            (ROLE_PAGE_HTML, self.page_html.as_path()),
            (ROLE_NETWORK_URLS, self.network_urls.as_path()),
            (ROLE_MANIFEST, self.manifest.as_path()),
        ]
    }

    pub fn get(&self, role: &str) -> Option<&Path> {
        self.roles()
            .into_iter()
            .find(|(r, _)| *r == role)
            .map(|(_, p)| p)
    }
}

/// Writes `page_<ts>.html`, `network_urls_<ts>.txt` and `manifest_<ts>.json`
/// into `out_folder`, each under a collision-free name.
///
/// Request URLs that cannot be read are skipped. Failing to read the markup or
/// to write any file is an error.
pub fn save_page_artifacts(
    page: &dyn PageSession,
    out_folder: &Path,
    page_url: &str,
) -> Result<ArtifactBundle> {
    ensure_folder(out_folder)
        .with_context(|| format!("create artifact folder: {}", out_folder.display()))?;
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();

    let markup = page.page_source().context("read page source")?;
    let page_html = unique_path(&out_folder.join(format!("page_{}.html", timestamp)));
    fs::write(&page_html, markup.as_bytes())
        .with_context(|| format!("write {}", page_html.display()))?;

    let mut urls = Vec::new();
    for (i, entry) in page.request_urls().into_iter().enumerate() {
        match entry {
            Ok(url) => urls.push(url),
            Err(e) => tracing::debug!(index = i, error = %e, "skipping unreadable request URL"),
        }
    }
    let network_urls = unique_path(&out_folder.join(format!("network_urls_{}.txt", timestamp)));
    fs::write(&network_urls, urls.join("\n"))
        .with_context(|| format!("write {}", network_urls.display()))?;

    let manifest = unique_path(&out_folder.join(format!("manifest_{}.json", timestamp)));
    let record = Manifest::new(&timestamp, page_url, &page_html, &network_urls);
    fs::write(&manifest, record.to_json()?)
        .with_context(|| format!("write {}", manifest.display()))?;

    tracing::info!(
        page_url,
        manifest = %manifest.display(),
        requests = urls.len(),
        "saved page artifacts"
    );

    Ok(ArtifactBundle {
        timestamp,
        page_html,
        network_urls,
        manifest,
    })
}
