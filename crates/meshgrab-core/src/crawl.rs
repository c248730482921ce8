//! Crawl driver: harvest candidates from a loaded page, download each one,
//! then record page artifacts.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::artifacts::{save_page_artifacts, ArtifactBundle};
use crate::downloader::{download_url, FetchOptions};
use crate::harvest::{collect_candidates, harvest_links};
use crate::http::Transport;
use crate::page::PageSession;

/// One candidate that could not be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAsset {
    pub url: String,
    pub error: String,
}

/// Outcome of [`crawl_page`].
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Asset references found, after de-duplication.
    pub candidates: Vec<String>,
    pub downloaded: Vec<PathBuf>,
    pub failed: Vec<FailedAsset>,
    /// `None` when artifacts were disabled or the markup was unavailable.
    pub artifacts: Option<ArtifactBundle>,
}

/// Downloads every 3D asset referenced by `page` into `out_folder`.
///
/// Candidates come from links in the markup (resolved against `page_url`) and
/// from the observed request URLs. Downloads run one after another on the
/// shared `session`; a failed asset is recorded and the crawl moves on.
/// Artifact writing errors propagate.
pub fn crawl_page(
    page: &dyn PageSession,
    page_url: &str,
    out_folder: &Path,
    session: &mut dyn Transport,
    opts: &FetchOptions,
    save_artifacts: bool,
) -> Result<CrawlReport> {
    let markup = match page.page_source() {
        Ok(markup) => Some(markup),
        Err(e) => {
            tracing::warn!(page_url, error = %e, "page markup unavailable; using observed requests only");
            None
        }
    };
    let links = markup
        .as_deref()
        .map(|m| harvest_links(m, page_url))
        .unwrap_or_default();
    let requests: Vec<String> = page.request_urls().into_iter().filter_map(Result::ok).collect();

    let candidates = collect_candidates(
        links.iter().map(String::as_str),
        requests.iter().map(String::as_str),
        &opts.classifier,
    );
    tracing::info!(
        page_url,
        links = links.len(),
        requests = requests.len(),
        candidates = candidates.len(),
        "harvested candidates"
    );

    let mut report = CrawlReport::default();
    for candidate in &candidates {
        match download_url(candidate, out_folder, Some(&mut *session), opts) {
            Ok(path) => report.downloaded.push(path),
            Err(e) => report.failed.push(FailedAsset {
                url: candidate.clone(),
                error: e.to_string(),
            }),
        }
    }
    report.candidates = candidates;

    if save_artifacts && markup.is_some() {
        report.artifacts = Some(save_page_artifacts(page, out_folder, page_url)?);
    }

    tracing::info!(
        page_url,
        downloaded = report.downloaded.len(),
        failed = report.failed.len(),
        "crawl finished"
    );
    Ok(report)
}
