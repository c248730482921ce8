//! `meshgrab crawl <url>` – harvest a page and download its 3D assets.

use anyhow::{Context, Result};
use meshgrab_core::crawl::{crawl_page, CrawlReport};
use meshgrab_core::downloader::FetchOptions;
use meshgrab_core::har::HarCapture;
use meshgrab_core::http::CurlSession;
use meshgrab_core::page::StaticPage;
use std::path::Path;

use super::preview;

pub struct CrawlArgs<'a> {
    pub url: &'a str,
    pub har: Option<&'a Path>,
    pub out_folder: &'a Path,
    pub save_artifacts: bool,
}

pub fn run_crawl(args: &CrawlArgs<'_>, opts: &FetchOptions) -> Result<()> {
    let mut session = CurlSession::new();
    let report = match args.har {
        Some(har_path) => {
            let capture = HarCapture::open(har_path)?;
            tracing::info!(
                har = %har_path.display(),
                recorded_page = capture.page_url().unwrap_or("-"),
                "crawling HAR capture"
            );
            crawl_page(
                &capture,
                args.url,
                args.out_folder,
                &mut session,
                opts,
                args.save_artifacts,
            )?
        }
        None => {
            let page = StaticPage::fetch(&mut session, args.url, opts)
                .with_context(|| format!("fetch page: {}", args.url))?;
            let base = page.base_url().to_string();
            crawl_page(
                &page,
                &base,
                args.out_folder,
                &mut session,
                opts,
                args.save_artifacts,
            )?
        }
    };
    print_report(&report, args.out_folder);
    Ok(())
}

fn print_report(report: &CrawlReport, out_folder: &Path) {
    println!(
        "Found {} asset reference(s); saved {} to {}",
        report.candidates.len(),
        report.downloaded.len(),
        out_folder.display()
    );
    for path in &report.downloaded {
        println!("  saved  {}", path.display());
    }
    for failure in &report.failed {
        println!("  failed {} ({})", preview(&failure.url), failure.error);
    }
    if let Some(bundle) = &report.artifacts {
        println!("Manifest: {}", bundle.manifest.display());
    }
}
