//! `meshgrab get <url>...` – download individual references.

use anyhow::{bail, Result};
use meshgrab_core::downloader::{download_url, FetchOptions};
use meshgrab_core::http::CurlSession;
use std::path::Path;

use super::preview;

pub fn run_get(urls: &[String], out_folder: &Path, opts: &FetchOptions) -> Result<()> {
    let mut session = CurlSession::new();
    let mut failed = 0usize;
    for url in urls {
        match download_url(url, out_folder, Some(&mut session), opts) {
            Ok(path) => println!("saved {}", path.display()),
            Err(e) => {
                failed += 1;
                eprintln!("failed {}: {}", preview(url), e);
            }
        }
    }
    if failed > 0 {
        bail!("{} of {} downloads failed", failed, urls.len());
    }
    Ok(())
}
