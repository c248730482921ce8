//! CLI command handlers, one file per command.

mod check;
mod config_path;
mod crawl;
mod get;

pub use check::run_check;
pub use config_path::run_config_path;
pub use crawl::{run_crawl, CrawlArgs};
pub use get::run_get;

/// Inline references can be megabytes long; show only the head.
pub(crate) fn preview(url: &str) -> String {
    const MAX: usize = 80;
    if url.chars().count() <= MAX {
        return url.to_string();
    }
    let head: String = url.chars().take(MAX).collect();
    format!("{}...", head)
}
