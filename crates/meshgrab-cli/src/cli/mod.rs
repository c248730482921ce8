//! CLI for meshgrab.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meshgrab_core::{config, paths};
use std::path::PathBuf;

use commands::{run_check, run_config_path, run_crawl, run_get, CrawlArgs};

/// Top-level CLI for meshgrab.
#[derive(Debug, Parser)]
#[command(name = "meshgrab")]
#[command(about = "meshgrab: find and download 3D model assets referenced by a web page", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Crawl a page and download every 3D asset it references.
    Crawl {
        /// Page URL. Relative links resolve against it.
        url: String,
        /// Output folder (default: config `download_dir`, then the Downloads folder).
        #[arg(short, long, value_name = "DIR")]
        out: Option<String>,
        /// Read markup and requests from a HAR export instead of fetching the page.
        #[arg(long, value_name = "FILE")]
        har: Option<PathBuf>,
        /// Skip the page snapshot, request list and manifest.
        #[arg(long)]
        no_artifacts: bool,
    },

    /// Download individual asset URLs or inline data references.
    Get {
        /// One or more URLs or `data:` references.
        #[arg(required = true)]
        urls: Vec<String>,
        /// Output folder.
        #[arg(short, long, value_name = "DIR")]
        out: Option<String>,
    },

    /// Print whether each candidate counts as a 3D asset reference.
    Check {
        #[arg(required = true)]
        candidates: Vec<String>,
    },

    /// Print the config file path.
    ConfigPath,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let opts = cfg.fetch_options();

        match cli.command {
            CliCommand::Crawl {
                url,
                out,
                har,
                no_artifacts,
            } => {
                let out_folder = resolve_out(out, cfg.download_dir.as_deref())?;
                let args = CrawlArgs {
                    url: &url,
                    har: har.as_deref(),
                    out_folder: &out_folder,
                    save_artifacts: cfg.save_artifacts && !no_artifacts,
                };
                run_crawl(&args, &opts)?;
            }
            CliCommand::Get { urls, out } => {
                let out_folder = resolve_out(out, cfg.download_dir.as_deref())?;
                run_get(&urls, &out_folder, &opts)?;
            }
            CliCommand::Check { candidates } => run_check(&candidates, &opts.classifier),
            CliCommand::ConfigPath => run_config_path()?,
        }

        Ok(())
    }
}

/// Command-line folder wins over the configured one; with neither, the default
/// download root is computed.
fn resolve_out(cli_out: Option<String>, configured: Option<&str>) -> Result<PathBuf> {
    let chosen = cli_out.as_deref().or(configured);
    paths::resolve_out_folder(chosen, paths::default_download_root)
        .with_context(|| format!("create output folder: {}", chosen.unwrap_or("(default)")))
}

#[cfg(test)]
mod tests;
