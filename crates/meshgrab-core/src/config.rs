use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::classify::AssetClassifier;
use crate::downloader::FetchOptions;

/// Desktop browser user agent sent with every GET.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36";

/// Connect and stall timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound on each body chunk written to disk.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Recognized 3D asset extensions. The order is also the MIME lookup order,
/// so `stl` is tried before `obj`.
pub const DEFAULT_ASSET_EXTENSIONS: [&str; 6] = [".gltf", ".glb", ".stl", ".obj", ".ply", ".fbx"];

/// Global configuration loaded from `~/.config/meshgrab/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshgrabConfig {
    /// Extensions (case-insensitive) that mark a URL as a 3D asset.
    #[serde(default = "default_asset_extensions")]
    pub asset_extensions: Vec<String>,
    /// User-Agent header for asset and page requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Connect timeout and longest tolerated body stall, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Maximum bytes handed to the file per write.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Output folder used when none is given on the command line. Supports `~` and `$VARS`.
    #[serde(default)]
    pub download_dir: Option<String>,
    /// Write the page snapshot, request list and manifest after each crawl.
    #[serde(default = "default_true")]
    pub save_artifacts: bool,
    /// Draw a progress bar for sized transfers.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

fn default_asset_extensions() -> Vec<String> {
    DEFAULT_ASSET_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_true() -> bool {
    true
}

impl Default for MeshgrabConfig {
    fn default() -> Self {
        Self {
            asset_extensions: default_asset_extensions(),
            user_agent: default_user_agent(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            download_dir: None,
            save_artifacts: true,
            show_progress: true,
        }
    }
}

impl MeshgrabConfig {
    pub fn classifier(&self) -> AssetClassifier {
        AssetClassifier::new(&self.asset_extensions)
    }

    /// Runtime options for the downloader derived from this config.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            chunk_size: self.chunk_size.max(1),
            show_progress: self.show_progress,
            classifier: self.classifier(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("meshgrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MeshgrabConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MeshgrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: MeshgrabConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
