//! `meshgrab config-path` – print where the config file lives.

use anyhow::Result;
use meshgrab_core::config;

pub fn run_config_path() -> Result<()> {
    let path = config::config_path()?;
    println!("{}", path.display());
    Ok(())
}
