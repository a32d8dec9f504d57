pub mod init;
pub mod languages;
pub mod quiz;
pub mod report;
pub mod settings;

use std::path::PathBuf;

use anyhow::Result;

use luminar_content::config::{load_config_from, LuminarConfig};

/// Load the configuration and apply a `--base-url` flag on top.
pub(crate) fn load_config(
    config_path: Option<PathBuf>,
    base_url: Option<String>,
) -> Result<LuminarConfig> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(url) = base_url {
        config.base_url = url;
    }
    Ok(config)
}
