//! Configuration loading and content-source factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use luminar_core::traits::ContentSource;

use crate::directus::{DirectusClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Top-level luminar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LuminarConfig {
    /// Base URL of the Directus instance.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Words per test; overrides the backend settings when set.
    #[serde(default)]
    pub questions_per_test: Option<u32>,
    /// Feedback delay in milliseconds; overrides the backend settings when set.
    #[serde(default)]
    pub feedback_delay_ms: Option<u64>,
    /// Show visual-editing attributes next to content items.
    #[serde(default)]
    pub visual_editing: bool,
    /// Output directory for quiz reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./luminar-results")
}

impl Default for LuminarConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            questions_per_test: None,
            feedback_delay_ms: None,
            visual_editing: false,
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `luminar.toml` in the current directory
/// 2. `~/.config/luminar/config.toml`
///
/// `LUMINAR_BASE_URL` overrides the configured base URL.
pub fn load_config() -> Result<LuminarConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LuminarConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("luminar.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            toml::from_str::<LuminarConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LuminarConfig::default(),
    };

    if let Ok(url) = std::env::var("LUMINAR_BASE_URL") {
        if !url.is_empty() {
            config.base_url = url;
        }
    }
    config.base_url = resolve_env_vars(&config.base_url);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("luminar"))
}

/// Create the content source described by a configuration.
pub fn create_source(config: &LuminarConfig) -> Result<Arc<dyn ContentSource>> {
    let client = DirectusClient::new(&config.base_url, config.timeout_secs)
        .with_context(|| format!("failed to create Directus client for {}", config.base_url))?;
    Ok(Arc::new(client))
}
