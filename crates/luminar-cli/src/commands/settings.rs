//! The `luminar settings` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use luminar_content::create_source;
use luminar_core::QuizController;

pub async fn execute(config_path: Option<PathBuf>, base_url: Option<String>) -> Result<()> {
    let config = super::load_config(config_path, base_url)?;
    let controller = QuizController::new(create_source(&config)?)
        .with_overrides(config.questions_per_test, config.feedback_delay_ms);

    let settings = controller.load_settings().await;
    let rendered = toml::to_string_pretty(&settings).context("failed to render settings")?;
    print!("{rendered}");
    Ok(())
}
