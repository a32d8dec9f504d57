//! The `luminar languages` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use luminar_content::create_source;
use luminar_core::editing::{EditTarget, VisualEditing};
use luminar_core::QuizController;

pub async fn execute(
    config_path: Option<PathBuf>,
    base_url: Option<String>,
    visual_editing: bool,
) -> Result<()> {
    let config = super::load_config(config_path, base_url)?;
    let controller = QuizController::new(create_source(&config)?);

    let mut editing = VisualEditing::new(&config.base_url);
    if visual_editing || config.visual_editing {
        editing.apply();
    }

    let languages = controller.load_languages().await?;

    if languages.is_empty() {
        println!("No languages published yet.");
        println!("Add some in the admin panel: {}", editing.admin_url());
        return Ok(());
    }

    let mut table = Table::new();
    let mut header = vec!["ID", "Name", "Code"];
    if editing.is_applied() {
        header.push("Edit");
    }
    table.set_header(header);

    for language in &languages {
        let mut row = vec![
            Cell::new(&language.id),
            Cell::new(&language.name),
            Cell::new(&language.code),
        ];
        let target = EditTarget::new("languages", language.id.clone(), &["name", "code"]);
        if let Some(attribute) = editing.attribute(&target) {
            row.push(Cell::new(attribute));
        }
        table.add_row(row);
    }

    println!("{table}");
    Ok(())
}
