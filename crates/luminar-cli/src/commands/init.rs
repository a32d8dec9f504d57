//! The `luminar init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("luminar.toml").exists() {
        println!("luminar.toml already exists, skipping.");
    } else {
        std::fs::write("luminar.toml", SAMPLE_CONFIG)?;
        println!("Created luminar.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point base_url in luminar.toml at your Directus instance");
    println!("  2. Run: luminar languages");
    println!("  3. Run: luminar quiz --language <code>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# luminar configuration

base_url = "http://luminar-edu.nl"
timeout_secs = 30
output_dir = "./luminar-results"

# Override the CMS settings locally.
# questions_per_test = 10
# feedback_delay_ms = 1500

visual_editing = false
"#;
