//! The `luminar report` command and results rendering shared with `quiz`.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use luminar_core::report::QuizReport;

pub fn execute(path: PathBuf) -> Result<()> {
    let report = QuizReport::load_json(&path)?;
    println!(
        "Report {} ({})",
        report.id,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    print_results(&report, "Test Complete!");
    Ok(())
}

/// Print the score table and the list of words answered incorrectly.
pub fn print_results(report: &QuizReport, title: &str) {
    println!("\n{title}");

    let mut table = Table::new();
    table.set_header(vec!["Language", "Correct", "Incorrect", "Score", "Time"]);
    table.add_row(vec![
        Cell::new(&report.language.name),
        Cell::new(report.score.correct),
        Cell::new(report.score.incorrect),
        Cell::new(format!("{}%", report.score.percentage)),
        Cell::new(format!("{:.1}s", report.duration_ms as f64 / 1000.0)),
    ]);
    println!("{table}");

    let mut mistakes = report.mistakes().peekable();
    if mistakes.peek().is_none() {
        println!("\nNo mistakes. Well done!");
        return;
    }

    println!("\nReview:");
    for answer in mistakes {
        println!(
            "  {}: you answered \"{}\", correct is \"{}\"",
            answer.word.word,
            answer.user_answer.trim(),
            answer.word.translation
        );
    }
}
