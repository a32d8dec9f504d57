//! The `luminar quiz` command.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use luminar_content::create_source;
use luminar_core::report::QuizReport;
use luminar_core::{QuizController, SelectOutcome, SubmitOutcome};

use super::report::print_results;

pub struct QuizArgs {
    pub language: String,
    pub questions: Option<u32>,
    pub feedback_delay_ms: Option<u64>,
    pub save: bool,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub base_url: Option<String>,
}

pub async fn execute(args: QuizArgs) -> Result<()> {
    if let Some(questions) = args.questions {
        anyhow::ensure!(questions >= 1, "questions must be at least 1");
    }

    let config = super::load_config(args.config, args.base_url)?;
    let controller = QuizController::new(create_source(&config)?).with_overrides(
        args.questions.or(config.questions_per_test),
        args.feedback_delay_ms.or(config.feedback_delay_ms),
    );

    let settings = controller.load_settings().await;
    let languages = controller.load_languages().await?;

    let Some(language) = languages.iter().find(|l| l.matches(&args.language)).cloned() else {
        let available: Vec<&str> = languages.iter().map(|l| l.name.as_str()).collect();
        bail!(
            "language '{}' not found. Available: {}",
            args.language,
            available.join(", ")
        );
    };

    tracing::debug!(language = %language.name, "starting quiz");
    println!("{}", settings.title);
    match controller
        .select_language(&language)
        .await
        .with_context(|| format!("failed to start a {} quiz", language.name))?
    {
        SelectOutcome::Started { word_count } => {
            println!("{}: {word_count} words\n", language.name);
        }
        SelectOutcome::NoWords => {
            println!("No words published for {} yet.", language.name);
            return Ok(());
        }
        SelectOutcome::Discarded => bail!("quiz was restarted while loading"),
    }

    let started = Instant::now();
    let mut updates = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(word) = controller.view().current_word().cloned() {
        if let Some(progress) = controller.progress() {
            print!("[{}/{}] {}: ", progress.position, progress.total, word.word);
        }
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            bail!("input ended before the quiz finished");
        };

        match controller.submit_answer(&line)? {
            SubmitOutcome::Ignored => continue,
            SubmitOutcome::Recorded {
                is_correct: true, ..
            } => println!("Correct!"),
            SubmitOutcome::Recorded { expected, .. } => {
                println!("Incorrect. The answer is: {expected}");
            }
        }

        // Feedback stays up until the controller advances.
        updates
            .wait_for(|view| view.feedback.is_none())
            .await
            .context("quiz session closed")?;
    }

    let duration_ms = started.elapsed().as_millis() as u64;
    let report = QuizReport::from_view(&controller.view(), duration_ms)
        .context("quiz ended without results")?;
    print_results(&report, &settings.results_title);

    if args.save {
        let output = args.output.unwrap_or(config.output_dir);
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = output.join(format!("quiz-{timestamp}-{}.json", report.id));
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}
