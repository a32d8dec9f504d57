//! luminar CLI — terminal front end for the vocabulary quiz.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "luminar", version, about = "Vocabulary quiz backed by a Directus CMS")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List published languages
    Languages {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directus base URL (overrides config)
        #[arg(long)]
        base_url: Option<String>,

        /// Show visual-editing attributes for each language
        #[arg(long)]
        visual_editing: bool,
    },

    /// Print the effective quiz settings
    Settings {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directus base URL (overrides config)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Take a quiz, reading one answer per line from stdin
    Quiz {
        /// Language code, name, or id
        #[arg(long)]
        language: String,

        /// Words per test (overrides settings)
        #[arg(long)]
        questions: Option<u32>,

        /// Feedback delay in milliseconds (overrides settings)
        #[arg(long)]
        feedback_delay_ms: Option<u64>,

        /// Save a JSON report of the finished quiz
        #[arg(long)]
        save: bool,

        /// Output directory for the report (defaults to config output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directus base URL (overrides config)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Print a saved quiz report
    Report {
        /// Report JSON file
        #[arg(long)]
        path: PathBuf,
    },

    /// Create a starter luminar.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("luminar=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Languages {
            config,
            base_url,
            visual_editing,
        } => commands::languages::execute(config, base_url, visual_editing).await,
        Commands::Settings { config, base_url } => {
            commands::settings::execute(config, base_url).await
        }
        Commands::Quiz {
            language,
            questions,
            feedback_delay_ms,
            save,
            output,
            config,
            base_url,
        } => {
            commands::quiz::execute(commands::quiz::QuizArgs {
                language,
                questions,
                feedback_delay_ms,
                save,
                output,
                config,
                base_url,
            })
            .await
        }
        Commands::Report { path } => commands::report::execute(path),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
