//! Quiz results report with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Answer, Language, Stage};
use crate::score::Score;
use crate::session::SessionView;

/// A finished quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Language the quiz was taken in.
    pub language: Language,
    /// Final tally.
    pub score: Score,
    /// Answers in the order they were given.
    pub answers: Vec<Answer>,
    /// Wall-clock duration of the test stage in milliseconds.
    pub duration_ms: u64,
}

impl QuizReport {
    /// Build a report from a session snapshot. Returns `None` unless the
    /// session has reached the results stage.
    pub fn from_view(view: &SessionView, duration_ms: u64) -> Option<Self> {
        if view.stage != Stage::Results {
            return None;
        }
        let language = view.selected_language.clone()?;
        Some(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            language,
            score: Score::from_answers(&view.answers),
            answers: view.answers.clone(),
            duration_ms,
        })
    }

    /// Answers the user got wrong.
    pub fn mistakes(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter().filter(|a| !a.is_correct)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: QuizReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
