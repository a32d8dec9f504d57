//! Result scoring and test progress.

use serde::{Deserialize, Serialize};

use crate::model::Answer;

/// Final tally of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub incorrect: u32,
    /// Rounded to the nearest whole percent, halves up.
    pub percentage: u32,
}

impl Score {
    /// Tally a list of answers. An empty list scores 0%.
    pub fn from_answers(answers: &[Answer]) -> Self {
        let total = answers.len() as u32;
        let correct = answers.iter().filter(|a| a.is_correct).count() as u32;
        Self {
            correct,
            incorrect: total - correct,
            percentage: percentage(correct, total),
        }
    }

    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }
}

/// `round(100 * part / whole)` in integer arithmetic, or 0 when `whole` is 0.
pub fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (u64::from(part), u64::from(whole));
    ((200 * part + whole) / (2 * whole)) as u32
}

/// Position within the test stage, as shown above each question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based question number.
    pub position: usize,
    pub total: usize,
    /// Fill of the progress bar, 0.0–100.0.
    pub percent: f64,
}

impl Progress {
    pub fn new(current_index: usize, total: usize) -> Option<Self> {
        if total == 0 || current_index >= total {
            return None;
        }
        let position = current_index + 1;
        Some(Self {
            position,
            total,
            percent: position as f64 / total as f64 * 100.0,
        })
    }
}
