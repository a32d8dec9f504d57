//! Core data model types for luminar.
//!
//! Languages and words are sourced from the content backend and never
//! mutated; answers are created once per word as the quiz progresses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a content item.
///
/// Directus collections use either auto-increment integers or string keys
/// (UUIDs, slugs), so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(u64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(id) => write!(f, "{id}"),
            ItemId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        ItemId::Int(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::Text(id.to_string())
    }
}

/// A language a user can be tested in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: ItemId,
    pub name: String,
    /// Short code such as "es".
    #[serde(default)]
    pub code: String,
}

impl Language {
    /// Whether `query` names this language by id, code, or name (case-insensitive).
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.id.to_string() == query
            || self.code.eq_ignore_ascii_case(query)
            || self.name.to_lowercase() == query.to_lowercase()
    }
}

/// A vocabulary item and its expected translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: ItemId,
    pub word: String,
    pub translation: String,
}

impl Word {
    /// Check a user's answer against this word's translation.
    ///
    /// The input is trimmed and lowercased; the stored translation is only
    /// lowercased.
    pub fn accepts(&self, input: &str) -> bool {
        input.trim().to_lowercase() == self.translation.to_lowercase()
    }
}

/// A recorded answer to one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub word: Word,
    /// The input exactly as the user typed it.
    pub user_answer: String,
    pub is_correct: bool,
}

impl Answer {
    /// Grade `input` against `word`.
    pub fn grade(word: &Word, input: &str) -> Self {
        Self {
            word: word.clone(),
            user_answer: input.to_string(),
            is_correct: word.accepts(input),
        }
    }
}

/// Phase of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    #[default]
    LanguageSelect,
    Test,
    Results,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::LanguageSelect => write!(f, "language-select"),
            Stage::Test => write!(f, "test"),
            Stage::Results => write!(f, "results"),
        }
    }
}

/// Transient per-question correctness signal shown before auto-advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl From<bool> for Feedback {
    fn from(is_correct: bool) -> Self {
        if is_correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        }
    }
}
