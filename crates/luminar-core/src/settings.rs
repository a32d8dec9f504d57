//! Quiz settings merged over documented defaults.
//!
//! The backend's settings object is a flat key/value map used mostly for
//! presentation. Any key that is missing or explicitly `null` falls back to
//! its default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_QUESTIONS_PER_TEST: u32 = 10;
pub const DEFAULT_FEEDBACK_DELAY_MS: u64 = 1500;

/// Effective quiz settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSettings {
    /// Maximum number of words fetched per test.
    pub questions_per_test: u32,
    /// How long correctness feedback is shown before auto-advancing.
    pub feedback_delay_ms: u64,
    pub title: String,
    pub subtitle: String,
    pub primary_color: String,
    pub correct_color: String,
    pub incorrect_color: String,
    pub results_title: String,
    pub restart_label: String,
}

/// Settings as sent by the backend: every key optional, `null` allowed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RemoteSettings {
    questions_per_test: Option<u32>,
    feedback_delay_ms: Option<u64>,
    title: Option<String>,
    subtitle: Option<String>,
    primary_color: Option<String>,
    correct_color: Option<String>,
    incorrect_color: Option<String>,
    results_title: Option<String>,
    restart_label: Option<String>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            questions_per_test: DEFAULT_QUESTIONS_PER_TEST,
            feedback_delay_ms: DEFAULT_FEEDBACK_DELAY_MS,
            title: "Luminar Learning".to_string(),
            subtitle: "Choose a language to start learning!".to_string(),
            primary_color: "#4f46e5".to_string(),
            correct_color: "#16a34a".to_string(),
            incorrect_color: "#dc2626".to_string(),
            results_title: "Test Complete!".to_string(),
            restart_label: "Try Another Language".to_string(),
        }
    }
}

impl QuizSettings {
    /// Parse a settings object, filling gaps from the defaults.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let remote: RemoteSettings = serde_json::from_value(value)?;
        Ok(Self::default().merge(remote))
    }

    fn merge(self, remote: RemoteSettings) -> Self {
        Self {
            questions_per_test: remote.questions_per_test.unwrap_or(self.questions_per_test),
            feedback_delay_ms: remote.feedback_delay_ms.unwrap_or(self.feedback_delay_ms),
            title: remote.title.unwrap_or(self.title),
            subtitle: remote.subtitle.unwrap_or(self.subtitle),
            primary_color: remote.primary_color.unwrap_or(self.primary_color),
            correct_color: remote.correct_color.unwrap_or(self.correct_color),
            incorrect_color: remote.incorrect_color.unwrap_or(self.incorrect_color),
            results_title: remote.results_title.unwrap_or(self.results_title),
            restart_label: remote.restart_label.unwrap_or(self.restart_label),
        }
    }

    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }

    /// Apply local overrides on top of these settings.
    pub fn with_overrides(
        mut self,
        questions_per_test: Option<u32>,
        feedback_delay_ms: Option<u64>,
    ) -> Self {
        if let Some(n) = questions_per_test {
            self.questions_per_test = n;
        }
        if let Some(ms) = feedback_delay_ms {
            self.feedback_delay_ms = ms;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let settings = QuizSettings::default();
        assert_eq!(settings.questions_per_test, 10);
        assert_eq!(settings.feedback_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn partial_object_keeps_defaults() {
        let settings = QuizSettings::from_json(json!({
            "questions_per_test": 5,
            "title": "Woorden oefenen"
        }))
        .unwrap();
        assert_eq!(settings.questions_per_test, 5);
        assert_eq!(settings.title, "Woorden oefenen");
        assert_eq!(settings.feedback_delay_ms, DEFAULT_FEEDBACK_DELAY_MS);
        assert_eq!(settings.primary_color, "#4f46e5");
    }

    #[test]
    fn null_keys_fall_back_to_defaults() {
        let settings = QuizSettings::from_json(json!({
            "questions_per_test": null,
            "feedback_delay_ms": null,
            "subtitle": null
        }))
        .unwrap();
        assert_eq!(settings, QuizSettings::default());
    }

    #[test]
    fn null_object_is_all_defaults() {
        let settings = QuizSettings::from_json(serde_json::Value::Null).unwrap();
        assert_eq!(settings, QuizSettings::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let settings = QuizSettings::from_json(json!({
            "id": 1,
            "hero_background": "#fff"
        }))
        .unwrap();
        assert_eq!(settings, QuizSettings::default());
    }

    #[test]
    fn overrides_win() {
        let settings = QuizSettings::default().with_overrides(Some(3), Some(0));
        assert_eq!(settings.questions_per_test, 3);
        assert_eq!(settings.feedback_delay_ms, 0);

        let untouched = QuizSettings::default().with_overrides(None, None);
        assert_eq!(untouched, QuizSettings::default());
    }
}
