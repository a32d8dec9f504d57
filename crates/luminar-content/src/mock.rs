//! In-memory content source for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use luminar_core::error::ContentError;
use luminar_core::model::{ItemId, Language, Word};
use luminar_core::settings::QuizSettings;
use luminar_core::traits::ContentSource;

/// A content source serving fixed data, for driving the session controller
/// without a backend.
#[derive(Default)]
pub struct MockContentSource {
    languages: Vec<Language>,
    /// Words per language id, in backend order.
    words: HashMap<ItemId, Vec<Word>>,
    settings: Option<QuizSettings>,
    /// Error returned by every word fetch, if set.
    word_error: Option<ContentError>,
    /// Number of word fetches made.
    word_calls: AtomicU32,
    /// Language id and limit of the last word fetch.
    last_word_request: Mutex<Option<(ItemId, u32)>>,
}

impl MockContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a language and its words.
    pub fn with_language(mut self, language: Language, words: Vec<Word>) -> Self {
        self.words.insert(language.id.clone(), words);
        self.languages.push(language);
        self
    }

    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Make every word fetch fail with `error`.
    pub fn failing_words(mut self, error: ContentError) -> Self {
        self.word_error = Some(error);
        self
    }

    /// Get the number of word fetches made.
    pub fn word_calls(&self) -> u32 {
        self.word_calls.load(Ordering::Relaxed)
    }

    /// Get the language id and limit of the last word fetch.
    pub fn last_word_request(&self) -> Option<(ItemId, u32)> {
        self.last_word_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ContentSource for MockContentSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_languages(&self) -> Result<Vec<Language>, ContentError> {
        Ok(self.languages.clone())
    }

    async fn fetch_words(
        &self,
        language_id: &ItemId,
        limit: u32,
    ) -> Result<Vec<Word>, ContentError> {
        self.word_calls.fetch_add(1, Ordering::Relaxed);
        *self
            .last_word_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some((language_id.clone(), limit));

        if let Some(error) = &self.word_error {
            return Err(error.clone());
        }

        Ok(self
            .words
            .get(language_id)
            .map(|words| words.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn fetch_settings(&self) -> Result<QuizSettings, ContentError> {
        self.settings
            .clone()
            .ok_or_else(|| ContentError::NotFound("settings".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanish() -> Language {
        Language {
            id: 1u64.into(),
            name: "Spanish".into(),
            code: "es".into(),
        }
    }

    fn words(n: u64) -> Vec<Word> {
        (1..=n)
            .map(|i| Word {
                id: i.into(),
                word: format!("w{i}"),
                translation: format!("t{i}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn serves_words_up_to_limit() {
        let source = MockContentSource::new().with_language(spanish(), words(5));

        let fetched = source.fetch_words(&1u64.into(), 3).await.unwrap();
        assert_eq!(fetched.len(), 3);
        assert_eq!(fetched[0].word, "w1");
        assert_eq!(source.word_calls(), 1);
        assert_eq!(source.last_word_request(), Some((1u64.into(), 3)));
    }

    #[tokio::test]
    async fn unknown_language_has_no_words() {
        let source = MockContentSource::new().with_language(spanish(), words(2));
        let fetched = source.fetch_words(&"fr".into(), 10).await.unwrap();
        assert!(fetched.is_empty());
    }

    #[tokio::test]
    async fn failing_words() {
        let source = MockContentSource::new()
            .with_language(spanish(), words(2))
            .failing_words(ContentError::Timeout(30));
        let err = source.fetch_words(&1u64.into(), 10).await.unwrap_err();
        assert!(matches!(err, ContentError::Timeout(30)));
        assert_eq!(source.word_calls(), 1);
    }

    #[tokio::test]
    async fn settings_missing_by_default() {
        let source = MockContentSource::new();
        assert!(source.fetch_settings().await.is_err());

        let source = source.with_settings(QuizSettings::default());
        assert_eq!(
            source.fetch_settings().await.unwrap(),
            QuizSettings::default()
        );
    }
}
