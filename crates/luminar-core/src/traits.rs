//! The content-source trait the session controller consumes.
//!
//! Implemented by the Directus client and the in-memory mock in
//! `luminar-content`.

use async_trait::async_trait;

use crate::error::ContentError;
use crate::model::{ItemId, Language, Word};
use crate::settings::QuizSettings;

/// Read-only access to the quiz content on the backend.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human-readable source name (e.g. "directus").
    fn name(&self) -> &str;

    /// All published languages.
    async fn fetch_languages(&self) -> Result<Vec<Language>, ContentError>;

    /// Up to `limit` published words for a language, in backend order.
    async fn fetch_words(&self, language_id: &ItemId, limit: u32)
        -> Result<Vec<Word>, ContentError>;

    /// Quiz settings, merged over defaults.
    async fn fetch_settings(&self) -> Result<QuizSettings, ContentError>;
}
