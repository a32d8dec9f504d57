//! Content and session error types.
//!
//! `ContentError` lives in `luminar-core` rather than next to the HTTP client
//! so the session controller can surface fetch failures to the presentation
//! layer as typed values.

use thiserror::Error;

use crate::model::{ItemId, Stage};

/// Errors that can occur when talking to the content backend.
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    /// The backend returned an error response.
    #[error("content API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The requested collection does not exist on the backend.
    #[error("collection not found: {0}")]
    NotFound(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl ContentError {
    /// Short, user-facing message for the presentation layer.
    pub fn user_message(&self) -> String {
        match self {
            ContentError::Timeout(_) | ContentError::Network(_) => {
                "Could not reach the content server. Please try again.".to_string()
            }
            ContentError::NotFound(collection) => {
                format!("The '{collection}' collection is missing. Please check your Directus setup.")
            }
            _ => "Failed to load content. Please check your Directus setup.".to_string(),
        }
    }
}

/// Errors returned by the quiz session controller.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation is not valid in the current stage.
    #[error("operation requires stage {expected}, session is in {actual}")]
    InvalidStage { expected: Stage, actual: Stage },

    /// The language was not part of the loaded language list.
    #[error("unknown language: {0}")]
    UnknownLanguage(ItemId),

    /// Another fetch is still in flight.
    #[error("a content request is already in progress")]
    Busy,

    /// A delayed advance was needed but no Tokio runtime is running.
    #[error("no Tokio runtime to schedule the feedback advance on")]
    NoRuntime,

    /// Fetching content failed.
    #[error(transparent)]
    Content(#[from] ContentError),
}
