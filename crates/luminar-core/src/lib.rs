//! luminar-core — quiz session controller, data model, and scoring.
//!
//! This crate defines the vocabulary data model, the `ContentSource` trait
//! the content layer implements, and the session state machine that drives
//! a language-select → test → results quiz.

pub mod editing;
pub mod error;
pub mod model;
pub mod report;
pub mod score;
pub mod session;
pub mod settings;
pub mod shuffle;
pub mod traits;

pub use error::{ContentError, SessionError};
pub use model::{Answer, Feedback, ItemId, Language, Stage, Word};
pub use score::Score;
pub use session::{QuizController, SelectOutcome, SessionView, SubmitOutcome};
pub use settings::QuizSettings;
pub use traits::ContentSource;
