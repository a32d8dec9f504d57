//! Quiz session controller.
//!
//! Drives a single user's quiz through `language-select → test → results`.
//! The controller is the sole owner of the session state; the presentation
//! layer reads snapshots (`SessionView`) and mutates only through
//! [`QuizController::select_language`], [`QuizController::submit_answer`] and
//! [`QuizController::restart`].
//!
//! After an answer is recorded the controller shows feedback and schedules a
//! single advance after the configured delay. The advance is a Tokio task
//! owned by the controller; `restart()` aborts it and bumps the session
//! epoch so a timer that already fired cannot apply a stale advance.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::error::SessionError;
use crate::model::{Answer, Feedback, Language, Stage, Word};
use crate::score::{Progress, Score};
use crate::settings::QuizSettings;
use crate::shuffle::shuffle_in_place;
use crate::traits::ContentSource;

/// Read-only snapshot of the session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SessionView {
    pub stage: Stage,
    pub selected_language: Option<Language>,
    pub words: Vec<Word>,
    pub current_index: usize,
    pub answers: Vec<Answer>,
    pub feedback: Option<Feedback>,
    pub loading: bool,
    /// User-visible message from the last failed fetch.
    pub error: Option<String>,
}

impl SessionView {
    /// The word currently being asked, if any.
    pub fn current_word(&self) -> Option<&Word> {
        if self.stage != Stage::Test {
            return None;
        }
        self.words.get(self.current_index)
    }

    pub fn progress(&self) -> Option<Progress> {
        if self.stage != Stage::Test {
            return None;
        }
        Progress::new(self.current_index, self.words.len())
    }

    /// Final tally, only once the session reached `results`.
    pub fn score(&self) -> Option<Score> {
        (self.stage == Stage::Results).then(|| Score::from_answers(&self.answers))
    }
}

/// Outcome of a language selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Words were loaded and the test started.
    Started { word_count: usize },
    /// The language has no published words; the session stays in
    /// `language-select`.
    NoWords,
    /// The session was restarted while the words were loading; the result
    /// was dropped.
    Discarded,
}

/// Outcome of an answer submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing happened: blank input, or feedback for the previous answer is
    /// still showing.
    Ignored,
    /// The answer was recorded and an advance is scheduled.
    Recorded { is_correct: bool, expected: String },
}

#[derive(Debug, Default)]
struct Session {
    stage: Stage,
    selected_language: Option<Language>,
    words: Vec<Word>,
    current_index: usize,
    answers: Vec<Answer>,
}

struct Inner {
    settings: QuizSettings,
    overrides: (Option<u32>, Option<u64>),
    languages: Vec<Language>,
    session: Session,
    feedback: Option<Feedback>,
    loading: bool,
    error: Option<String>,
    /// Bumped on every restart; scheduled work carries the epoch it was
    /// created in and is dropped if it no longer matches.
    epoch: u64,
    pending_advance: Option<JoinHandle<()>>,
    rng: StdRng,
}

impl Inner {
    fn view(&self) -> SessionView {
        SessionView {
            stage: self.session.stage,
            selected_language: self.session.selected_language.clone(),
            words: self.session.words.clone(),
            current_index: self.session.current_index,
            answers: self.session.answers.clone(),
            feedback: self.feedback,
            loading: self.loading,
            error: self.error.clone(),
        }
    }

    fn expect_stage(&self, expected: Stage) -> Result<(), SessionError> {
        let actual = self.session.stage;
        if actual == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidStage { expected, actual })
        }
    }
}

struct Shared {
    inner: Mutex<Inner>,
    updates: watch::Sender<SessionView>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner) {
        self.updates.send_replace(inner.view());
    }

    /// Move past the answered word. No-op if the epoch is stale or no
    /// answer is awaiting its advance.
    fn advance(&self, epoch: u64) {
        let mut inner = self.lock();
        if inner.epoch != epoch || inner.session.stage != Stage::Test || inner.feedback.is_none() {
            tracing::debug!(epoch, "dropping stale advance");
            return;
        }
        inner.pending_advance = None;
        inner.feedback = None;

        let session = &mut inner.session;
        if session.current_index + 1 < session.words.len() {
            session.current_index += 1;
            tracing::debug!(index = session.current_index, "next question");
        } else {
            session.current_index = session.words.len();
            session.stage = Stage::Results;
            tracing::debug!(answers = session.answers.len(), "stage -> results");
        }
        self.publish(&inner);
    }
}

/// Controller for one quiz session.
pub struct QuizController {
    source: Arc<dyn ContentSource>,
    shared: Arc<Shared>,
}

impl QuizController {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self::with_settings(source, QuizSettings::default())
    }

    pub fn with_settings(source: Arc<dyn ContentSource>, settings: QuizSettings) -> Self {
        let inner = Inner {
            settings,
            overrides: (None, None),
            languages: Vec::new(),
            session: Session::default(),
            feedback: None,
            loading: false,
            error: None,
            epoch: 0,
            pending_advance: None,
            rng: StdRng::from_os_rng(),
        };
        let (updates, _) = watch::channel(inner.view());
        Self {
            source,
            shared: Arc::new(Shared {
                inner: Mutex::new(inner),
                updates,
            }),
        }
    }

    /// Local overrides that win over both defaults and remote settings.
    pub fn with_overrides(
        self,
        questions_per_test: Option<u32>,
        feedback_delay_ms: Option<u64>,
    ) -> Self {
        {
            let mut inner = self.shared.lock();
            inner.overrides = (questions_per_test, feedback_delay_ms);
            inner.settings = inner
                .settings
                .clone()
                .with_overrides(questions_per_test, feedback_delay_ms);
        }
        self
    }

    /// Seed the shuffle for reproducible word order.
    pub fn with_seed(self, seed: u64) -> Self {
        self.shared.lock().rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Subscribe to session snapshots. The receiver sees every change.
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.shared.updates.subscribe()
    }

    pub fn view(&self) -> SessionView {
        self.shared.lock().view()
    }

    pub fn settings(&self) -> QuizSettings {
        self.shared.lock().settings.clone()
    }

    /// Languages loaded by the last successful [`load_languages`](Self::load_languages).
    pub fn languages(&self) -> Vec<Language> {
        self.shared.lock().languages.clone()
    }

    pub fn progress(&self) -> Option<Progress> {
        self.view().progress()
    }

    /// Fetch remote settings and merge them over the defaults.
    ///
    /// A failed fetch is logged and leaves the current settings in place.
    #[instrument(skip(self), fields(source = %self.source.name()))]
    pub async fn load_settings(&self) -> QuizSettings {
        match self.source.fetch_settings().await {
            Ok(remote) => {
                let mut inner = self.shared.lock();
                let (questions, delay) = inner.overrides;
                inner.settings = remote.with_overrides(questions, delay);
                inner.settings.clone()
            }
            Err(e) => {
                tracing::warn!("failed to load settings, using defaults: {e}");
                self.settings()
            }
        }
    }

    /// Fetch the published languages a user can choose from.
    #[instrument(skip(self), fields(source = %self.source.name()))]
    pub async fn load_languages(&self) -> Result<Vec<Language>, SessionError> {
        let epoch = {
            let mut inner = self.shared.lock();
            if inner.loading {
                return Err(SessionError::Busy);
            }
            inner.loading = true;
            inner.error = None;
            self.shared.publish(&inner);
            inner.epoch
        };

        let result = self.source.fetch_languages().await;

        let mut inner = self.shared.lock();
        if inner.epoch != epoch {
            // `loading` and `error` now belong to whatever runs after the restart.
            tracing::debug!("session restarted during language fetch");
            if let Ok(languages) = &result {
                inner.languages = languages.clone();
                self.shared.publish(&inner);
            }
            return result.map_err(SessionError::from);
        }
        inner.loading = false;
        match result {
            Ok(languages) => {
                tracing::debug!(count = languages.len(), "languages loaded");
                inner.languages = languages.clone();
                self.shared.publish(&inner);
                Ok(languages)
            }
            Err(e) => {
                tracing::warn!("failed to load languages: {e}");
                inner.error = Some(e.user_message());
                self.shared.publish(&inner);
                Err(e.into())
            }
        }
    }

    /// Start a test in `language`.
    ///
    /// Fetches up to `questions_per_test` published words, shuffles them and
    /// enters the test stage. On failure the session stays in
    /// `language-select` with nothing committed.
    #[instrument(skip(self, language), fields(language = %language.name))]
    pub async fn select_language(&self, language: &Language) -> Result<SelectOutcome, SessionError> {
        let (epoch, limit) = {
            let mut inner = self.shared.lock();
            inner.expect_stage(Stage::LanguageSelect)?;
            if inner.loading {
                return Err(SessionError::Busy);
            }
            if !inner.languages.iter().any(|l| l.id == language.id) {
                return Err(SessionError::UnknownLanguage(language.id.clone()));
            }
            inner.loading = true;
            inner.error = None;
            self.shared.publish(&inner);
            (inner.epoch, inner.settings.questions_per_test)
        };

        let result = self.source.fetch_words(&language.id, limit).await;

        let mut inner = self.shared.lock();
        if inner.epoch != epoch {
            tracing::debug!("session restarted during word fetch, discarding");
            return Ok(SelectOutcome::Discarded);
        }
        inner.loading = false;

        let mut words = match result {
            Ok(words) => words,
            Err(e) => {
                tracing::warn!("failed to load words: {e}");
                inner.error = Some(e.user_message());
                self.shared.publish(&inner);
                return Err(e.into());
            }
        };

        words.truncate(limit as usize);
        if words.is_empty() {
            tracing::info!("no published words");
            self.shared.publish(&inner);
            return Ok(SelectOutcome::NoWords);
        }

        shuffle_in_place(&mut words, &mut inner.rng);
        let word_count = words.len();

        inner.feedback = None;
        inner.session = Session {
            stage: Stage::Test,
            selected_language: Some(language.clone()),
            words,
            current_index: 0,
            answers: Vec::new(),
        };
        tracing::debug!(word_count, "stage -> test");
        self.shared.publish(&inner);

        Ok(SelectOutcome::Started { word_count })
    }

    /// Record an answer for the current word.
    ///
    /// Blank input is ignored, as is input while the previous answer's
    /// feedback is still showing. A recorded answer schedules exactly one
    /// advance after the feedback delay; a zero delay advances immediately.
    /// A non-zero delay needs a Tokio runtime to schedule the advance on;
    /// without one the answer is rejected with [`SessionError::NoRuntime`]
    /// and nothing is recorded.
    pub fn submit_answer(&self, raw_input: &str) -> Result<SubmitOutcome, SessionError> {
        let mut inner = self.shared.lock();
        inner.expect_stage(Stage::Test)?;

        if raw_input.trim().is_empty() || inner.feedback.is_some() {
            return Ok(SubmitOutcome::Ignored);
        }

        let delay = inner.settings.feedback_delay();
        let runtime = if delay.is_zero() {
            None
        } else {
            Some(Handle::try_current().map_err(|_| SessionError::NoRuntime)?)
        };

        let index = inner.session.current_index;
        let Some(word) = inner.session.words.get(index) else {
            return Ok(SubmitOutcome::Ignored);
        };
        let answer = Answer::grade(word, raw_input);
        let outcome = SubmitOutcome::Recorded {
            is_correct: answer.is_correct,
            expected: word.translation.clone(),
        };
        tracing::debug!(index, is_correct = answer.is_correct, "answer recorded");

        inner.feedback = Some(Feedback::from(answer.is_correct));
        inner.session.answers.push(answer);
        self.shared.publish(&inner);

        let epoch = inner.epoch;
        match runtime {
            Some(runtime) => {
                inner.pending_advance =
                    Some(schedule_advance(&runtime, &self.shared, epoch, delay));
            }
            None => {
                drop(inner);
                self.shared.advance(epoch);
            }
        }

        Ok(outcome)
    }

    /// Reset to `language-select`, clearing every session field and
    /// cancelling a pending advance. Loaded languages are kept.
    pub fn restart(&self) {
        let mut inner = self.shared.lock();
        inner.epoch += 1;
        if let Some(handle) = inner.pending_advance.take() {
            handle.abort();
        }
        inner.session = Session::default();
        inner.feedback = None;
        inner.loading = false;
        inner.error = None;
        tracing::debug!(epoch = inner.epoch, "session restarted");
        self.shared.publish(&inner);
    }

    /// Final score. Only available in the results stage.
    pub fn score(&self) -> Result<Score, SessionError> {
        let inner = self.shared.lock();
        inner.expect_stage(Stage::Results)?;
        Ok(Score::from_answers(&inner.session.answers))
    }
}

impl Drop for QuizController {
    fn drop(&mut self) {
        if let Some(handle) = self.shared.lock().pending_advance.take() {
            handle.abort();
        }
    }
}

fn schedule_advance(
    runtime: &Handle,
    shared: &Arc<Shared>,
    epoch: u64,
    delay: Duration,
) -> JoinHandle<()> {
    let shared: Weak<Shared> = Arc::downgrade(shared);
    runtime.spawn(async move {
        tokio::time::sleep(delay).await;
        if let Some(shared) = shared.upgrade() {
            shared.advance(epoch);
        }
    })
}
