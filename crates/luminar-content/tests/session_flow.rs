//! Full quiz sessions driven through the in-memory content source.

use std::sync::Arc;
use std::time::Duration;

use luminar_content::MockContentSource;
use luminar_core::report::QuizReport;
use luminar_core::{
    ContentError, Feedback, Language, QuizController, QuizSettings, SelectOutcome, SessionError,
    Stage, SubmitOutcome, Word,
};

fn spanish() -> Language {
    Language {
        id: 1u64.into(),
        name: "Spanish".into(),
        code: "es".into(),
    }
}

fn word(id: u64, word: &str, translation: &str) -> Word {
    Word {
        id: id.into(),
        word: word.into(),
        translation: translation.into(),
    }
}

fn vocabulary() -> Vec<Word> {
    vec![
        word(1, "hello", "hola"),
        word(2, "cat", "gato"),
        word(3, "dog", "perro"),
        word(4, "house", "casa"),
    ]
}

/// Answer every word, getting the ones in `wrong` deliberately wrong.
async fn answer_all(controller: &QuizController, wrong: &[&str]) {
    let mut updates = controller.subscribe();
    while let Some(current) = controller.view().current_word().cloned() {
        let input = if wrong.contains(&current.word.as_str()) {
            "???".to_string()
        } else {
            current.translation.to_uppercase()
        };
        let outcome = controller.submit_answer(&input).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Recorded { .. }));
        updates.wait_for(|v| v.feedback.is_none()).await.unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn full_session_with_remote_settings() {
    let settings = QuizSettings {
        questions_per_test: 3,
        feedback_delay_ms: 800,
        ..QuizSettings::default()
    };
    let source = Arc::new(
        MockContentSource::new()
            .with_language(spanish(), vocabulary())
            .with_settings(settings),
    );
    let controller = QuizController::new(source.clone()).with_seed(11);

    let loaded = controller.load_settings().await;
    assert_eq!(loaded.questions_per_test, 3);
    assert_eq!(loaded.feedback_delay(), Duration::from_millis(800));

    controller.load_languages().await.unwrap();
    let outcome = controller.select_language(&spanish()).await.unwrap();
    assert_eq!(outcome, SelectOutcome::Started { word_count: 3 });
    assert_eq!(source.last_word_request(), Some((1u64.into(), 3)));

    answer_all(&controller, &["cat"]).await;

    let view = controller.view();
    assert_eq!(view.stage, Stage::Results);
    assert_eq!(view.answers.len(), 3);
    assert_eq!(view.current_index, 3);

    let score = controller.score().unwrap();
    let expected_wrong = view.answers.iter().filter(|a| a.word.word == "cat").count() as u32;
    assert_eq!(score.incorrect, expected_wrong);
    assert_eq!(score.correct + score.incorrect, 3);

    let report = QuizReport::from_view(&view, 0).unwrap();
    assert_eq!(report.score, score);
    assert_eq!(report.language, spanish());
}

#[tokio::test(start_paused = true)]
async fn local_overrides_beat_remote_settings() {
    let source = Arc::new(
        MockContentSource::new()
            .with_language(spanish(), vocabulary())
            .with_settings(QuizSettings {
                questions_per_test: 3,
                ..QuizSettings::default()
            }),
    );
    let controller = QuizController::new(source.clone()).with_overrides(Some(2), Some(0));

    let loaded = controller.load_settings().await;
    assert_eq!(loaded.questions_per_test, 2);
    assert_eq!(loaded.feedback_delay_ms, 0);

    controller.load_languages().await.unwrap();
    controller.select_language(&spanish()).await.unwrap();
    assert_eq!(source.last_word_request(), Some((1u64.into(), 2)));

    // Zero delay: each answer advances before submit returns.
    controller.submit_answer("x").unwrap();
    assert_eq!(controller.view().current_index, 1);
    assert_eq!(controller.view().feedback, None);
    controller.submit_answer("x").unwrap();
    assert_eq!(controller.view().stage, Stage::Results);
    assert_eq!(controller.score().unwrap().percentage, 0);
}

#[tokio::test(start_paused = true)]
async fn missing_remote_settings_fall_back_to_defaults() {
    let source = Arc::new(MockContentSource::new().with_language(spanish(), vocabulary()));
    let controller = QuizController::new(source);

    assert_eq!(controller.load_settings().await, QuizSettings::default());
}

#[tokio::test(start_paused = true)]
async fn failed_word_fetch_stays_on_language_select() {
    let source = Arc::new(
        MockContentSource::new()
            .with_language(spanish(), vocabulary())
            .failing_words(ContentError::Timeout(30)),
    );
    let controller = QuizController::new(source.clone());
    controller.load_languages().await.unwrap();

    let err = controller.select_language(&spanish()).await.unwrap_err();
    assert!(matches!(err, SessionError::Content(ContentError::Timeout(30))));

    let view = controller.view();
    assert_eq!(view.stage, Stage::LanguageSelect);
    assert!(view.selected_language.is_none());
    assert!(view.words.is_empty());
    assert!(!view.loading);
    assert!(view.error.is_some());

    // A retry is allowed once the failed fetch has settled.
    assert!(controller.select_language(&spanish()).await.is_err());
    assert_eq!(source.word_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn restart_mid_feedback_then_play_again() {
    let source = Arc::new(MockContentSource::new().with_language(spanish(), vocabulary()));
    let controller = QuizController::new(source).with_overrides(Some(2), None);
    controller.load_languages().await.unwrap();
    controller.select_language(&spanish()).await.unwrap();

    controller.submit_answer("hola").unwrap();
    assert!(controller.view().feedback.is_some());

    controller.restart();
    tokio::time::sleep(Duration::from_secs(5)).await;

    let view = controller.view();
    assert_eq!(view.stage, Stage::LanguageSelect);
    assert_eq!(view.feedback, None);
    assert!(view.answers.is_empty());
    assert_eq!(controller.languages(), vec![spanish()]);

    controller.select_language(&spanish()).await.unwrap();
    let view = controller.view();
    assert_eq!(view.stage, Stage::Test);
    assert_eq!(view.current_index, 0);
    assert!(view.answers.is_empty());

    let current = view.current_word().cloned().unwrap();
    controller.submit_answer(&current.translation).unwrap();
    assert_eq!(controller.view().feedback, Some(Feedback::Correct));
}

#[tokio::test]
async fn restart_is_only_way_out_of_results() {
    let source = Arc::new(MockContentSource::new().with_language(spanish(), vocabulary()));
    let controller = QuizController::new(source).with_overrides(Some(1), Some(0));
    controller.load_languages().await.unwrap();
    controller.select_language(&spanish()).await.unwrap();
    controller.submit_answer("anything").unwrap();
    assert_eq!(controller.view().stage, Stage::Results);

    assert!(matches!(
        controller.select_language(&spanish()).await,
        Err(SessionError::InvalidStage { .. })
    ));
    assert!(matches!(
        controller.submit_answer("more"),
        Err(SessionError::InvalidStage { .. })
    ));

    controller.restart();
    assert_eq!(controller.view().stage, Stage::LanguageSelect);
    assert!(controller.score().is_err());
}
