//! # Actions
//!
//! Everything that can happen in the mood diary becomes an `Action`.
//! User edits the journal? That's `Action::SetJournal(text)`.
//! The backend answers? That's `Action::AnalysisSettled(result)`.
//!
//! `update()` takes the current state and an action, mutates the state and
//! returns an `Effect` describing the I/O the caller should perform. No side
//! effects happen here; the TUI spawns the request when it sees
//! `Effect::SpawnAnalysis`.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{error, info, warn};

use crate::analysis::AnalysisError;
use crate::core::mood::{Mood, RequestPayload};
use crate::core::state::{
    App, EMPTY_JOURNAL_NOTICE, FALLBACK_APOLOGY, SubmitPhase, THINKING_PLACEHOLDER,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetDate(String),
    SetMood(Mood),
    SetJournal(String),
    /// The user asked for an analysis.
    Submit,
    /// The in-flight request finished, one way or another.
    AnalysisSettled(Result<String, AnalysisError>),
    DismissNotice,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Send this payload to the analysis backend.
    SpawnAnalysis(RequestPayload),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SetDate(date) => {
            app.form.date = date;
            Effect::None
        }
        Action::SetMood(mood) => {
            app.form.mood = mood;
            Effect::None
        }
        Action::SetJournal(journal) => {
            app.form.journal = journal;
            Effect::None
        }
        Action::Submit => submit(app),
        Action::AnalysisSettled(result) => {
            settle(app, result);
            Effect::None
        }
        Action::DismissNotice => {
            app.notice = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App) -> Effect {
    // A second submit while loading is ignored; the button is disabled anyway.
    if app.is_loading() {
        warn!("Submit ignored: a request is already in flight");
        return Effect::None;
    }

    let payload = match app.form.payload() {
        Ok(payload) => payload,
        Err(e) => {
            info!("Submit rejected: {}", e);
            app.notice = Some(EMPTY_JOURNAL_NOTICE.to_string());
            return Effect::None;
        }
    };

    app.phase = SubmitPhase::Loading;
    app.analysis = THINKING_PLACEHOLDER.to_string();
    app.last_error = None;
    app.status_message = SubmitPhase::Loading.label().to_string();
    Effect::SpawnAnalysis(payload)
}

fn settle(app: &mut App, result: Result<String, AnalysisError>) {
    if !app.is_loading() {
        warn!("Analysis result arrived with no request in flight; dropping it");
        return;
    }

    match result {
        Ok(text) => {
            app.analysis = text;
            app.phase = SubmitPhase::Succeeded;
            app.status_message = SubmitPhase::Succeeded.label().to_string();
        }
        Err(e) => {
            error!("Analysis error ({}): {}", e.kind(), e);
            app.analysis = FALLBACK_APOLOGY.to_string();
            app.phase = SubmitPhase::Failed;
            app.status_message = SubmitPhase::Failed.label().to_string();
            app.last_error = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    fn filled_app() -> App {
        let mut app = test_app();
        update(&mut app, Action::SetDate("2024-01-01".to_string()));
        update(&mut app, Action::SetMood(Mood::Happy));
        update(&mut app, Action::SetJournal("Had a great day".to_string()));
        app
    }

    #[test]
    fn test_field_actions_touch_one_field_each() {
        let mut app = test_app();
        update(&mut app, Action::SetMood(Mood::Calm));
        assert_eq!(app.form.mood, Mood::Calm);
        assert_eq!(app.form.date, "");
        assert_eq!(app.form.journal, "");

        update(&mut app, Action::SetDate("2024-03-05".to_string()));
        assert_eq!(app.form.date, "2024-03-05");
        assert_eq!(app.form.mood, Mood::Calm);
    }

    #[test]
    fn test_submit_with_empty_journal_shows_notice_without_loading() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit);
        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading());
        assert_eq!(app.phase, SubmitPhase::Idle);
        assert_eq!(app.notice.as_deref(), Some(EMPTY_JOURNAL_NOTICE));
        assert!(app.analysis.is_empty());
    }

    #[test]
    fn test_submit_enters_loading_with_placeholder() {
        let mut app = filled_app();
        let effect = update(&mut app, Action::Submit);
        assert!(app.is_loading());
        assert_eq!(app.analysis, THINKING_PLACEHOLDER);
        match effect {
            Effect::SpawnAnalysis(payload) => {
                assert_eq!(payload.date, "2024-01-01");
                assert_eq!(payload.mood, Mood::Happy);
                assert_eq!(payload.journal, "Had a great day");
            }
            other => panic!("Expected SpawnAnalysis, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_while_loading_spawns_nothing() {
        let mut app = filled_app();
        assert!(matches!(update(&mut app, Action::Submit), Effect::SpawnAnalysis(_)));
        assert_eq!(update(&mut app, Action::Submit), Effect::None);
        assert!(app.is_loading());
    }

    #[test]
    fn test_success_sets_analysis_text() {
        let mut app = filled_app();
        update(&mut app, Action::Submit);
        update(
            &mut app,
            Action::AnalysisSettled(Ok("You seem joyful.".to_string())),
        );
        assert_eq!(app.analysis, "You seem joyful.");
        assert_eq!(app.phase, SubmitPhase::Succeeded);
        assert!(!app.is_loading());
        assert!(app.last_error.is_none());
    }

    #[test]
    fn test_api_failure_shows_apology_not_message() {
        let mut app = filled_app();
        update(&mut app, Action::Submit);
        update(
            &mut app,
            Action::AnalysisSettled(Err(AnalysisError::Api {
                status: 500,
                message: "Y".to_string(),
            })),
        );
        assert_eq!(app.analysis, FALLBACK_APOLOGY);
        assert_ne!(app.analysis, "Y");
        assert_eq!(app.phase, SubmitPhase::Failed);
        assert!(!app.is_loading());
    }

    #[test]
    fn test_network_failure_shows_same_apology() {
        let mut app = filled_app();
        update(&mut app, Action::Submit);
        update(
            &mut app,
            Action::AnalysisSettled(Err(AnalysisError::Network("refused".to_string()))),
        );
        assert_eq!(app.analysis, FALLBACK_APOLOGY);
        assert!(matches!(app.last_error, Some(AnalysisError::Network(_))));
    }

    #[test]
    fn test_resubmit_accepted_after_each_outcome() {
        let mut app = filled_app();

        update(&mut app, Action::Submit);
        update(&mut app, Action::AnalysisSettled(Ok("ok".to_string())));
        assert!(matches!(update(&mut app, Action::Submit), Effect::SpawnAnalysis(_)));

        update(
            &mut app,
            Action::AnalysisSettled(Err(AnalysisError::Parse("bad".to_string()))),
        );
        assert!(!app.is_loading());
        assert!(matches!(update(&mut app, Action::Submit), Effect::SpawnAnalysis(_)));
        assert_eq!(app.analysis, THINKING_PLACEHOLDER);
        assert!(app.last_error.is_none());
    }

    #[test]
    fn test_stray_result_without_request_is_ignored() {
        let mut app = filled_app();
        update(&mut app, Action::AnalysisSettled(Ok("late".to_string())));
        assert!(app.analysis.is_empty());
        assert_eq!(app.phase, SubmitPhase::Idle);
    }

    #[test]
    fn test_dismiss_notice() {
        let mut app = test_app();
        update(&mut app, Action::Submit);
        assert!(app.notice.is_some());
        update(&mut app, Action::DismissNotice);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
