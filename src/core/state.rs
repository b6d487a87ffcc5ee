//! # Application State
//!
//! Core business state for the mood diary. Domain logic only; presentation
//! state (focus, cursor, scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── client: Arc<dyn AnalysisClient>  // analysis backend
//! ├── form: FormState                  // date / mood / journal
//! ├── analysis: String                 // text shown in the analysis panel
//! ├── phase: SubmitPhase               // Idle → Loading → Succeeded | Failed
//! ├── notice: Option<String>           // blocking notice (must be dismissed)
//! ├── last_error: Option<AnalysisError>// most recent failure, for the status line
//! └── status_message: String           // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::analysis::{AnalysisClient, AnalysisError};
use crate::core::mood::FormState;
use std::sync::Arc;

/// Shown while a request is in flight.
pub const THINKING_PLACEHOLDER: &str = "AI is thinking...";

/// Shown for every failed request. Error details only go to the log.
pub const FALLBACK_APOLOGY: &str =
    "Sorry, the analysis service is temporarily unavailable. Please try again later.";

/// Shown when submitting without journal text.
pub const EMPTY_JOURNAL_NOTICE: &str = "Please write something in your journal first!";

/// Submit lifecycle of the form.
///
/// `Succeeded` and `Failed` behave like `Idle` for the next submission; they
/// only remember how the last cycle ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl SubmitPhase {
    pub fn is_loading(self) -> bool {
        self == SubmitPhase::Loading
    }

    pub fn label(self) -> &'static str {
        match self {
            SubmitPhase::Idle => "Ready",
            SubmitPhase::Loading => "Analyzing...",
            SubmitPhase::Succeeded => "Analysis complete",
            SubmitPhase::Failed => "Analysis unavailable",
        }
    }
}

pub struct App {
    pub client: Arc<dyn AnalysisClient>,
    pub form: FormState,
    pub analysis: String,
    pub phase: SubmitPhase,
    pub notice: Option<String>,
    pub last_error: Option<AnalysisError>,
    pub status_message: String,
}

impl App {
    pub fn new(client: Arc<dyn AnalysisClient>) -> Self {
        Self::with_form(client, FormState::default())
    }

    /// Starts with pre-filled fields (from CLI flags or config).
    pub fn with_form(client: Arc<dyn AnalysisClient>, form: FormState) -> Self {
        Self {
            client,
            form,
            analysis: String::new(),
            phase: SubmitPhase::Idle,
            notice: None,
            last_error: None,
            status_message: SubmitPhase::Idle.label().to_string(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mood::Mood;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.phase, SubmitPhase::Idle);
        assert!(!app.is_loading());
        assert!(app.analysis.is_empty());
        assert!(app.notice.is_none());
        assert_eq!(app.form.mood, Mood::Happy);
        assert_eq!(app.status_message, "Ready");
    }

    #[test]
    fn test_only_loading_phase_is_loading() {
        assert!(SubmitPhase::Loading.is_loading());
        assert!(!SubmitPhase::Idle.is_loading());
        assert!(!SubmitPhase::Succeeded.is_loading());
        assert!(!SubmitPhase::Failed.is_loading());
    }

    #[test]
    fn test_endpoint_comes_from_client() {
        let app = test_app();
        assert_eq!(app.endpoint(), "stub://analyze");
    }
}
