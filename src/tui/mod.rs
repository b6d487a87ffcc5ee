//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the form,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! [`route_event`] decides who sees a key, in priority order:
//!
//! 1. An open notice swallows everything except its dismiss keys and Ctrl+C.
//! 2. An open mood overlay gets the key next.
//! 3. Global keys (Tab, Ctrl+S, Esc, scrolling).
//! 4. The focused field.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

pub mod component;
pub mod components;
pub mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::analysis::{AnalysisClient, HttpAnalysisClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::mood::{FormState, RequestPayload, today};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::date_field::edit_date;
use crate::tui::components::mood_picker::{MoodFieldEvent, handle_field_event};
use crate::tui::components::{
    AnalysisPanelState, JournalBox, JournalEvent, MoodPickerEvent, MoodPickerState,
};
use crate::tui::components::notice;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which form control receives field keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Date,
    Mood,
    #[default]
    Journal,
    Button,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Date => Focus::Mood,
            Focus::Mood => Focus::Journal,
            Focus::Journal => Focus::Button,
            Focus::Button => Focus::Date,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Date => Focus::Button,
            Focus::Mood => Focus::Date,
            Focus::Journal => Focus::Mood,
            Focus::Button => Focus::Journal,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    // Persistent component states
    pub journal: JournalBox,
    pub analysis_panel: AnalysisPanelState,
    // Mood overlay (None = hidden)
    pub mood_picker: Option<MoodPickerState>,
    /// Render the analysis as markdown instead of plain text
    pub markdown: bool,
}

impl TuiState {
    pub fn new(app: &App, markdown: bool) -> Self {
        Self {
            focus: Focus::default(), // User expects to type immediately
            journal: JournalBox::new(&app.form.journal),
            analysis_panel: AnalysisPanelState::new(),
            mood_picker: None,
            markdown,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals that lack it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Translates one terminal event into at most one core action, updating
/// TUI-only state (focus, overlays, scroll) along the way.
pub fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    if app.notice.is_some() {
        return notice::dismisses(event).then_some(Action::DismissNotice);
    }

    if let Some(ref mut picker) = tui.mood_picker {
        return match picker.handle_event(event)? {
            MoodPickerEvent::Select(mood) => {
                tui.mood_picker = None;
                Some(Action::SetMood(mood))
            }
            MoodPickerEvent::Dismiss => {
                tui.mood_picker = None;
                None
            }
        };
    }

    match event {
        TuiEvent::Escape => return Some(Action::Quit),
        TuiEvent::SubmitForm => return Some(Action::Submit),
        TuiEvent::FocusNext => {
            tui.focus = tui.focus.next();
            return None;
        }
        TuiEvent::FocusPrev => {
            tui.focus = tui.focus.prev();
            return None;
        }
        // Mouse wheel always scrolls the analysis
        TuiEvent::ScrollUp | TuiEvent::ScrollDown => {
            tui.analysis_panel.handle_event(event);
            return None;
        }
        // Page keys step months in the date field, scroll everywhere else
        TuiEvent::ScrollPageUp | TuiEvent::ScrollPageDown if tui.focus != Focus::Date => {
            tui.analysis_panel.handle_event(event);
            return None;
        }
        _ => {}
    }

    match tui.focus {
        Focus::Date => edit_date(&app.form.date, event, today()).map(Action::SetDate),
        Focus::Mood => match handle_field_event(app.form.mood, event)? {
            MoodFieldEvent::Changed(mood) => Some(Action::SetMood(mood)),
            MoodFieldEvent::OpenPicker => {
                tui.mood_picker = Some(MoodPickerState::new(app.form.mood));
                None
            }
        },
        Focus::Journal => match tui.journal.handle_event(event)? {
            JournalEvent::Changed => Some(Action::SetJournal(tui.journal.buffer.clone())),
            JournalEvent::CursorMoved => None,
        },
        Focus::Button => match event {
            TuiEvent::Enter | TuiEvent::InputChar(' ') => Some(Action::Submit),
            TuiEvent::CursorUp | TuiEvent::CursorDown => {
                tui.analysis_panel.handle_event(event);
                None
            }
            _ => None,
        },
    }
}

/// Runs one analysis request in the background and reports the outcome as
/// `Action::AnalysisSettled`.
pub fn spawn_analysis(
    client: Arc<dyn AnalysisClient>,
    payload: RequestPayload,
    tx: mpsc::Sender<Action>,
) -> tokio::task::JoinHandle<()> {
    info!("Spawning analysis request to {}", client.endpoint());
    tokio::spawn(async move {
        let started = Instant::now();
        let result = client.analyze(&payload).await;
        debug!(
            "Analysis finished in {}ms (ok={})",
            started.elapsed().as_millis(),
            result.is_ok()
        );
        if tx.send(Action::AnalysisSettled(result)).is_err() {
            warn!("Failed to deliver analysis result: receiver dropped");
        }
    })
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client: Arc<dyn AnalysisClient> = Arc::new(HttpAnalysisClient::new(&config.base_url));
    let form = FormState {
        date: config.date.clone(),
        mood: config.mood,
        journal: String::new(),
    };
    let mut app = App::with_form(client, form);
    let mut tui = TuiState::new(&app, config.markdown);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'outer: loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Short poll while the spinner runs (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            let Some(action) = route_event(&app, &mut tui, &event) else {
                continue;
            };
            match update(&mut app, action) {
                Effect::Quit => break 'outer,
                Effect::SpawnAnalysis(payload) => {
                    spawn_analysis(app.client.clone(), payload, tx.clone());
                }
                Effect::None => {}
            }
        }

        // Results from the background request
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let settled = matches!(action, Action::AnalysisSettled(_));
            match update(&mut app, action) {
                Effect::Quit => break 'outer,
                Effect::SpawnAnalysis(payload) => {
                    spawn_analysis(app.client.clone(), payload, tx.clone());
                }
                Effect::None => {}
            }
            if settled {
                tui.analysis_panel.reset();
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}
