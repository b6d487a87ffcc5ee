//! # Mood Picker Component
//!
//! The mood `<select>`: a one-line field that cycles with ←/→, and an
//! overlay list opened with Enter or Space.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `MoodPickerState` lives in `TuiState` while the overlay is open
//! - `MoodPicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::mood::Mood;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

/// Events emitted by the collapsed mood field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoodFieldEvent {
    Changed(Mood),
    OpenPicker,
}

/// Cycles the mood inline or asks for the overlay.
pub fn handle_field_event(current: Mood, event: &TuiEvent) -> Option<MoodFieldEvent> {
    let index = current.index();
    let count = Mood::ALL.len();
    match event {
        TuiEvent::CursorRight | TuiEvent::CursorDown => {
            Some(MoodFieldEvent::Changed(Mood::ALL[(index + 1) % count]))
        }
        TuiEvent::CursorLeft | TuiEvent::CursorUp => {
            Some(MoodFieldEvent::Changed(Mood::ALL[(index + count - 1) % count]))
        }
        TuiEvent::Enter | TuiEvent::InputChar(' ') => Some(MoodFieldEvent::OpenPicker),
        _ => None,
    }
}

/// Collapsed, one-line mood field.
pub struct MoodField {
    pub mood: Mood,
    pub focused: bool,
}

impl Component for MoodField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let accent = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(accent)
            .padding(Padding::horizontal(1))
            .title(" Today's mood ");

        let line = Line::from(vec![
            Span::styled("◀ ", accent),
            Span::styled(self.mood.label(), Style::default().fg(Color::White)),
            Span::styled(" ▶", accent),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

/// Persistent state for the mood overlay.
pub struct MoodPickerState {
    pub selected: usize,
    pub list_state: ListState,
}

impl MoodPickerState {
    pub fn new(current: Mood) -> Self {
        let selected = current.index();
        let mut list_state = ListState::default();
        list_state.select(Some(selected));
        Self {
            selected,
            list_state,
        }
    }

    /// Handle a key event, returning a MoodPickerEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<MoodPickerEvent> {
        match event {
            TuiEvent::Escape => Some(MoodPickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(Mood::ALL.len() - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Enter | TuiEvent::InputChar(' ') => {
                Some(MoodPickerEvent::Select(Mood::ALL[self.selected]))
            }
            _ => None,
        }
    }
}

/// Events emitted by the mood overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoodPickerEvent {
    Select(Mood),
    Dismiss,
}

/// Transient render wrapper for the mood overlay.
pub struct MoodPicker<'a> {
    state: &'a mut MoodPickerState,
    current: Mood,
}

impl<'a> MoodPicker<'a> {
    pub fn new(state: &'a mut MoodPickerState, current: Mood) -> Self {
        Self { state, current }
    }
}

impl Component for MoodPicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Borders + one row per mood
        let height = Mood::ALL.len() as u16 + 2;
        let overlay = centered_rect(40, height, area);

        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Today's mood ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = Mood::ALL
            .iter()
            .enumerate()
            .map(|(i, mood)| {
                let marker = if *mood == self.current { " *" } else { "" };
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if *mood == self.current {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(Span::styled(
                    format!("{}{}", mood.label(), marker),
                    style,
                )))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// A rect of `width` columns and `height` rows centered in `outer`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(outer.height)),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(outer.width)),
        Constraint::Fill(1),
    ])
    .areas(center_v);
    center
}
