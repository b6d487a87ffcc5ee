//! # AnalysisPanel Component
//!
//! Shows the analysis text (or the thinking placeholder) in a scrollable,
//! bordered panel. Whitespace is preserved and long lines wrap, like CSS
//! `white-space: pre-wrap`. With markdown enabled the text goes through
//! [`crate::tui::markdown`] first.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `AnalysisPanelState` (scroll position) lives in `TuiState`
//! - `AnalysisPanel` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

pub const PANEL_TITLE: &str = " 💡 AI perspective ";

/// Persistent scroll state for the analysis panel.
#[derive(Default)]
pub struct AnalysisPanelState {
    pub scroll_state: ScrollViewState,
    /// Wrapped content height from the last render
    content_height: u16,
    /// Visible rows from the last render
    viewport_height: u16,
}

impl AnalysisPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump back to the top, e.g. when a new analysis replaces the old one.
    pub fn reset(&mut self) {
        self.scroll_state.scroll_to_top();
    }

    fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    fn clamp_scroll(&mut self) {
        let offset = self.scroll_state.offset();
        let max = self.max_scroll();
        if offset.y > max {
            self.scroll_state.set_offset(Position { x: offset.x, y: max });
        }
    }
}

/// Emitted when the panel consumed a scroll key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scrolled;

impl EventHandler for AnalysisPanelState {
    type Event = Scrolled;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown | TuiEvent::CursorDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        self.clamp_scroll();
        Some(Scrolled)
    }
}

pub struct AnalysisPanel<'a> {
    pub text: &'a str,
    pub is_loading: bool,
    pub markdown: bool,
    pub state: &'a mut AnalysisPanelState,
}

impl<'a> AnalysisPanel<'a> {
    pub fn new(
        text: &'a str,
        is_loading: bool,
        markdown: bool,
        state: &'a mut AnalysisPanelState,
    ) -> Self {
        Self {
            text,
            is_loading,
            markdown,
            state,
        }
    }

    fn content(&self) -> Text<'static> {
        if self.is_loading {
            return Text::styled(
                self.text.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            );
        }
        if self.markdown {
            markdown::render(self.text, Color::White)
        } else {
            Text::styled(self.text.to_string(), Style::default().fg(Color::White))
        }
    }
}

impl Component for AnalysisPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(PANEL_TITLE)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // One column for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let paragraph = Paragraph::new(self.content()).wrap(Wrap { trim: false });
        let content_height = paragraph.line_count(content_width) as u16;

        self.state.content_height = content_height;
        self.state.viewport_height = inner.height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, content_height));

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
