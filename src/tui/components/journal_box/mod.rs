//! # JournalBox Component
//!
//! Multi-line text area for the day's journal.
//!
//! ## Responsibilities
//!
//! - Capture text input, including newlines (Enter) and pastes
//! - Handle editing (backspace, delete, cursor and word movement)
//! - Scroll internally once the text outgrows the visible rows
//! - Show a placeholder while empty
//!
//! ## State Management
//!
//! The buffer is internal state and the source of truth while typing. Every
//! edit emits `JournalEvent::Changed`, and the TUI mirrors the buffer into
//! `FormState.journal` through `Action::SetJournal`.

mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use layout::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, JOURNAL_ROWS, VERTICAL_OVERHEAD, display_width,
    inner_width, layout_lines, line_of, next_char_boundary, next_word_boundary,
    offset_at_column, prev_char_boundary, prev_word_boundary,
};

pub const PLACEHOLDER: &str = "What happened today? How do you feel about it?...";

/// High-level events emitted by the JournalBox
#[derive(Debug, Clone, PartialEq)]
pub enum JournalEvent {
    /// The text changed; carries nothing so the parent reads `buffer`.
    Changed,
    /// Only the cursor moved.
    CursorMoved,
}

/// Multi-line journal editor.
///
/// # Props
///
/// - `focused`: whether keystrokes go here (draws the cursor and highlight)
///
/// # State
///
/// - `buffer`: journal text
/// - `cursor`: byte offset into `buffer`
/// - `scroll_offset`: first visible visual line
pub struct JournalBox {
    pub buffer: String,
    pub focused: bool,
    cursor: usize,
    scroll_offset: u16,
    /// Inner text width from the last render, used for vertical movement
    last_width: u16,
}

impl JournalBox {
    const DEFAULT_WIDTH: u16 = 76;

    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
            focused: false,
            cursor: initial.len(),
            scroll_offset: 0,
            last_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Fixed height: the visible rows plus borders.
    pub fn height() -> u16 {
        JOURNAL_ROWS + VERTICAL_OVERHEAD
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Moves the cursor one visual line up or down, keeping its column.
    /// Returns `false` at the first/last line.
    fn move_vertically(&mut self, down: bool) -> bool {
        let lines = layout_lines(&self.buffer, self.last_width);
        let current = line_of(&lines, self.cursor);
        let target = if down {
            if current + 1 >= lines.len() {
                return false;
            }
            current + 1
        } else {
            if current == 0 {
                return false;
            }
            current - 1
        };
        let column = display_width(&self.buffer[lines[current].start..self.cursor]);
        self.cursor = offset_at_column(&self.buffer, lines[target], column);
        true
    }

    fn update_scroll_offset(&mut self, cursor_line: u16) {
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line - self.scroll_offset >= JOURNAL_ROWS {
            self.scroll_offset = cursor_line - (JOURNAL_ROWS - 1);
        }
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect, total_lines: usize) {
        use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

        if total_lines <= JOURNAL_ROWS as usize {
            return;
        }

        // ScrollbarState content_length is max scrollable position, not total items
        let max_scroll = total_lines - JOURNAL_ROWS as usize;
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_scroll)
            .position(self.scroll_offset as usize);

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

impl Component for JournalBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        self.last_width = width;

        let lines = layout_lines(&self.buffer, width);
        let cursor_line = line_of(&lines, self.cursor);
        let cursor_row = u16::try_from(cursor_line).unwrap_or(u16::MAX);
        self.update_scroll_offset(cursor_row);

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1))
            .title(" Journal ");

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            let visible: Vec<Line> = lines
                .iter()
                .skip(self.scroll_offset as usize)
                .take(JOURNAL_ROWS as usize)
                .map(|l| Line::raw(&self.buffer[l.start..l.end]))
                .collect();
            Paragraph::new(visible)
        };

        frame.render_widget(paragraph.block(block), area);
        self.render_scrollbar(frame, area, lines.len());

        if self.focused {
            let column = display_width(&self.buffer[lines[cursor_line].start..self.cursor]) as u16;
            let row = cursor_row.saturating_sub(self.scroll_offset);
            frame.set_cursor_position((
                area.x + CONTENT_OFFSET_X + column,
                area.y + CONTENT_OFFSET_Y + row,
            ));
        }
    }
}

impl EventHandler for JournalBox {
    type Event = JournalEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut encoded = [0u8; 4];
                self.insert(c.encode_utf8(&mut encoded));
                Some(JournalEvent::Changed)
            }
            TuiEvent::Enter => {
                self.insert("\n");
                Some(JournalEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                // Terminals send CR line endings in bracketed paste
                let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert(&normalized);
                Some(JournalEvent::Changed)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                JournalEvent::Changed
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                JournalEvent::Changed
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                JournalEvent::CursorMoved
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                JournalEvent::CursorMoved
            }),
            TuiEvent::WordLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_word_boundary(&self.buffer, self.cursor);
                JournalEvent::CursorMoved
            }),
            TuiEvent::WordRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_word_boundary(&self.buffer, self.cursor);
                JournalEvent::CursorMoved
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    JournalEvent::CursorMoved
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    JournalEvent::CursorMoved
                })
            }
            TuiEvent::CursorUp => self.move_vertically(false).then_some(JournalEvent::CursorMoved),
            TuiEvent::CursorDown => self.move_vertically(true).then_some(JournalEvent::CursorMoved),
            _ => None,
        }
    }
}
