//! # TitleBar Component
//!
//! Two-line header: the diary title with the current status on the right,
//! and the tagline underneath.
//!
//! Stateless. Every field is a prop taken from `App` each frame:
//!
//! ```rust,ignore
//! TitleBar::new(app.endpoint(), &app.status_message, app.is_loading())
//!     .render(frame, header_area);
//! ```
//!
//! While loading, a spinner frame is prepended to the status text.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub const TITLE: &str = "📖 My AI Mood Diary";
pub const TAGLINE: &str = "Record every day, and let AI help you understand yourself better.";

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub struct TitleBar<'a> {
    pub endpoint: &'a str,
    pub status_message: &'a str,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> TitleBar<'a> {
    pub fn new(endpoint: &'a str, status_message: &'a str, is_loading: bool) -> Self {
        Self {
            endpoint,
            status_message,
            is_loading,
            spinner_frame: 0,
        }
    }

    pub fn status_text(&self) -> String {
        if self.is_loading {
            let frame = SPINNER[self.spinner_frame % SPINNER.len()];
            format!("{} {} | {}", frame, self.status_message, self.endpoint)
        } else {
            format!("{} | {}", self.status_message, self.endpoint)
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [title_row, tagline_row] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let status_text = self.status_text();
        let status_width = UnicodeWidthStr::width(status_text.as_str()) as u16;
        let [title_area, status_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(status_width)])
                .areas(title_row);

        let title = Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(title, title_area);

        let status_style = if self.is_loading {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let status = Paragraph::new(Line::from(Span::styled(status_text, status_style)));
        frame.render_widget(status, status_area);

        let tagline = Paragraph::new(Line::from(Span::styled(
            TAGLINE,
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(tagline, tagline_row);
    }
}
