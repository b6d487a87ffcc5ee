//! # DateField Component
//!
//! Single-line date input. Like a browser date control, the value is always
//! either empty or a valid `YYYY-MM-DD` date; keys step through the calendar
//! instead of editing characters.
//!
//! | Key | Effect |
//! |---|---|
//! | `t` | today |
//! | Up / `+` | next day (today when empty) |
//! | Down / `-` | previous day |
//! | PageUp / PageDown | ± one month |
//! | Backspace / Delete | clear |

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::mood::{format_date, parse_date, shift_days, shift_months};
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

/// Computes the new field value for a key, or `None` if the key does not
/// change the date. `today` is injected so the behavior is testable.
pub fn edit_date(current: &str, event: &TuiEvent, today: NaiveDate) -> Option<String> {
    let next = match event {
        TuiEvent::InputChar('t') | TuiEvent::InputChar('T') => format_date(today),
        TuiEvent::CursorUp | TuiEvent::InputChar('+') => shift_days(current, 1, today),
        TuiEvent::CursorDown | TuiEvent::InputChar('-') => shift_days(current, -1, today),
        TuiEvent::ScrollPageUp => shift_months(current, 1, today),
        TuiEvent::ScrollPageDown => shift_months(current, -1, today),
        TuiEvent::Backspace | TuiEvent::Delete => String::new(),
        _ => return None,
    };
    (next != current).then_some(next)
}

/// Stateless date field; the value lives in `FormState.date`.
pub struct DateField<'a> {
    pub value: &'a str,
    pub focused: bool,
}

impl<'a> DateField<'a> {
    pub fn new(value: &'a str, focused: bool) -> Self {
        Self { value, focused }
    }

    fn display_line(&self) -> Line<'static> {
        match parse_date(self.value) {
            Some(date) => Line::from(vec![
                Span::styled(format_date(date), Style::default().fg(Color::White)),
                Span::styled(
                    format!("  {}", date.format("%A")),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            None => Line::from(Span::styled(
                "yyyy-mm-dd",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
        }
    }
}

impl Component for DateField<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1))
            .title(" Date ");
        if self.focused {
            block = block.title_bottom(Line::from(" t today  ↑↓ day  PgUp/PgDn month  ⌫ clear ").right_aligned());
        }

        frame.render_widget(Paragraph::new(self.display_line()).block(block), area);
    }
}
