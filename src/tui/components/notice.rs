//! Modal notice overlay, the terminal stand-in for a browser `alert()`.
//! While shown, the TUI routes every key to it until it is dismissed.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::components::mood_picker::centered_rect;
use crate::tui::event::TuiEvent;

/// Keys that close the notice.
pub fn dismisses(event: &TuiEvent) -> bool {
    matches!(
        event,
        TuiEvent::Enter | TuiEvent::Escape | TuiEvent::InputChar(' ')
    )
}

pub struct Notice<'a> {
    pub message: &'a str,
}

impl Component for Notice<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = 50.min(area.width);
        // Message may wrap inside borders + padding
        let inner = width.saturating_sub(4).max(1) as usize;
        let rows = textwrap::wrap(self.message, inner).len() as u16;
        let overlay = centered_rect(width, rows + 2, area);

        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Notice ")
            .title_bottom(Line::from(" Enter OK ").centered())
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(self.message)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, overlay);
    }
}
