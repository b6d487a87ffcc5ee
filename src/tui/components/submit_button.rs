//! The analyze button. Disabled (greyed, relabelled) while a request is in flight.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;

pub const LABEL_IDLE: &str = "🔍 Analyze my mood";
pub const LABEL_LOADING: &str = "Analyzing...";

pub struct SubmitButton {
    pub is_loading: bool,
    pub focused: bool,
}

impl SubmitButton {
    pub fn label(&self) -> &'static str {
        if self.is_loading {
            LABEL_LOADING
        } else {
            LABEL_IDLE
        }
    }

    fn style(&self) -> Style {
        match (self.is_loading, self.focused) {
            (true, _) => Style::default().fg(Color::DarkGray),
            (false, true) => Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            (false, false) => Style::default().fg(Color::Blue),
        }
    }
}

impl Component for SubmitButton {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = self.style();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style);
        let button = Paragraph::new(self.label())
            .centered()
            .style(style)
            .block(block);
        frame.render_widget(button, area);
    }
}
