//! Message display widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

/// Widget for rendering the current turn's messages
pub struct MessagesWidget<'a> {
    messages: &'a [String],
    style: Style,
}

impl<'a> MessagesWidget<'a> {
    pub fn new(messages: &'a [String]) -> Self {
        Self {
            messages,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for MessagesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let paragraph = Paragraph::new(self.messages.join("  "))
            .style(self.style)
            .block(Block::default().borders(Borders::TOP))
            .wrap(Wrap { trim: true });

        paragraph.render(area, buf);
    }
}
