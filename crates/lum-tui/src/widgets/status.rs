//! Status line widget

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use lum_core::GameState;

use crate::theme::Theme;

/// Widget for rendering the status lines
pub struct StatusWidget<'a> {
    state: &'a GameState,
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(state: &'a GameState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    /// Elapsed time as m:ss
    pub fn clock(elapsed_ms: u64) -> String {
        let secs = elapsed_ms / 1000;
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    pub fn lines(&self) -> (String, String) {
        let s = self.state;
        let line1 = format!(
            "Score:{} Items:{}/{} Moves:{} Time:{}",
            s.score,
            s.collected.len(),
            s.items_total(),
            s.moves,
            Self::clock(s.elapsed_ms),
        );

        let mut line2 = format!(
            "Maze {}x{} Seed:{} Light:{}",
            s.maze.width(),
            s.maze.height(),
            s.seed,
            if s.light_on { "on" } else { "off" },
        );
        if s.maze.item_shortfall() > 0 {
            line2.push_str(&format!(" ({} items missing)", s.maze.item_shortfall()));
        }
        if s.is_won() {
            line2.push_str(" ESCAPED");
        }
        (line1, line2)
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (line1, line2) = self.lines();

        let style = Style::default().fg(self.theme.text);
        buf.set_string(area.x, area.y, &line1, style);
        if area.height > 1 {
            let style = if self.state.is_won() {
                Style::default().fg(self.theme.good)
            } else {
                Style::default().fg(self.theme.text_dim)
            };
            buf.set_string(area.x, area.y + 1, &line2, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_format() {
        assert_eq!(StatusWidget::clock(0), "0:00");
        assert_eq!(StatusWidget::clock(59_999), "0:59");
        assert_eq!(StatusWidget::clock(125_000), "2:05");
    }
}
