//! Map display widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use lum_core::{CellKind, GameState, Position as MazePos};

use crate::display::GlyphSet;
use crate::theme::{LightBand, Theme};

/// Widget for rendering the maze, shaded by the current light snapshot
pub struct MapWidget<'a> {
    state: &'a GameState,
    theme: &'a Theme,
    glyphs: &'a dyn GlyphSet,
}

impl<'a> MapWidget<'a> {
    pub fn new(state: &'a GameState, theme: &'a Theme, glyphs: &'a dyn GlyphSet) -> Self {
        Self {
            state,
            theme,
            glyphs,
        }
    }

    /// First maze column/row shown so the player stays in view when the maze
    /// is larger than the area
    fn viewport_origin(player: usize, maze_len: usize, view_len: usize) -> usize {
        if maze_len <= view_len {
            return 0;
        }
        player
            .saturating_sub(view_len / 2)
            .min(maze_len - view_len)
    }

    fn cell_display(&self, pos: MazePos) -> (char, Style) {
        let state = self.state;

        if pos == state.player {
            return (
                self.glyphs.player_char(),
                Style::default().fg(self.theme.map_player).bold(),
            );
        }

        if state.flash.is_some_and(|f| f.pos == pos) {
            return (
                self.glyphs.flash_char(),
                Style::default().fg(self.theme.map_flash).bold(),
            );
        }

        let band = LightBand::from_light(state.visible_light(pos));
        if !band.is_visible() {
            return (' ', Style::default());
        }

        let Some(kind) = state.maze.kind_at(pos) else {
            return (' ', Style::default());
        };
        let color = match kind {
            CellKind::Wall => self.theme.wall(band),
            CellKind::Path => self.theme.floor(band),
            CellKind::Start => Some(self.theme.map_start),
            CellKind::Exit => Some(self.theme.map_exit),
            CellKind::Item => Some(self.theme.map_item),
        };

        let mut style = Style::default();
        if let Some(color) = color {
            style = style.fg(color);
        }
        if band == LightBand::Bright && !kind.is_wall() && kind != CellKind::Path {
            style = style.bold();
        }
        (self.glyphs.cell_char(kind), style)
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Luminescence");

        let inner = block.inner(area);
        block.render(area, buf);

        let maze = &self.state.maze;
        let view_w = inner.width as usize;
        let view_h = inner.height as usize;
        let origin_x = Self::viewport_origin(self.state.player.x, maze.width(), view_w);
        let origin_y = Self::viewport_origin(self.state.player.y, maze.height(), view_h);

        // Center small mazes
        let pad_x = view_w.saturating_sub(maze.width()) / 2;
        let pad_y = view_h.saturating_sub(maze.height()) / 2;

        for dy in 0..maze.height().min(view_h) {
            for dx in 0..maze.width().min(view_w) {
                let pos = MazePos::new(origin_x + dx, origin_y + dy);
                let (ch, style) = self.cell_display(pos);
                let screen = Position::new(
                    inner.x + (pad_x + dx) as u16,
                    inner.y + (pad_y + dy) as u16,
                );
                if let Some(cell) = buf.cell_mut(screen) {
                    cell.set_char(ch);
                    cell.set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_fits() {
        assert_eq!(MapWidget::viewport_origin(5, 21, 40), 0);
        assert_eq!(MapWidget::viewport_origin(5, 21, 21), 0);
    }

    #[test]
    fn test_viewport_follows_player() {
        // 41 wide maze in a 21 wide view
        assert_eq!(MapWidget::viewport_origin(1, 41, 21), 0);
        assert_eq!(MapWidget::viewport_origin(20, 41, 21), 10);
        assert_eq!(MapWidget::viewport_origin(39, 41, 21), 20);
    }
}
