//! Application state and main UI controller

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tracing::debug;

use lum_core::action::Command;
use lum_core::{GameLoop, GameLoopResult, GameState};

use crate::display::{self, GlyphSet, GraphicsMode};
use crate::input::key_to_command;
use crate::theme::Theme;
use crate::widgets::{MapWidget, MessagesWidget, StatusWidget};

/// UI mode - what the app is currently displaying/waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Normal gameplay
    Normal,
    /// Key reference overlay
    Help,
    /// Maze escaped; waiting for a new game or quit
    Won,
}

/// Application state
pub struct App {
    game_loop: GameLoop,
    should_quit: bool,
    mode: UiMode,
    /// Color theme (adapts to light/dark terminal background)
    theme: Theme,
    glyph_set: Box<dyn GlyphSet>,
}

impl App {
    pub fn new(state: GameState, theme: Theme, graphics_mode: GraphicsMode) -> Self {
        Self {
            game_loop: GameLoop::new(state),
            should_quit: false,
            mode: UiMode::Normal,
            theme,
            glyph_set: display::detect_glyph_set(graphics_mode),
        }
    }

    pub fn state(&self) -> &GameState {
        self.game_loop.state()
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Feed wall-clock time into the session clock
    pub fn advance_clock(&mut self, dt: Duration) {
        self.game_loop.advance_clock(dt);
    }

    /// Handle input event - returns a command if one should be executed
    pub fn handle_event(&mut self, event: Event) -> Option<Command> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match self.mode {
            UiMode::Normal => self.handle_normal_input(key),
            UiMode::Help => {
                self.handle_help_input(key);
                None
            }
            UiMode::Won => self.handle_won_input(key),
        }
    }

    fn handle_normal_input(&mut self, key: KeyEvent) -> Option<Command> {
        if key.code == KeyCode::Char('?') {
            self.mode = UiMode::Help;
            return None;
        }
        key_to_command(key)
    }

    fn handle_help_input(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('?') | KeyCode::Enter
        ) {
            self.mode = UiMode::Normal;
        }
    }

    /// After winning only a restart or quit gets through
    fn handle_won_input(&mut self, key: KeyEvent) -> Option<Command> {
        match key_to_command(key) {
            Some(cmd @ (Command::NewGame | Command::Quit)) => Some(cmd),
            _ => None,
        }
    }

    /// Execute a command and update UI state
    pub fn execute(&mut self, command: Command) -> GameLoopResult {
        let result = self.game_loop.tick(command);
        debug!(?command, ?result, "command executed");

        match result {
            GameLoopResult::PlayerWon => self.mode = UiMode::Won,
            GameLoopResult::PlayerQuit => self.should_quit = true,
            GameLoopResult::Continue => {
                if command == Command::NewGame {
                    self.mode = UiMode::Normal;
                }
            }
        }

        result
    }

    /// Render the UI
    pub fn render(&self, frame: &mut Frame) {
        // Layout: map at top, status in middle, messages at bottom
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // Map + border
                Constraint::Length(2), // Status lines
                Constraint::Length(3), // Messages
            ])
            .split(frame.area());

        let state = self.game_loop.state();
        frame.render_widget(
            MapWidget::new(state, &self.theme, self.glyph_set.as_ref()),
            chunks[0],
        );
        frame.render_widget(StatusWidget::new(state, &self.theme), chunks[1]);
        frame.render_widget(
            MessagesWidget::new(&state.messages).style(Style::default().fg(self.theme.text)),
            chunks[2],
        );

        match self.mode {
            UiMode::Normal => {}
            UiMode::Help => self.render_help(frame),
            UiMode::Won => self.render_win(frame),
        }
    }

    fn render_help(&self, frame: &mut Frame) {
        let area = centered_rect(60, 60, frame.area());
        frame.render_widget(Clear, area);

        let help_text = r#"Movement: arrow keys or WASD

  .  or SPACE   Rest (refresh light)
  l             Toggle light
  r             New maze
  ?             This help
  q  or ESC     Quit

Reach the exit. Items score 10 each; finishing
quickly earns a time bonus.

Press ESC or SPACE to close"#;

        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_accent));

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .style(Style::default().fg(self.theme.text));

        frame.render_widget(paragraph, area);
    }

    fn render_win(&self, frame: &mut Frame) {
        let area = centered_rect(50, 40, frame.area());
        frame.render_widget(Clear, area);

        let state = self.game_loop.state();
        let lines = vec![
            Line::from(Span::styled(
                "You escaped!",
                Style::default().fg(self.theme.good).bold(),
            )),
            Line::from(""),
            Line::from(format!(
                "Items: {}/{}   Moves: {}   Time: {}",
                state.collected.len(),
                state.items_total(),
                state.moves,
                StatusWidget::clock(state.elapsed_ms),
            )),
            Line::from(format!("Time bonus: {}", state.time_bonus)),
            Line::from(Span::styled(
                format!("Final score: {}", state.total_score()),
                Style::default().fg(self.theme.accent).bold(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "r: new maze   q: quit",
                Style::default().fg(self.theme.text_dim),
            )),
        ];

        let block = Block::default()
            .title("Escaped")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_win));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(self.theme.text))
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
