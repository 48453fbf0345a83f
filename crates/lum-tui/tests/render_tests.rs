use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use lum_core::action::Command;
use lum_core::{GameLoop, GameOptions, GameRng, GameState};
use lum_tui::display::ClassicGlyphs;
use lum_tui::widgets::{MapWidget, MessagesWidget, StatusWidget};
use lum_tui::{App, GraphicsMode, Theme, UiMode};

fn state(radius: f32) -> GameState {
    let options = GameOptions {
        width: 11,
        height: 11,
        light_radius: radius,
        seed: Some(9),
        ..GameOptions::default()
    };
    GameState::new(options, GameRng::new(0)).unwrap()
}

fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn render_map(state: &GameState) -> Buffer {
    let theme = Theme::dark();
    let area = Rect::new(0, 0, 13, 13);
    let mut buf = Buffer::empty(area);
    MapWidget::new(state, &theme, &ClassicGlyphs).render(area, &mut buf);
    buf
}

#[test]
fn test_map_draws_player_and_neighbours() {
    let state = state(5.0);
    let buf = render_map(&state);
    // Border takes one cell; maze (1,1) lands on screen (2,2)
    assert_eq!(buf[(2, 2)].symbol(), "@");
    assert_eq!(buf[(1, 1)].symbol(), "#");
}

#[test]
fn test_small_light_leaves_maze_dark() {
    let state = state(2.0);
    let buf = render_map(&state);
    let blanks = (1..12)
        .flat_map(|y| (1..12).map(move |x| (x, y)))
        .filter(|&(x, y)| buf[(x, y)].symbol() == " ")
        .count();
    assert!(blanks > 60, "only {blanks} dark cells");
}

#[test]
fn test_light_off_reveals_everything() {
    let mut game = GameLoop::new(state(2.0));
    game.tick(Command::ToggleLight);
    let buf = render_map(game.state());
    let text = buffer_text(&buf);
    let ascii = game.state().maze.to_ascii();

    for (y, row) in ascii.lines().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let screen = buf[(x as u16 + 1, y as u16 + 1)].symbol();
            if (x, y) == (1, 1) {
                assert_eq!(screen, "@");
            } else {
                assert_eq!(screen, ch.to_string(), "mismatch at ({x}, {y})\n{text}");
            }
        }
    }
}

#[test]
fn test_status_lines() {
    let state = state(5.0);
    let theme = Theme::dark();
    let area = Rect::new(0, 0, 60, 2);
    let mut buf = Buffer::empty(area);
    StatusWidget::new(&state, &theme).render(area, &mut buf);
    let text = buffer_text(&buf);
    assert!(text.contains("Score:0"));
    assert!(text.contains("Moves:0"));
    assert!(text.contains("Seed:9"));
    assert!(text.contains("Light:on"));
}

#[test]
fn test_messages_joined() {
    let messages = vec!["first".to_string(), "second".to_string()];
    let area = Rect::new(0, 0, 30, 3);
    let mut buf = Buffer::empty(area);
    MessagesWidget::new(&messages).render(area, &mut buf);
    assert!(buffer_text(&buf).contains("first  second"));
}

#[test]
fn test_app_help_overlay() {
    let mut app = App::new(state(5.0), Theme::dark(), GraphicsMode::Classic);
    let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();

    terminal.draw(|frame| app.render(frame)).unwrap();
    let text = buffer_text(terminal.backend().buffer());
    assert!(text.contains("Luminescence"));
    assert!(text.contains("@"));
    assert!(!text.contains("Help"));

    app.handle_event(Event::Key(KeyEvent::new(
        KeyCode::Char('?'),
        KeyModifiers::NONE,
    )));
    assert_eq!(app.mode(), UiMode::Help);
    terminal.draw(|frame| app.render(frame)).unwrap();
    let text = buffer_text(terminal.backend().buffer());
    assert!(text.contains("Help"));
    assert!(text.contains("Toggle light"));
}
