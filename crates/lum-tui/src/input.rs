//! Input handling - convert key events to commands

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lum_core::action::{Command, Direction};

/// Convert a key event to a game command.
///
/// Only keys that map directly onto a [`Command`] are handled here; help and
/// overlay keys are dealt with in app.rs.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        // Arrow keys
        KeyCode::Up => Some(Command::Move(Direction::North)),
        KeyCode::Down => Some(Command::Move(Direction::South)),
        KeyCode::Left => Some(Command::Move(Direction::West)),
        KeyCode::Right => Some(Command::Move(Direction::East)),

        // WASD
        KeyCode::Char('w' | 'W') => Some(Command::Move(Direction::North)),
        KeyCode::Char('s' | 'S') => Some(Command::Move(Direction::South)),
        KeyCode::Char('a' | 'A') => Some(Command::Move(Direction::West)),
        KeyCode::Char('d' | 'D') => Some(Command::Move(Direction::East)),

        KeyCode::Char('.') | KeyCode::Char(' ') => Some(Command::Rest),
        KeyCode::Char('l' | 'L') => Some(Command::ToggleLight),
        KeyCode::Char('r' | 'R') => Some(Command::NewGame),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Command::Quit),

        _ => None,
    }
}
