//! Player commands

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Player command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Let a tick pass without moving (lighting is still refreshed)
    Rest,
    ToggleLight,
    NewGame,
    Quit,
}

/// Movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Carving order before shuffling: up, right, down, left
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Get the delta (dx, dy) for this direction
    pub const fn delta(&self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

/// Outcome of executing a single command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// Player moved onto an empty cell
    Moved,
    /// Player moved and picked up the item there
    Collected,
    /// Player stepped onto the exit
    Escaped,
    /// Move was refused (wall, or already won)
    Blocked,
    /// Command took effect without moving the player
    NoTime,
    Quit,
}
