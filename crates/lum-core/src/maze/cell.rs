//! Maze cell types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::action::Direction;

/// What occupies a grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellKind {
    #[default]
    Wall = 0,
    Path = 1,
    Start = 2,
    Exit = 3,
    Item = 4,
}

impl CellKind {
    pub const fn is_wall(&self) -> bool {
        matches!(self, CellKind::Wall)
    }

    /// Anything but a wall can be walked on
    pub const fn is_passable(&self) -> bool {
        !self.is_wall()
    }

    /// Get the display character for this cell kind
    pub const fn symbol(&self) -> char {
        match self {
            CellKind::Wall => '#',
            CellKind::Path => '.',
            CellKind::Start => '<',
            CellKind::Exit => '>',
            CellKind::Item => '*',
        }
    }
}

/// Position on the maze grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// |x1 - x2| + |y1 - y2|
    pub const fn manhattan(&self, other: &Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Euclidean distance to another position
    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x.abs_diff(other.x) as f32;
        let dy = self.y.abs_diff(other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Move `steps` cells in `dir`, or None if that leaves `0..width` x `0..height`
    pub fn offset(&self, dir: Direction, steps: usize, width: usize, height: usize) -> Option<Self> {
        let (dx, dy) = dir.delta();
        let x = self.x.checked_add_signed(dx * steps as isize)?;
        let y = self.y.checked_add_signed(dy * steps as isize)?;
        (x < width && y < height).then_some(Self { x, y })
    }
}

/// A single maze cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,

    /// Terrain
    pub kind: CellKind,

    /// Illumination in [0, 1], written by the lighting engine
    pub light: f32,
}

impl Cell {
    /// Create an unlit wall cell
    pub const fn wall(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            kind: CellKind::Wall,
            light: 0.0,
        }
    }

    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub const fn is_walkable(&self) -> bool {
        self.kind.is_passable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_only_wall_blocks() {
        for kind in CellKind::iter() {
            assert_eq!(kind.is_passable(), kind != CellKind::Wall);
        }
    }

    #[test]
    fn test_symbols_unique() {
        let symbols: Vec<char> = CellKind::iter().map(|k| k.symbol()).collect();
        let mut dedup = symbols.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(symbols.len(), dedup.len());
    }

    #[test]
    fn test_manhattan_and_distance() {
        let a = Position::new(1, 1);
        let b = Position::new(4, 5);
        assert_eq!(a.manhattan(&b), 7);
        assert_eq!(b.manhattan(&a), 7);
        assert!((a.distance(&b) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_offset_bounds() {
        let p = Position::new(1, 1);
        assert_eq!(p.offset(Direction::North, 2, 5, 5), None);
        assert_eq!(p.offset(Direction::East, 2, 5, 5), Some(Position::new(3, 1)));
        assert_eq!(p.offset(Direction::South, 4, 5, 5), None);
        assert_eq!(p.offset(Direction::West, 1, 5, 5), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_wall_cell_is_dark() {
        let cell = Cell::wall(2, 3);
        assert_eq!(cell.position(), Position::new(2, 3));
        assert_eq!(cell.light, 0.0);
        assert!(!cell.is_walkable());
    }
}
