//! The generated maze and its queries

use serde::{Deserialize, Serialize};

use crate::errors::MazeError;
use crate::lighting::LightMap;

use super::cell::{Cell, CellKind, Position};

/// A generated maze.
///
/// Cells are stored `[row][col]`. Everything except the per-cell `light`
/// value (and the Item -> Path relabel on pickup) is fixed at generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    grid: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
    start: Position,
    exit: Position,
    items: Vec<Position>,
    /// Item count the generator aimed for
    requested_items: usize,
}

impl Maze {
    /// All-wall grid, used as the generator's starting point
    pub(crate) fn walled(width: usize, height: usize) -> Self {
        let grid = (0..height)
            .map(|y| (0..width).map(|x| Cell::wall(x, y)).collect())
            .collect();
        Self {
            grid,
            width,
            height,
            start: Position::default(),
            exit: Position::default(),
            items: Vec::new(),
            requested_items: 0,
        }
    }

    pub(crate) fn set_kind(&mut self, pos: Position, kind: CellKind) {
        self.grid[pos.y][pos.x].kind = kind;
    }

    pub(crate) fn set_start(&mut self, pos: Position) {
        self.set_kind(pos, CellKind::Start);
        self.start = pos;
    }

    pub(crate) fn set_exit(&mut self, pos: Position) {
        self.set_kind(pos, CellKind::Exit);
        self.exit = pos;
    }

    pub(crate) fn push_item(&mut self, pos: Position) {
        self.set_kind(pos, CellKind::Item);
        self.items.push(pos);
    }

    pub(crate) fn set_requested_items(&mut self, count: usize) {
        self.requested_items = count;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn exit(&self) -> Position {
        self.exit
    }

    /// Item coordinates in placement order, including collected ones
    pub fn items(&self) -> &[Position] {
        &self.items
    }

    /// Items still lying in the maze
    pub fn remaining_items(&self) -> impl Iterator<Item = Position> + '_ {
        self.items
            .iter()
            .copied()
            .filter(|p| self.grid[p.y][p.x].kind == CellKind::Item)
    }

    pub fn requested_items(&self) -> usize {
        self.requested_items
    }

    /// How many items the generator failed to place
    pub fn item_shortfall(&self) -> usize {
        self.requested_items.saturating_sub(self.items.len())
    }

    /// Iterate every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter().flatten()
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Fail-fast bounds check used by every coordinate query
    pub fn check_bounds(&self, x: usize, y: usize) -> Result<Position, MazeError> {
        if self.in_bounds(x, y) {
            Ok(Position::new(x, y))
        } else {
            Err(MazeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Result<&Cell, MazeError> {
        self.check_bounds(x, y)?;
        Ok(&self.grid[y][x])
    }

    pub fn kind_at(&self, pos: Position) -> Option<CellKind> {
        self.grid.get(pos.y)?.get(pos.x).map(|c| c.kind)
    }

    /// A move onto `pos` is legal iff it is in bounds and not a wall
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.kind_at(pos).is_some_and(|k| k.is_passable())
    }

    pub fn light_at(&self, pos: Position) -> Option<f32> {
        self.grid.get(pos.y)?.get(pos.x).map(|c| c.light)
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells().filter(|c| c.kind == kind).count()
    }

    /// Relabel an Item cell as Path. Returns false if there was no item there.
    pub fn collect_item(&mut self, pos: Position) -> bool {
        match self.kind_at(pos) {
            Some(CellKind::Item) => {
                self.set_kind(pos, CellKind::Path);
                true
            }
            _ => false,
        }
    }

    /// Copy of this maze with every cell's light taken from `lights`
    pub fn with_light(&self, lights: &LightMap) -> Result<Maze, MazeError> {
        if lights.width() != self.width || lights.height() != self.height {
            return Err(MazeError::InvalidDimensions {
                width: lights.width(),
                height: lights.height(),
                reason: "light map does not match the maze",
            });
        }
        let mut lit = self.clone();
        for cell in lit.grid.iter_mut().flatten() {
            cell.light = lights.get(cell.x, cell.y).unwrap_or(0.0);
        }
        Ok(lit)
    }

    /// Render as text, one line per row
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in &self.grid {
            out.extend(row.iter().map(|c| c.kind.symbol()));
            out.push('\n');
        }
        out
    }
}
