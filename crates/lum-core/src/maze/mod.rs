//! Maze system
//!
//! Contains the cell model, the maze grid, and the carving generator.

mod cell;
pub mod generator;
mod grid;

pub use cell::{Cell, CellKind, Position};
pub use generator::{GeneratorSettings, generate, generate_with, validate_dimensions};
pub use grid::Maze;
