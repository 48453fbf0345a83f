//! lum-core: maze generation, lighting and game rules for Luminescence
//!
//! This crate contains all game logic with no terminal dependencies.
//! Everything is deterministic given a [`GameRng`] seed.

pub mod action;
pub mod lighting;
pub mod maze;
pub mod options;

mod consts;
mod errors;
mod gameloop;
mod rng;

pub use consts::*;
pub use errors::MazeError;
pub use gameloop::{CollectFlash, GameLoop, GameLoopResult, GameState, GameStatus, time_bonus};
pub use lighting::{LightMap, LightSource, LightingEngine, compute_lighting};
pub use maze::{Cell, CellKind, Maze, Position, generate};
pub use options::{GameOptions, OptionsError};
pub use rng::GameRng;
