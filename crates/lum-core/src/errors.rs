//! Error types for maze generation and lighting queries

use thiserror::Error;

/// Failures reported by the generator and the lighting engine.
///
/// None of these are retried internally; the game loop decides what to do
/// (usually regenerate with different parameters).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MazeError {
    #[error("invalid maze dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        reason: &'static str,
    },

    #[error("coordinate ({x}, {y}) is outside the {width}x{height} maze")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("light radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("placed only {placed} of {requested} items")]
    ItemPlacementStarvation { placed: usize, requested: usize },
}
