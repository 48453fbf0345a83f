//! Core game constants
//!
//! Gameplay defaults and scoring constants.

/// Default maze dimensions (must be odd)
pub const DEFAULT_WIDTH: usize = 21;
pub const DEFAULT_HEIGHT: usize = 21;

/// Smallest accepted maze side
pub const MIN_DIMENSION: usize = 3;

/// Default player light radius, in cells
pub const DEFAULT_LIGHT_RADIUS: f32 = 5.0;

/// One item per this many grid cells (floor(width * height / ITEM_DIVISOR))
pub const ITEM_DIVISOR: usize = 20;

/// Item placement gives up after `target * ITEM_ATTEMPT_FACTOR` samples
pub const ITEM_ATTEMPT_FACTOR: usize = 1000;

/// Score awarded per collected item
pub const ITEM_SCORE: u32 = 10;

/// Numerator of the exit time bonus (bonus = TIME_BONUS_BASE / elapsed_ms)
pub const TIME_BONUS_BASE: u64 = 5_000_000;

/// How long a collected item's cell stays highlighted
pub const COLLECT_FLASH_MS: u64 = 1_000;
