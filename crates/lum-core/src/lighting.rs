//! Lighting model
//!
//! Every pass starts from darkness and combines sources with `max`, so light
//! saturates at the brightest source instead of adding up. The result is an
//! owned [`LightMap`] snapshot; callers swap it in whole, which keeps a
//! renderer from ever seeing a half-updated grid.

use serde::{Deserialize, Serialize};

use crate::errors::MazeError;
use crate::maze::{Maze, Position};

/// A light emitter profile relative to the viewer's radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightSource {
    /// Source radius as a fraction of the viewer radius
    pub radius_scale: f32,
    /// Peak intensity at the source cell
    pub intensity: f32,
}

impl LightSource {
    /// The player's own light
    pub const VIEWER: LightSource = LightSource {
        radius_scale: 1.0,
        intensity: 1.0,
    };

    /// Glow around uncollected items
    pub const ITEM: LightSource = LightSource {
        radius_scale: 0.5,
        intensity: 0.6,
    };

    /// Beacon on the exit, lit regardless of where the viewer is
    pub const EXIT: LightSource = LightSource {
        radius_scale: 1.0 / 3.0,
        intensity: 0.4,
    };

    /// Linear falloff: `intensity * (1 - d / r)` inside the radius, 0 outside
    pub fn falloff(&self, distance: f32, radius: f32) -> f32 {
        if distance > radius {
            return 0.0;
        }
        ((1.0 - distance / radius) * self.intensity).max(0.0)
    }
}

/// Per-cell illumination snapshot, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightMap {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl LightMap {
    /// All cells dark
    pub fn dark(width: usize, height: usize) -> Self {
        Self::uniform(width, height, 0.0)
    }

    /// All cells at the same level (used when lighting is switched off)
    pub fn uniform(width: usize, height: usize, level: f32) -> Self {
        Self {
            width,
            height,
            values: vec![level.clamp(0.0, 1.0); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.values[y * self.width + x])
    }

    /// Raw values, row-major
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of cells with any light at all
    pub fn lit_count(&self) -> usize {
        self.values.iter().filter(|&&v| v > 0.0).count()
    }

    /// Raise cells around `center` to the source's falloff, never lowering them.
    ///
    /// Only the square of side 2*ceil(radius)+1 around the center (clamped to
    /// the grid) is visited.
    fn apply(&mut self, center: Position, radius: f32, source: &LightSource) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        // No cell is farther than the larger grid side, so reach never needs more
        let span = self.width.max(self.height) as f32;
        let reach = radius.ceil().min(span) as usize;
        let x_lo = center.x.saturating_sub(reach);
        let y_lo = center.y.saturating_sub(reach);
        let x_hi = center.x.saturating_add(reach).min(self.width - 1);
        let y_hi = center.y.saturating_add(reach).min(self.height - 1);

        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                let dist = center.distance(&Position::new(x, y));
                let level = source.falloff(dist, radius);
                let slot = &mut self.values[y * self.width + x];
                if level > *slot {
                    *slot = level;
                }
            }
        }
    }
}

/// Computes light snapshots for a maze
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingEngine {
    radius: f32,
    viewer: LightSource,
    item: LightSource,
    exit: LightSource,
}

impl LightingEngine {
    /// Engine with the standard viewer/item/exit profiles
    pub fn new(radius: f32) -> Result<Self, MazeError> {
        Self::with_sources(radius, LightSource::VIEWER, LightSource::ITEM, LightSource::EXIT)
    }

    pub fn with_sources(
        radius: f32,
        viewer: LightSource,
        item: LightSource,
        exit: LightSource,
    ) -> Result<Self, MazeError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(MazeError::InvalidRadius(radius));
        }
        Ok(Self {
            radius,
            viewer,
            item,
            exit,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Fresh light snapshot for a viewer standing at `viewer`.
    ///
    /// Does not read any previous lighting, so identical inputs always give
    /// identical output. Only items still on the floor glow; once collected an
    /// item stops contributing light.
    pub fn compute(&self, maze: &Maze, viewer: Position) -> Result<LightMap, MazeError> {
        let viewer = maze.check_bounds(viewer.x, viewer.y)?;
        let mut map = LightMap::dark(maze.width(), maze.height());

        map.apply(viewer, self.radius * self.viewer.radius_scale, &self.viewer);

        let item_radius = self.radius * self.item.radius_scale;
        for item in maze.remaining_items() {
            map.apply(item, item_radius, &self.item);
        }

        map.apply(maze.exit(), self.radius * self.exit.radius_scale, &self.exit);

        Ok(map)
    }

    /// Copy of `maze` with its cell lights replaced by a fresh snapshot
    pub fn illuminate(&self, maze: &Maze, viewer: Position) -> Result<Maze, MazeError> {
        let map = self.compute(maze, viewer)?;
        maze.with_light(&map)
    }
}

/// Recompute every cell's light for a viewer at (`viewer_x`, `viewer_y`)
pub fn compute_lighting(
    maze: &Maze,
    viewer_x: usize,
    viewer_y: usize,
    radius: f32,
) -> Result<Maze, MazeError> {
    LightingEngine::new(radius)?.illuminate(maze, Position::new(viewer_x, viewer_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::generate;
    use crate::rng::GameRng;

    fn sample_maze() -> Maze {
        generate(21, 21, &mut GameRng::new(77)).unwrap()
    }

    #[test]
    fn test_falloff_edges() {
        let src = LightSource::VIEWER;
        assert_eq!(src.falloff(0.0, 5.0), 1.0);
        assert_eq!(src.falloff(5.0, 5.0), 0.0);
        assert_eq!(src.falloff(5.5, 5.0), 0.0);
        assert!((src.falloff(2.5, 5.0) - 0.5).abs() < 1e-6);
        assert!((LightSource::ITEM.falloff(0.0, 2.5) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert_eq!(LightingEngine::new(0.0), Err(MazeError::InvalidRadius(0.0)));
        assert!(LightingEngine::new(-1.0).is_err());
        assert!(LightingEngine::new(f32::NAN).is_err());
        assert!(LightingEngine::new(f32::INFINITY).is_err());
    }

    #[test]
    fn test_rejects_out_of_bounds_viewer() {
        let maze = sample_maze();
        let engine = LightingEngine::new(5.0).unwrap();
        let err = engine.compute(&maze, Position::new(21, 0)).unwrap_err();
        assert!(matches!(err, MazeError::OutOfBounds { x: 21, .. }));
    }

    #[test]
    fn test_viewer_cell_full_brightness() {
        let maze = sample_maze();
        let start = maze.start();
        let lit = compute_lighting(&maze, start.x, start.y, 5.0).unwrap();
        assert_eq!(lit.light_at(start), Some(1.0));
    }

    #[test]
    fn test_light_stays_in_unit_range() {
        let maze = sample_maze();
        let map = LightingEngine::new(7.5)
            .unwrap()
            .compute(&maze, Position::new(10, 10))
            .unwrap();
        assert!(map.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_apply_clamps_to_grid_corner() {
        let mut map = LightMap::dark(4, 3);
        map.apply(Position::new(0, 0), 10.0, &LightSource::VIEWER);
        assert_eq!(map.get(0, 0), Some(1.0));
        assert!(map.get(3, 2).unwrap() > 0.0);
        assert_eq!(map.get(4, 0), None);
    }

    #[test]
    fn test_apply_uses_max_not_sum() {
        let mut map = LightMap::dark(9, 1);
        map.apply(Position::new(3, 0), 4.0, &LightSource::VIEWER);
        map.apply(Position::new(5, 0), 4.0, &LightSource::VIEWER);
        // Cell 4 sits 1 away from both sources: 0.75, not 1.5
        assert!((map.get(4, 0).unwrap() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_huge_radius_reaches_far_corner() {
        let mut map = LightMap::dark(21, 21);
        map.apply(Position::new(1, 1), 1.0e20, &LightSource::VIEWER);
        assert!(map.get(20, 20).unwrap() > 0.0);
        assert_eq!(map.lit_count(), 21 * 21);

        let maze = generate(21, 21, &mut GameRng::new(1)).unwrap();
        let lit = compute_lighting(&maze, 1, 1, 1.0e20).unwrap();
        assert!(lit.light_at(Position::new(20, 20)).unwrap() > 0.0);
    }

    #[test]
    fn test_uniform_clamps() {
        let map = LightMap::uniform(2, 2, 3.0);
        assert!(map.values().iter().all(|&v| v == 1.0));
        assert_eq!(LightMap::dark(2, 2).lit_count(), 0);
    }
}
