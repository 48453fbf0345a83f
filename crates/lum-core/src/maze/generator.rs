//! Maze generation by randomized depth-first carving
//!
//! Carving runs on the odd sublattice: a node at (x, y) steps two cells in
//! each direction and knocks out the wall cell between. The walk keeps an
//! explicit stack so large mazes cannot exhaust the call stack.

use tracing::{debug, warn};

use crate::action::Direction;
use crate::consts::{ITEM_ATTEMPT_FACTOR, ITEM_DIVISOR, MIN_DIMENSION};
use crate::errors::MazeError;
use crate::rng::GameRng;

use super::cell::{CellKind, Position};
use super::grid::Maze;

/// Carving always starts here
pub const SEED_NODE: Position = Position::new(1, 1);

/// Knobs for item placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Target items = floor(width * height / item_divisor)
    pub item_divisor: usize,
    /// Placement gives up after target * item_attempt_factor samples
    pub item_attempt_factor: usize,
    /// Turn an item shortfall into an error instead of a short maze
    pub strict_items: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            item_divisor: ITEM_DIVISOR,
            item_attempt_factor: ITEM_ATTEMPT_FACTOR,
            strict_items: false,
        }
    }
}

impl GeneratorSettings {
    pub fn item_target(&self, width: usize, height: usize) -> usize {
        if self.item_divisor == 0 {
            return 0;
        }
        width * height / self.item_divisor
    }
}

/// One level of the carving walk: the node and the directions still to try
struct Frame {
    node: Position,
    dirs: [Direction; 4],
    next: usize,
}

impl Frame {
    fn enter(node: Position, rng: &mut GameRng) -> Self {
        let mut dirs = Direction::ALL;
        rng.shuffle(&mut dirs);
        Self { node, dirs, next: 0 }
    }
}

/// Reject sizes the carving walk cannot fill.
///
/// Both sides must be odd and at least 3, and the lattice needs a second
/// node so the exit cannot land on the start.
pub fn validate_dimensions(width: usize, height: usize) -> Result<(), MazeError> {
    let reason = if width < MIN_DIMENSION || height < MIN_DIMENSION {
        Some("each side must be at least 3")
    } else if width % 2 == 0 || height % 2 == 0 {
        Some("dimensions must be odd")
    } else if width == MIN_DIMENSION && height == MIN_DIMENSION {
        Some("a 3x3 maze has no room for an exit")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(MazeError::InvalidDimensions {
            width,
            height,
            reason,
        }),
        None => Ok(()),
    }
}

/// Generate a maze with default item settings
pub fn generate(width: usize, height: usize, rng: &mut GameRng) -> Result<Maze, MazeError> {
    generate_with(width, height, &GeneratorSettings::default(), rng)
}

/// Generate a maze: carve, place start and exit, then scatter items
pub fn generate_with(
    width: usize,
    height: usize,
    settings: &GeneratorSettings,
    rng: &mut GameRng,
) -> Result<Maze, MazeError> {
    validate_dimensions(width, height)?;

    let mut maze = Maze::walled(width, height);
    carve_from(&mut maze, SEED_NODE, rng);
    maze.set_start(SEED_NODE);

    let exit = find_exit(&maze, SEED_NODE).ok_or(MazeError::InvalidDimensions {
        width,
        height,
        reason: "no path cell left for the exit",
    })?;
    maze.set_exit(exit);

    let requested = settings.item_target(width, height);
    maze.set_requested_items(requested);
    let placed = place_items(&mut maze, requested, settings.item_attempt_factor, rng);

    if placed < requested {
        warn!(placed, requested, width, height, "item placement starved");
        if settings.strict_items {
            return Err(MazeError::ItemPlacementStarvation { placed, requested });
        }
    }

    debug!(
        width,
        height,
        exit_x = exit.x,
        exit_y = exit.y,
        items = placed,
        "maze generated"
    );
    Ok(maze)
}

/// Depth-first carve from `origin`, visiting each lattice node exactly once.
///
/// Each frame shuffles its four directions on entry and descends into the
/// first unvisited neighbour before trying the rest, so the visit order is
/// the same as the recursive formulation.
pub fn carve_from(maze: &mut Maze, origin: Position, rng: &mut GameRng) {
    let (width, height) = (maze.width(), maze.height());
    let mut visited = vec![false; width * height];
    let idx = |p: Position| p.y * width + p.x;

    let mut stack = Vec::with_capacity(width * height / 4);
    maze.set_kind(origin, CellKind::Path);
    visited[idx(origin)] = true;
    stack.push(Frame::enter(origin, rng));

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.dirs.len() {
            stack.pop();
            continue;
        }
        let dir = frame.dirs[frame.next];
        frame.next += 1;
        let node = frame.node;

        let Some(target) = node.offset(dir, 2, width, height) else {
            continue;
        };
        if visited[idx(target)] {
            continue;
        }

        // Both in bounds, so the midpoint is too
        let Some(mid) = node.offset(dir, 1, width, height) else {
            continue;
        };
        maze.set_kind(mid, CellKind::Path);
        maze.set_kind(target, CellKind::Path);
        visited[idx(mid)] = true;
        visited[idx(target)] = true;
        stack.push(Frame::enter(target, rng));
    }
}

/// First Path cell (row-major) at the greatest Manhattan distance from `start`
pub fn find_exit(maze: &Maze, start: Position) -> Option<Position> {
    let mut best: Option<(Position, usize)> = None;
    for cell in maze.cells().filter(|c| c.kind == CellKind::Path) {
        let pos = cell.position();
        let dist = pos.manhattan(&start);
        if best.is_none_or(|(_, d)| dist > d) {
            best = Some((pos, dist));
        }
    }
    best.map(|(pos, _)| pos)
}

/// Rejection-sample Path cells into Items. Returns the number placed.
fn place_items(
    maze: &mut Maze,
    target: usize,
    attempt_factor: usize,
    rng: &mut GameRng,
) -> usize {
    let max_attempts = target.saturating_mul(attempt_factor);
    let mut placed = 0;
    let mut attempts = 0;

    while placed < target && attempts < max_attempts {
        attempts += 1;
        let (x, y) = rng.random_coord(maze.width(), maze.height());
        let pos = Position::new(x, y);
        if maze.kind_at(pos) == Some(CellKind::Path) {
            maze.push_item(pos);
            placed += 1;
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_even_and_small() {
        for (w, h) in [(4, 5), (5, 4), (1, 7), (7, 2), (0, 0), (3, 3)] {
            assert!(
                matches!(
                    validate_dimensions(w, h),
                    Err(MazeError::InvalidDimensions { .. })
                ),
                "{w}x{h} should be rejected"
            );
        }
        assert!(validate_dimensions(3, 5).is_ok());
        assert!(validate_dimensions(21, 21).is_ok());
    }

    #[test]
    fn test_generate_rejects_even_dimensions() {
        let mut rng = GameRng::new(1);
        assert!(generate(20, 21, &mut rng).is_err());
    }

    #[test]
    fn test_carve_visits_every_node() {
        let mut rng = GameRng::new(11);
        let mut maze = Maze::walled(9, 7);
        carve_from(&mut maze, SEED_NODE, &mut rng);
        for y in (1..7).step_by(2) {
            for x in (1..9).step_by(2) {
                assert_eq!(maze.kind_at(Position::new(x, y)), Some(CellKind::Path));
            }
        }
        // Border stays solid
        for x in 0..9 {
            assert!(maze.kind_at(Position::new(x, 0)).unwrap().is_wall());
            assert!(maze.kind_at(Position::new(x, 6)).unwrap().is_wall());
        }
        // Even/even cells are never carved
        for y in (0..7).step_by(2) {
            for x in (0..9).step_by(2) {
                assert!(maze.kind_at(Position::new(x, y)).unwrap().is_wall());
            }
        }
    }

    #[test]
    fn test_find_exit_first_maximum_wins() {
        // Two path cells at equal distance 2 from (1,1): (3,1) comes first in scan order
        let mut maze = Maze::walled(5, 5);
        for (x, y) in [(3, 1), (1, 3)] {
            maze.set_kind(Position::new(x, y), CellKind::Path);
        }
        assert_eq!(find_exit(&maze, SEED_NODE), Some(Position::new(3, 1)));
    }

    #[test]
    fn test_find_exit_none_without_paths() {
        let maze = Maze::walled(5, 5);
        assert_eq!(find_exit(&maze, SEED_NODE), None);
    }

    #[test]
    fn test_corridor_maze_exit_at_far_end() {
        // 3 wide: a single corridor down column 1
        let mut rng = GameRng::new(5);
        let maze = generate(3, 9, &mut rng).unwrap();
        assert_eq!(maze.start(), Position::new(1, 1));
        assert_eq!(maze.exit(), Position::new(1, 7));
    }

    #[test]
    fn test_item_starvation_lenient() {
        let settings = GeneratorSettings {
            item_divisor: 1,
            item_attempt_factor: 10,
            strict_items: false,
        };
        let mut rng = GameRng::new(9);
        let maze = generate_with(5, 5, &settings, &mut rng).unwrap();
        assert_eq!(maze.requested_items(), 25);
        assert!(maze.items().len() <= 5);
        assert!(maze.item_shortfall() >= 20);
    }

    #[test]
    fn test_item_starvation_strict() {
        let settings = GeneratorSettings {
            item_divisor: 1,
            item_attempt_factor: 10,
            strict_items: true,
        };
        let mut rng = GameRng::new(9);
        let err = generate_with(5, 5, &settings, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            MazeError::ItemPlacementStarvation { requested: 25, .. }
        ));
    }

    #[test]
    fn test_zero_divisor_means_no_items() {
        let settings = GeneratorSettings {
            item_divisor: 0,
            ..GeneratorSettings::default()
        };
        let mut rng = GameRng::new(2);
        let maze = generate_with(11, 11, &settings, &mut rng).unwrap();
        assert!(maze.items().is_empty());
        assert_eq!(maze.item_shortfall(), 0);
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = generate(15, 11, &mut GameRng::new(1234)).unwrap();
        let b = generate(15, 11, &mut GameRng::new(1234)).unwrap();
        assert_eq!(a, b);
    }
}
