//! Main game loop
//!
//! Owns one maze session: player movement, item pickup, the exit, and the
//! light snapshot that is recomputed after every change.

use std::time::Duration;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::action::{ActionResult, Command, Direction};
use crate::consts::{COLLECT_FLASH_MS, ITEM_SCORE, TIME_BONUS_BASE};
use crate::errors::MazeError;
use crate::lighting::{LightMap, LightingEngine};
use crate::maze::{CellKind, Maze, Position, generate_with};
use crate::options::GameOptions;
use crate::rng::GameRng;

/// Result of a game loop tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameLoopResult {
    /// Continue playing
    Continue,
    /// Player reached the exit
    PlayerWon,
    /// Player quit
    PlayerQuit,
}

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
}

/// Brief highlight left behind on a collected item's cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectFlash {
    pub pos: Position,
    pub remaining_ms: u64,
}

/// Main game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub maze: Maze,
    /// Light snapshot for the current player position
    pub lights: LightMap,
    pub player: Position,
    pub status: GameStatus,
    pub score: u32,
    /// Time bonus awarded on winning
    pub time_bonus: u64,
    pub moves: u32,
    pub collected: HashSet<Position>,
    /// When off, every cell renders fully lit
    pub light_on: bool,
    /// Session time supplied by the front end
    pub elapsed_ms: u64,
    pub flash: Option<CollectFlash>,
    /// Messages for the current turn
    pub messages: Vec<String>,
    /// Seed the current maze was generated from
    pub seed: u64,
    pub rng: GameRng,
    pub options: GameOptions,
}

impl GameState {
    /// Start a session. Uses the configured seed if there is one, otherwise
    /// draws the maze seed from `rng`.
    pub fn new(options: GameOptions, mut rng: GameRng) -> Result<Self, MazeError> {
        let seed = options.seed.unwrap_or_else(|| rng.next_seed());
        let (maze, lights) = Self::build(&options, seed)?;
        let player = maze.start();

        info!(
            seed,
            width = options.width,
            height = options.height,
            items = maze.items().len(),
            "new maze"
        );

        Ok(Self {
            maze,
            lights,
            player,
            status: GameStatus::Playing,
            score: 0,
            time_bonus: 0,
            moves: 0,
            collected: HashSet::new(),
            light_on: true,
            elapsed_ms: 0,
            flash: None,
            messages: vec!["Find the exit. Items glow in the dark.".to_string()],
            seed,
            rng,
            options,
        })
    }

    fn build(options: &GameOptions, seed: u64) -> Result<(Maze, LightMap), MazeError> {
        let mut maze_rng = GameRng::new(seed);
        let maze = generate_with(
            options.width,
            options.height,
            &options.generator_settings(),
            &mut maze_rng,
        )?;
        let lights = LightingEngine::new(options.light_radius)?.compute(&maze, maze.start())?;
        Ok((maze, lights))
    }

    /// Add a message to display
    pub fn message(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    /// Score plus the time bonus once the session is won
    pub fn total_score(&self) -> u64 {
        u64::from(self.score) + self.time_bonus
    }

    pub fn items_total(&self) -> usize {
        self.maze.items().len()
    }

    /// Light level the renderer should use for a cell
    pub fn visible_light(&self, pos: Position) -> f32 {
        if !self.light_on {
            return 1.0;
        }
        self.lights.get(pos.x, pos.y).unwrap_or(0.0)
    }

    /// Recompute the light snapshot around the player
    pub fn refresh_lighting(&mut self) -> Result<(), MazeError> {
        let engine = LightingEngine::new(self.options.light_radius)?;
        self.lights = engine.compute(&self.maze, self.player)?;
        Ok(())
    }
}

/// Bonus for finishing quickly: `floor(5_000_000 / max(elapsed_ms, 1))`
pub fn time_bonus(elapsed_ms: u64) -> u64 {
    TIME_BONUS_BASE / elapsed_ms.max(1)
}

/// The main game loop
pub struct GameLoop {
    state: GameState,
}

impl GameLoop {
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Account for wall-clock time passing. The session clock stops once won.
    pub fn advance_clock(&mut self, dt: Duration) {
        let ms = u64::try_from(dt.as_millis()).unwrap_or(u64::MAX);
        if !self.state.is_won() {
            self.state.elapsed_ms = self.state.elapsed_ms.saturating_add(ms);
        }
        if let Some(flash) = &mut self.state.flash {
            flash.remaining_ms = flash.remaining_ms.saturating_sub(ms);
            if flash.remaining_ms == 0 {
                self.state.flash = None;
            }
        }
    }

    /// Execute a single command
    pub fn tick(&mut self, command: Command) -> GameLoopResult {
        self.state.clear_messages();

        match self.execute_command(command) {
            ActionResult::Quit => GameLoopResult::PlayerQuit,
            ActionResult::Escaped => GameLoopResult::PlayerWon,
            _ => GameLoopResult::Continue,
        }
    }

    fn execute_command(&mut self, command: Command) -> ActionResult {
        if self.state.is_won() && !matches!(command, Command::NewGame | Command::Quit) {
            return ActionResult::Blocked;
        }

        match command {
            Command::Move(dir) => self.do_move(dir),
            Command::Rest => {
                self.relight();
                ActionResult::NoTime
            }
            Command::ToggleLight => {
                self.state.light_on = !self.state.light_on;
                let msg = if self.state.light_on {
                    "The darkness closes in."
                } else {
                    "The maze is fully lit."
                };
                self.state.message(msg);
                ActionResult::NoTime
            }
            Command::NewGame => self.new_game(),
            Command::Quit => ActionResult::Quit,
        }
    }

    fn do_move(&mut self, dir: Direction) -> ActionResult {
        let state = &mut self.state;
        let Some(target) = state
            .player
            .offset(dir, 1, state.maze.width(), state.maze.height())
        else {
            return ActionResult::Blocked;
        };
        if !state.maze.is_walkable(target) {
            return ActionResult::Blocked;
        }

        state.player = target;
        state.moves += 1;

        let result = match state.maze.kind_at(target) {
            Some(CellKind::Item) => {
                state.maze.collect_item(target);
                state.collected.insert(target);
                state.score += ITEM_SCORE;
                state.flash = Some(CollectFlash {
                    pos: target,
                    remaining_ms: COLLECT_FLASH_MS,
                });
                state.message(format!("You pick up a glowing shard. (+{ITEM_SCORE})"));
                info!(x = target.x, y = target.y, score = state.score, "item collected");
                ActionResult::Collected
            }
            Some(CellKind::Exit) => {
                state.status = GameStatus::Won;
                state.time_bonus = time_bonus(state.elapsed_ms);
                state.message(format!(
                    "You escaped! Final score: {} (time bonus {})",
                    state.total_score(),
                    state.time_bonus
                ));
                info!(
                    score = state.score,
                    bonus = state.time_bonus,
                    moves = state.moves,
                    elapsed_ms = state.elapsed_ms,
                    "maze escaped"
                );
                ActionResult::Escaped
            }
            _ => ActionResult::Moved,
        };

        self.relight();
        result
    }

    fn new_game(&mut self) -> ActionResult {
        let configured = self.state.options.seed;
        let options = GameOptions {
            seed: Some(self.state.rng.next_seed()),
            ..self.state.options.clone()
        };
        match GameState::new(options, self.state.rng.clone()) {
            Ok(mut state) => {
                // Restarts keep drawing fresh seeds
                state.options.seed = configured;
                self.state = state;
            }
            Err(e) => self.state.message(format!("Could not build a new maze: {e}")),
        }
        ActionResult::NoTime
    }

    fn relight(&mut self) {
        if let Err(e) = self.state.refresh_lighting() {
            self.state.message(format!("Lighting failed: {e}"));
        }
    }
}
