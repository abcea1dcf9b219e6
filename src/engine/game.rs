use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::ops;
use super::state::{Direction, Grid, Position, Score};
use crate::config::EngineConfig;
use crate::error::GridError;
use crate::spawn::{RandomSource, TileSource};

/// What a single call to [`Game::make_move`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// True if any tile moved or merged.
    pub changed: bool,
    /// Score added by this move.
    pub gained: Score,
    pub merges: u32,
    /// Where the new tile landed, if one was spawned.
    pub spawned: Option<Position>,
}

/// Everything a presentation layer needs to render the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: Grid,
    pub score: Score,
    pub best_score: Score,
    pub winner: bool,
    pub win_possible: bool,
}

/// The board engine: grid, score, best score and end-of-game flags.
///
/// Moves are accepted until the game is won or no legal move remains; after
/// that, [`Game::make_move`] is a no-op until [`Game::reset`].
///
/// ```
/// use game_2048::engine::{Direction, Game};
///
/// let mut game = Game::seeded(42);
/// assert_eq!(game.grid().count_empty(), 14);
/// let before = game.score();
/// game.make_move(Direction::Left);
/// assert!(game.score() >= before);
/// ```
#[derive(Debug, Clone)]
pub struct Game<S = RandomSource> {
    grid: Grid,
    score: Score,
    best_score: Score,
    winner: bool,
    win_possible: bool,
    config: EngineConfig,
    source: S,
}

impl Game<RandomSource> {
    /// New game with default settings, seeded from OS entropy.
    pub fn new() -> Self {
        Game::with_source(EngineConfig::default(), RandomSource::from_entropy())
    }

    /// New game with default settings and a reproducible spawn sequence.
    pub fn seeded(seed: u64) -> Self {
        Game::with_source(EngineConfig::default(), RandomSource::seeded(seed))
    }
}

impl Default for Game<RandomSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TileSource> Game<S> {
    /// Empty grid with two spawned tiles, drawing spawns from `source`.
    pub fn with_source(config: EngineConfig, source: S) -> Self {
        let mut game = Game {
            grid: Grid::EMPTY,
            score: 0,
            best_score: 0,
            winner: false,
            win_possible: true,
            config,
            source,
        };
        game.spawn_tile();
        game.spawn_tile();
        game
    }

    /// Start from an arbitrary grid with a zero score. No tiles are spawned.
    ///
    /// Every nonzero tile must be a power of two >= 2.
    pub fn from_grid(config: EngineConfig, grid: Grid, source: S) -> Result<Self, GridError> {
        grid.validate()?;
        Ok(Game {
            winner: grid.highest_tile() >= config.target_tile,
            win_possible: !ops::is_terminal(&grid),
            grid,
            score: 0,
            best_score: 0,
            config,
            source,
        })
    }

    /// Slide and merge in `dir`, spawn a tile if anything changed, then
    /// re-evaluate the win and loss flags on the resulting grid.
    pub fn make_move(&mut self, dir: Direction) -> MoveOutcome {
        if self.is_over() {
            return MoveOutcome::default();
        }

        let shift = ops::shift(&self.grid, dir);
        self.grid = shift.grid;
        self.score += shift.gained;
        if shift.highest_merge >= self.config.target_tile {
            self.winner = true;
        }

        let spawned = if shift.changed { self.spawn_tile() } else { None };

        if ops::is_terminal(&self.grid) {
            self.win_possible = false;
        }
        debug!(
            "move {dir}: changed={} gained={} merges={}",
            shift.changed, shift.gained, shift.merges
        );

        if self.is_over() {
            self.best_score = self.best_score.max(self.score);
            if self.winner {
                info!("game won with score {}", self.score);
            } else {
                info!("no moves left; final score {}", self.score);
            }
        }

        MoveOutcome {
            changed: shift.changed,
            gained: shift.gained,
            merges: shift.merges,
            spawned,
        }
    }

    /// Record the best score, clear the grid and start a fresh game.
    pub fn reset(&mut self) {
        self.best_score = self.best_score.max(self.score);
        info!("reset after score {} (best {})", self.score, self.best_score);
        self.grid = Grid::EMPTY;
        self.score = 0;
        self.winner = false;
        self.win_possible = true;
        self.spawn_tile();
        self.spawn_tile();
    }

    /// Place one tile in an empty cell; a full grid is left as is.
    fn spawn_tile(&mut self) -> Option<Position> {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let (mut pos, mut tile) = self.source.next_tile(&empty, self.config.four_probability);
        if !empty.contains(&pos) {
            warn!(
                "tile source chose occupied cell ({}, {}); using first empty cell",
                pos.row, pos.col
            );
            pos = empty[0];
        }
        if tile < 2 || !tile.is_power_of_two() {
            warn!("tile source produced invalid tile {tile}; spawning a 2");
            tile = 2;
        }
        self.grid.set(pos, tile);
        Some(pos)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn best_score(&self) -> Score {
        self.best_score
    }

    /// True once a merge has reached the target tile.
    pub fn is_winner(&self) -> bool {
        self.winner
    }

    /// False once no legal move remains.
    pub fn is_win_possible(&self) -> bool {
        self.win_possible
    }

    /// True if the engine will ignore moves until reset.
    pub fn is_over(&self) -> bool {
        self.winner || !self.win_possible
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            score: self.score,
            best_score: self.best_score,
            winner: self.winner,
            win_possible: self.win_possible,
        }
    }
}
