//! Engine module: the owned 4x4 grid, the slide/merge routine and the
//! stateful game that ties them to a tile spawner.
//!
//! - `Grid` is the plain value type with read-only helpers.
//! - `shift`/`is_terminal` are pure functions over a grid.
//! - `Game` owns the grid, score and flags and is the only thing that mutates them.

mod game;
mod ops;
pub mod state;

pub use game::{Game, MoveOutcome, Snapshot};
pub use ops::{can_move, is_terminal, shift, Shift};
pub use state::{Direction, Grid, Position, Score, Tile, SIZE};
