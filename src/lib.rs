//! game-2048: the board engine for a 4x4 sliding-tile merge game
//!
//! This crate provides:
//! - An owned `Grid` type plus pure slide/merge helpers (`engine::shift`, `engine::is_terminal`)
//! - The stateful `Game` engine with score, best score and win/loss flags
//! - A `TileSource` seam for tile spawning, with seeded and scripted implementations
//!   (`spawn` module)
//! - TOML-loadable engine settings (`config` module)
//!
//! Quick start:
//! ```
//! use game_2048::engine::{Direction, Game};
//!
//! // Deterministic game with a seeded spawner
//! let mut game = Game::seeded(42);
//! game.make_move(Direction::Left);
//! println!("{}score: {}", game.grid(), game.score());
//! assert!(game.is_win_possible());
//! ```
//!
//! Scripted spawns for reproducible scenarios:
//! ```
//! use game_2048::config::EngineConfig;
//! use game_2048::engine::{Direction, Game, Grid, Position};
//! use game_2048::spawn::ScriptedSource;
//!
//! let grid = Grid::from_rows([[2, 0, 2, 0], [0; 4], [0; 4], [0; 4]]);
//! let spawns = ScriptedSource::new([(Position::new(3, 3), 2)]);
//! let mut game = Game::from_grid(EngineConfig::default(), grid, spawns)?;
//! game.make_move(Direction::Right);
//! assert_eq!(game.grid().rows()[0], [0, 0, 0, 4]);
//! assert_eq!(game.score(), 4);
//! # Ok::<(), game_2048::error::GridError>(())
//! ```
//!
pub mod config;
pub mod engine;
pub mod error;
pub mod spawn;
