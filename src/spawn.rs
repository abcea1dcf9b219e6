//! Tile spawning behind an injectable source of randomness.
//!
//! The engine never touches a global RNG. It asks a [`TileSource`] for the
//! next (position, value) pair, so tests can either seed a real RNG or feed a
//! fixed script of spawns.

use std::collections::VecDeque;

use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Position, Tile};

/// Chooses where the next tile appears and what it is worth.
pub trait TileSource {
    /// Pick one of `empty` (never empty when called) and a tile value; a 4
    /// should come up with probability `four_probability`, otherwise a 2.
    fn next_tile(&mut self, empty: &[Position], four_probability: f64) -> (Position, Tile);
}

/// Uniform spawns drawn from any `rand` RNG.
#[derive(Debug, Clone)]
pub struct RandomSource<R = StdRng> {
    rng: R,
}

impl RandomSource<StdRng> {
    /// Deterministic source seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        RandomSource::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        RandomSource::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource<R> {
    pub fn new(rng: R) -> Self {
        RandomSource { rng }
    }
}

impl<R: Rng> TileSource for RandomSource<R> {
    fn next_tile(&mut self, empty: &[Position], four_probability: f64) -> (Position, Tile) {
        let pos = empty[self.rng.gen_range(0..empty.len())];
        let tile = if self.rng.gen::<f64>() < four_probability { 4 } else { 2 };
        (pos, tile)
    }
}

/// Replays a fixed sequence of spawns, for reproducible test scenarios.
///
/// If a scripted position is occupied, or the script runs out, the first
/// empty cell gets a 2 and a warning is logged.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: VecDeque<(Position, Tile)>,
}

impl ScriptedSource {
    pub fn new<I>(spawns: I) -> Self
    where
        I: IntoIterator<Item = (Position, Tile)>,
    {
        ScriptedSource {
            script: spawns.into_iter().collect(),
        }
    }

    /// Append another spawn to the end of the script.
    pub fn push(&mut self, pos: Position, tile: Tile) {
        self.script.push_back((pos, tile));
    }

    /// Spawns not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl TileSource for ScriptedSource {
    fn next_tile(&mut self, empty: &[Position], _four_probability: f64) -> (Position, Tile) {
        match self.script.pop_front() {
            Some((pos, tile)) if empty.contains(&pos) => (pos, tile),
            Some((pos, _)) => {
                warn!(
                    "scripted spawn at ({}, {}) is occupied; using first empty cell",
                    pos.row, pos.col
                );
                (empty[0], 2)
            }
            None => {
                warn!("spawn script exhausted; using first empty cell");
                (empty[0], 2)
            }
        }
    }
}
