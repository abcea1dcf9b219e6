use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use game_2048::config::EngineConfig;
use game_2048::engine::{can_move, Direction, Game, Grid, Score, Tile};
use game_2048::spawn::RandomSource;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(
    name = "selfplay",
    version,
    about = "Play many 2048 games with a fixed-priority policy and report score statistics"
)]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 1000)]
    games: u64,

    /// Base seed; game `i` uses seed `seed + i`
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Engine settings file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stop each game after this many moves
    #[arg(long)]
    max_moves: Option<u64>,

    /// Number of worker threads (defaults to Rayon default)
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,
}

/// Corner-hugging preference order: keep big tiles in the bottom-left.
const PREFERENCE: [Direction; 4] = [
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::Up,
];

#[derive(Debug, Clone, Copy)]
struct GameResult {
    score: Score,
    moves: u64,
    highest_tile: Tile,
    won: bool,
}

/// First direction in `PREFERENCE` that changes the grid.
fn choose_move(grid: &Grid) -> Option<Direction> {
    PREFERENCE.into_iter().find(|&dir| can_move(grid, dir))
}

fn play_one(config: EngineConfig, seed: u64, max_moves: Option<u64>) -> GameResult {
    let mut game = Game::with_source(config, RandomSource::seeded(seed));
    let mut moves = 0;
    while !game.is_over() {
        if max_moves.is_some_and(|limit| moves >= limit) {
            break;
        }
        let Some(dir) = choose_move(game.grid()) else {
            break;
        };
        game.make_move(dir);
        moves += 1;
    }
    GameResult {
        score: game.score(),
        moves,
        highest_tile: game.grid().highest_tile(),
        won: game.is_winner(),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(n) = args.workers {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("configuring worker pool")?;
    }

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(args.games);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} games ({eta})",
            )?
            .progress_chars("=>-"),
        );
        pb
    };

    let start = Instant::now();
    let results: Vec<GameResult> = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let r = play_one(config.clone(), args.seed.wrapping_add(i), args.max_moves);
            pb.inc(1);
            r
        })
        .collect();
    pb.finish_and_clear();

    let elapsed = start.elapsed().as_secs_f64().max(1e-6);
    info!("played {} games in {:.2}s", results.len(), elapsed);
    print_summary(&results, elapsed);
    Ok(())
}

fn print_summary(results: &[GameResult], elapsed: f64) {
    if results.is_empty() {
        println!("No games played.");
        return;
    }
    let n = results.len() as f64;
    let total_score: Score = results.iter().map(|r| r.score).sum();
    let total_moves: u64 = results.iter().map(|r| r.moves).sum();
    let best = results.iter().map(|r| r.score).max().unwrap_or(0);
    let wins = results.iter().filter(|r| r.won).count();

    let mut tiles: BTreeMap<Tile, usize> = BTreeMap::new();
    for r in results {
        *tiles.entry(r.highest_tile).or_default() += 1;
    }

    println!("Games: {} | moves/sec: {:.1}", results.len(), (total_moves as f64) / elapsed);
    println!("Mean score: {:.1} | Best score: {}", (total_score as f64) / n, best);
    println!("Win rate: {:.2}% ({} wins)", 100.0 * (wins as f64) / n, wins);
    println!("Highest tile reached:");
    for (tile, count) in tiles.iter().rev() {
        println!("  {:>6}: {:>6} ({:.1}%)", tile, count, 100.0 * (*count as f64) / n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_prefers_down() {
        let grid = Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(choose_move(&grid), Some(Direction::Down));
    }

    #[test]
    fn it_falls_through_to_legal_move() {
        let grid = Grid::from_rows([[0; 4], [0; 4], [0; 4], [2, 4, 8, 16]]);
        assert_eq!(choose_move(&grid), Some(Direction::Up));
    }

    #[test]
    fn it_plays_to_completion() {
        let r = play_one(EngineConfig::default(), 11, None);
        assert!(r.moves > 0);
        assert!(r.score > 0);
        assert!(r.highest_tile >= 4);
    }

    #[test]
    fn it_respects_move_cap() {
        let r = play_one(EngineConfig::default(), 11, Some(5));
        assert!(r.moves <= 5);
    }
}
