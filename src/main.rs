use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use game_2048::config::EngineConfig;
use game_2048::engine::{Direction, Game};
use game_2048::error::ParseDirectionError;
use game_2048::spawn::{RandomSource, TileSource};

#[derive(Debug, Parser)]
#[command(
    name = "game-2048",
    version,
    about = "Play 2048 in the terminal: one command per line (w/a/s/d, h/j/k/l, or up/down/left/right; r resets, q quits)"
)]
struct Args {
    /// Seed for tile spawns (drawn from OS entropy if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Engine settings file (TOML); defaults are used if it does not exist
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a JSON snapshot after every command instead of the grid
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move(Direction),
    Reset,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, ParseDirectionError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "r" | "reset" | "new" => Ok(Command::Reset),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => other.parse().map(Command::Move),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = match &args.config {
        Some(path) => EngineConfig::load_or_default(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let source = match args.seed {
        Some(seed) => RandomSource::seeded(seed),
        None => RandomSource::from_entropy(),
    };
    let mut game = Game::with_source(config, source);

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    render(&mut out, &game, args.json)?;

    for line in stdin.lock().lines() {
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Reset) => game.reset(),
            Ok(Command::Move(dir)) => {
                game.make_move(dir);
                if game.is_over() {
                    announce(&mut out, &game, args.json)?;
                    game.reset();
                }
            }
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        }
        render(&mut out, &game, args.json)?;
    }
    Ok(())
}

fn render<W: Write, S: TileSource>(out: &mut W, game: &Game<S>, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, &game.snapshot())?;
        writeln!(out)?;
    } else {
        write!(out, "{}", game.grid())?;
        writeln!(out, "Score: {} | Best: {}", game.score(), game.best_score())?;
    }
    out.flush()?;
    Ok(())
}

/// Tell the player how the game ended before it is reset.
fn announce<W: Write, S: TileSource>(out: &mut W, game: &Game<S>, json: bool) -> Result<()> {
    if json {
        return render(out, game, true);
    }
    write!(out, "{}", game.grid())?;
    if game.is_winner() {
        writeln!(
            out,
            "You win! You reached {}. Final score: {}",
            game.config().target_tile,
            game.score()
        )?;
    } else {
        writeln!(out, "Game over! Final score: {}", game.score())?;
    }
    writeln!(out, "Starting a new game.")?;
    Ok(())
}
