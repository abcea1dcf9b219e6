use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, ParseDirectionError};

/// Side length of the square grid.
pub const SIZE: usize = 4;

/// Tile value as shown to the player (0 for empty, otherwise 2, 4, 8, ...).
pub type Tile = u32;
pub type Score = u64;

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Lowercase name, e.g. for logs and prompts.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts full names, WASD and vi keys (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" | "k" => Ok(Direction::Up),
            "down" | "s" | "j" => Ok(Direction::Down),
            "left" | "a" | "h" => Ok(Direction::Left),
            "right" | "d" | "l" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.trim().to_string())),
        }
    }
}

/// A cell coordinate; row 0 is the top, column 0 is the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// Owned 4x4 grid of tile values, indexed `[row][col]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Grid([[Tile; SIZE]; SIZE]);

impl Grid {
    /// A constant empty grid (all zeros).
    pub const EMPTY: Grid = Grid([[0; SIZE]; SIZE]);

    /// Build a grid from row-major rows.
    #[inline]
    pub const fn from_rows(rows: [[Tile; SIZE]; SIZE]) -> Self {
        Grid(rows)
    }

    /// Borrow the rows, top to bottom.
    #[inline]
    pub fn rows(&self) -> &[[Tile; SIZE]; SIZE] {
        &self.0
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Tile {
        self.0[pos.row][pos.col]
    }

    #[inline]
    pub(crate) fn set(&mut self, pos: Position, tile: Tile) {
        self.0[pos.row][pos.col] = tile;
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Grid {
        let mut out = Grid::EMPTY;
        for (r, row) in self.0.iter().enumerate() {
            for (c, &tile) in row.iter().enumerate() {
                out.0[c][r] = tile;
            }
        }
        out
    }

    /// Iterate over `(position, tile)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.0.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &tile)| (Position::new(r, c), tile))
        })
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells()
            .filter(|&(_, tile)| tile == 0)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Count the number of empty cells on the grid.
    pub fn count_empty(&self) -> usize {
        self.cells().filter(|&(_, tile)| tile == 0).count()
    }

    /// Check that every nonzero tile is a power of two >= 2.
    pub fn validate(&self) -> Result<(), GridError> {
        match self.cells().find(|&(_, t)| t != 0 && (t < 2 || !t.is_power_of_two())) {
            Some((pos, value)) => Err(GridError::InvalidTile {
                row: pos.row,
                col: pos.col,
                value,
            }),
            None => Ok(()),
        }
    }

    /// Return the highest tile value present (0 for an empty grid).
    pub fn highest_tile(&self) -> Tile {
        self.cells().map(|(_, tile)| tile).max().unwrap_or(0)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({:?})", self.0)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(SIZE * 8);
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                writeln!(f, "{rule}")?;
            }
            let cells: Vec<String> = row.iter().map(|&t| format_val(t)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

/// Centre a tile value in a 7-character cell; empty cells render as blanks.
fn format_val(val: Tile) -> String {
    match val {
        0 => " ".repeat(7),
        x => format!("{x:^7}"),
    }
}
