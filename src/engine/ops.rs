//! Slide/merge along one line, reused for every direction through
//! `line_positions`, plus terminal-state detection.

use super::state::{Direction, Grid, Position, Score, Tile, SIZE};

/// Outcome of sliding a whole grid in one direction (no random insert).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    /// Grid after sliding and merging.
    pub grid: Grid,
    /// Sum of every merged tile value produced by this shift.
    pub gained: Score,
    /// Number of merges across all lines.
    pub merges: u32,
    /// Largest tile produced by a merge (0 when nothing merged).
    pub highest_merge: Tile,
    /// True if any tile moved or merged.
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct LineShift {
    pub gained: Score,
    pub merges: u32,
    pub highest_merge: Tile,
}

/// Cell positions of line `idx` for `dir`, ordered from the leading edge
/// (the side tiles move toward) to the trailing edge.
pub(crate) fn line_positions(dir: Direction, idx: usize) -> [Position; SIZE] {
    std::array::from_fn(|k| match dir {
        Direction::Left => Position::new(idx, k),
        Direction::Right => Position::new(idx, SIZE - 1 - k),
        Direction::Up => Position::new(k, idx),
        Direction::Down => Position::new(SIZE - 1 - k, idx),
    })
}

/// Slide one line toward index 0, merging equal neighbours at most once each.
pub(crate) fn slide_line(line: [Tile; SIZE]) -> ([Tile; SIZE], LineShift) {
    let mut out = [0; SIZE];
    let mut stats = LineShift::default();
    let mut next = 0;
    let mut pending: Option<Tile> = None;

    for tile in line.into_iter().filter(|&t| t != 0) {
        match pending {
            None => pending = Some(tile),
            Some(p) if p == tile => {
                let merged = p * 2;
                out[next] = merged;
                next += 1;
                stats.gained += Score::from(merged);
                stats.merges += 1;
                stats.highest_merge = stats.highest_merge.max(merged);
                pending = None;
            }
            Some(p) => {
                out[next] = p;
                next += 1;
                pending = Some(tile);
            }
        }
    }
    if let Some(p) = pending {
        out[next] = p;
    }
    (out, stats)
}

/// Slide/merge every line of `grid` in `dir`. No randomness.
pub fn shift(grid: &Grid, dir: Direction) -> Shift {
    let mut out = Grid::EMPTY;
    let mut gained = 0;
    let mut merges = 0;
    let mut highest_merge = 0;

    for idx in 0..SIZE {
        let positions = line_positions(dir, idx);
        let line = positions.map(|pos| grid.get(pos));
        let (slid, stats) = slide_line(line);
        for (pos, tile) in positions.into_iter().zip(slid) {
            out.set(pos, tile);
        }
        gained += stats.gained;
        merges += stats.merges;
        highest_merge = highest_merge.max(stats.highest_merge);
    }

    Shift {
        changed: out != *grid,
        grid: out,
        gained,
        merges,
        highest_merge,
    }
}

/// True if sliding in `dir` would change the grid.
pub fn can_move(grid: &Grid, dir: Direction) -> bool {
    shift(grid, dir).changed
}

/// True if no move in any direction is legal: the grid is full and no two
/// horizontally or vertically adjacent cells hold the same value.
pub fn is_terminal(grid: &Grid) -> bool {
    !rows_have_move(grid) && !rows_have_move(&grid.transpose())
}

fn rows_have_move(grid: &Grid) -> bool {
    grid.rows().iter().any(|row| {
        row.contains(&0) || row.windows(2).any(|pair| pair[0] == pair[1])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slid(line: [Tile; SIZE]) -> [Tile; SIZE] {
        slide_line(line).0
    }

    fn single_row(row: [Tile; SIZE]) -> Grid {
        Grid::from_rows([row, [0; SIZE], [0; SIZE], [0; SIZE]])
    }

    #[test]
    fn it_slide_line() {
        assert_eq!(slid([0, 0, 0, 0]), [0, 0, 0, 0]);
        assert_eq!(slid([2, 4, 2, 4]), [2, 4, 2, 4]);
        assert_eq!(slid([2, 2, 4, 4]), [4, 8, 0, 0]);
        assert_eq!(slid([2, 0, 0, 2]), [4, 0, 0, 0]);
        assert_eq!(slid([0, 0, 0, 2]), [2, 0, 0, 0]);
        assert_eq!(slid([2, 2, 2, 0]), [4, 2, 0, 0]);
        assert_eq!(slid([2, 2, 2, 2]), [4, 4, 0, 0]);
        assert_eq!(slid([4, 4, 8, 0]), [8, 8, 0, 0]);
    }

    #[test]
    fn it_slide_line_scores_each_merge() {
        let (_, stats) = slide_line([2, 2, 2, 2]);
        assert_eq!(stats.gained, 8);
        assert_eq!(stats.merges, 2);

        let (_, stats) = slide_line([2, 2, 4, 4]);
        assert_eq!(stats.gained, 12);
        assert_eq!(stats.highest_merge, 8);

        let (_, stats) = slide_line([2, 4, 8, 16]);
        assert_eq!(stats, LineShift::default());
    }

    #[test]
    fn test_shift_left_right() {
        let g = single_row([2, 0, 2, 0]);
        assert_eq!(shift(&g, Direction::Left).grid, single_row([4, 0, 0, 0]));
        assert_eq!(shift(&g, Direction::Right).grid, single_row([0, 0, 0, 4]));

        let g = single_row([2, 4, 4, 0]);
        assert_eq!(shift(&g, Direction::Right).grid, single_row([0, 0, 2, 8]));
    }

    #[test]
    fn test_shift_up_down() {
        let g = Grid::from_rows([[2, 0, 0, 4], [2, 0, 0, 0], [4, 0, 0, 4], [4, 0, 8, 0]]);

        let up = shift(&g, Direction::Up);
        assert_eq!(
            up.grid,
            Grid::from_rows([[4, 0, 8, 8], [8, 0, 0, 0], [0; SIZE], [0; SIZE]])
        );
        assert_eq!(up.gained, 4 + 8 + 8);
        assert_eq!(up.merges, 3);

        let down = shift(&g, Direction::Down);
        assert_eq!(
            down.grid,
            Grid::from_rows([[0; SIZE], [0; SIZE], [4, 0, 0, 0], [8, 0, 8, 8]])
        );
    }

    #[test]
    fn test_shift_columns_match_transposed_rows() {
        let g = Grid::from_rows([[2, 4, 8, 2], [2, 0, 8, 4], [0, 4, 2, 4], [16, 4, 2, 0]]);
        let via_transpose = shift(&g.transpose(), Direction::Left).grid.transpose();
        assert_eq!(shift(&g, Direction::Up).grid, via_transpose);
        let via_transpose = shift(&g.transpose(), Direction::Right).grid.transpose();
        assert_eq!(shift(&g, Direction::Down).grid, via_transpose);
    }

    #[test]
    fn test_shift_reports_unchanged() {
        let g = single_row([2, 4, 8, 16]);
        let s = shift(&g, Direction::Left);
        assert!(!s.changed);
        assert_eq!(s.grid, g);
        assert!(can_move(&g, Direction::Down));
        assert!(!can_move(&g, Direction::Up));
    }

    #[test]
    fn it_is_terminal() {
        let stuck = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(is_terminal(&stuck));

        let horizontal_pair =
            Grid::from_rows([[2, 2, 8, 4], [4, 8, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(!is_terminal(&horizontal_pair));

        let vertical_pair =
            Grid::from_rows([[2, 4, 2, 4], [2, 8, 4, 2], [8, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(!is_terminal(&vertical_pair));

        let one_gap = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 0, 4], [4, 2, 4, 2]]);
        assert!(!is_terminal(&one_gap));
    }

    #[test]
    fn test_terminal_agrees_with_shift() {
        let grids = [
            Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]),
            Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 4]]),
            Grid::from_rows([
                [8, 16, 32, 64],
                [16, 32, 64, 128],
                [32, 64, 128, 256],
                [64, 128, 256, 2],
            ]),
        ];
        for g in grids {
            let any_move = Direction::ALL.iter().any(|&d| can_move(&g, d));
            assert_eq!(is_terminal(&g), !any_move, "{g}");
        }
    }
}
