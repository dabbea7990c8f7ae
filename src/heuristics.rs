//! Distance estimates for A*.
//!
//! Each heuristic is a pure function of the board that estimates the number
//! of moves left. They are ordered by strength: for every board,
//! `Misplaced <= Manhattan <= LinearConflict`. The blank never contributes.
//!
//! `LinearConflict` charges two moves for every reversed pair in a line. When
//! three or more tiles in one line are mutually reversed this is more than the
//! classic "tiles to remove" count, so long searches under it may settle on a
//! path slightly longer than optimal.

use std::fmt;

use crate::board::{Board, BLANK};
use crate::topology::Puzzle;

/// The closed set of heuristics the benchmark compares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Heuristic {
    /// Number of tiles not on their goal cell.
    #[value(name = "h1")]
    Misplaced,
    /// Sum of row and column distances to each tile's goal cell.
    #[value(name = "h2")]
    Manhattan,
    /// Manhattan distance plus two moves per linear conflict.
    #[value(name = "h3")]
    LinearConflict,
}

impl Heuristic {
    /// All heuristics, weakest first.
    pub const ALL: [Heuristic; 3] = [
        Heuristic::Misplaced,
        Heuristic::Manhattan,
        Heuristic::LinearConflict,
    ];

    /// Short name used in reports and CSV files.
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Misplaced => "h1",
            Heuristic::Manhattan => "h2",
            Heuristic::LinearConflict => "h3",
        }
    }

    /// Parses a short name as written by [`Heuristic::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.name() == name)
    }

    /// Estimates the moves left from `board` to the goal.
    pub fn evaluate<const SIDE: usize, const CELLS: usize>(
        self,
        puzzle: &Puzzle<SIDE, CELLS>,
        board: &Board<CELLS>,
    ) -> u32 {
        match self {
            Heuristic::Misplaced => misplaced(puzzle, board),
            Heuristic::Manhattan => manhattan(puzzle, board),
            Heuristic::LinearConflict => {
                manhattan(puzzle, board) + 2 * linear_conflicts(puzzle, board)
            }
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counts tiles that are not on their goal cell.
pub fn misplaced<const SIDE: usize, const CELLS: usize>(
    puzzle: &Puzzle<SIDE, CELLS>,
    board: &Board<CELLS>,
) -> u32 {
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(index, &tile)| {
            let (goal_row, goal_col) = puzzle.goal_position(tile);
            tile != BLANK && index != goal_row as usize * SIDE + goal_col as usize
        })
        .count() as u32
}

/// Sums each tile's row and column distance to its goal cell.
pub fn manhattan<const SIDE: usize, const CELLS: usize>(
    puzzle: &Puzzle<SIDE, CELLS>,
    board: &Board<CELLS>,
) -> u32 {
    let mut distance = 0;

    for (index, &tile) in board.tiles().iter().enumerate() {
        if tile == BLANK {
            continue;
        }
        let (goal_row, goal_col) = puzzle.goal_position(tile);
        let row = index / SIDE;
        let col = index % SIDE;
        distance += row.abs_diff(goal_row as usize) + col.abs_diff(goal_col as usize);
    }

    distance as u32
}

/// Counts linear conflicts across all rows and columns.
///
/// Two tiles conflict when both sit in the row (or column) they belong to
/// but in the opposite order from the goal. Resolving a conflict forces one
/// of them out of the line and back, which Manhattan distance does not
/// charge for. Row and column conflicts are counted independently, so a
/// tile may contribute to both.
pub fn linear_conflicts<const SIDE: usize, const CELLS: usize>(
    puzzle: &Puzzle<SIDE, CELLS>,
    board: &Board<CELLS>,
) -> u32 {
    let tiles = board.tiles();
    let mut conflicts = 0;

    // goal offset along the line of every tile that belongs in it, in
    // current order
    let mut line = [0u8; SIDE];

    for row in 0..SIDE {
        let mut len = 0;
        for col in 0..SIDE {
            let tile = tiles[row * SIDE + col];
            let (goal_row, goal_col) = puzzle.goal_position(tile);
            if tile != BLANK && goal_row as usize == row {
                line[len] = goal_col;
                len += 1;
            }
        }
        conflicts += count_reversed_pairs(&line[..len]);
    }

    for col in 0..SIDE {
        let mut len = 0;
        for row in 0..SIDE {
            let tile = tiles[row * SIDE + col];
            let (goal_row, goal_col) = puzzle.goal_position(tile);
            if tile != BLANK && goal_col as usize == col {
                line[len] = goal_row;
                len += 1;
            }
        }
        conflicts += count_reversed_pairs(&line[..len]);
    }

    conflicts
}

/// Number of pairs `i < j` with `goals[i] > goals[j]`.
fn count_reversed_pairs(goals: &[u8]) -> u32 {
    let mut pairs = 0;
    for (i, &earlier) in goals.iter().enumerate() {
        pairs += goals[i + 1..].iter().filter(|&&later| earlier > later).count() as u32;
    }
    pairs
}
