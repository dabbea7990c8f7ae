//! Board states for the sliding-tile puzzle.
//!
//! A board is a row-major permutation of the labels `0..CELLS`, where 0 is
//! the blank. Boards are plain `Copy` values: a move produces a new board and
//! never mutates one that is already stored in a search structure.

use crate::error::Error;

/// Label of the blank cell.
pub const BLANK: u8 = 0;

/// An immutable board state.
///
/// Ordering is lexicographic over the tile sequence, which the search uses as
/// its last tie-break between frontier entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board<const CELLS: usize> {
    tiles: [u8; CELLS],
}

impl<const CELLS: usize> Board<CELLS> {
    /// The solved board `(1, 2, ..., CELLS - 1, 0)`.
    pub const fn goal() -> Self {
        let mut tiles = [BLANK; CELLS];
        let mut index = 0;
        while index + 1 < CELLS {
            tiles[index] = (index + 1) as u8;
            index += 1;
        }
        Self { tiles }
    }

    /// Builds a board from user-supplied tiles.
    ///
    /// Rejects input of the wrong length and anything that is not a
    /// permutation of `0..CELLS`.
    pub fn from_tiles(tiles: &[u8]) -> Result<Self, Error> {
        if tiles.len() != CELLS {
            return Err(Error::BoardLength {
                expected: CELLS,
                found: tiles.len(),
            });
        }

        let mut seen = [false; CELLS];
        for &tile in tiles {
            let index = tile as usize;
            if index >= CELLS {
                return Err(Error::TileOutOfRange { tile, cells: CELLS });
            }
            if seen[index] {
                return Err(Error::DuplicateTile { tile });
            }
            seen[index] = true;
        }

        let mut board = [BLANK; CELLS];
        board.copy_from_slice(tiles);
        Ok(Self { tiles: board })
    }

    /// The tiles in row-major order.
    #[inline]
    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    /// Linear index of the blank.
    #[inline]
    pub fn blank_index(&self) -> usize {
        // every board holds exactly one blank; the fallback is unreachable
        self.tiles
            .iter()
            .position(|&tile| tile == BLANK)
            .unwrap_or(CELLS - 1)
    }

    /// Returns the board reached by swapping the blank at `blank` with the
    /// tile at `target`.
    #[inline]
    pub fn slide(&self, blank: usize, target: usize) -> Self {
        let mut tiles = self.tiles;
        tiles.swap(blank, target);
        Self { tiles }
    }

    /// Whether this is the solved board.
    #[inline]
    pub fn is_goal(&self) -> bool {
        *self == Self::goal()
    }

    /// Whether the goal can be reached from this board by legal moves.
    ///
    /// Odd sides: the inversion count must be even. Even sides: inversions
    /// plus the blank's row (counted from the top) must be odd.
    pub fn is_solvable<const SIDE: usize>(&self) -> bool {
        let inversions = self.count_inversions();

        if SIDE % 2 == 1 {
            inversions % 2 == 0
        } else {
            let blank_row = self.blank_index() / SIDE;
            (inversions + blank_row) % 2 == 1
        }
    }

    /// Number of tile pairs (blank excluded) that appear in the wrong order.
    fn count_inversions(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != BLANK)
            .map(|(index, &tile)| {
                self.tiles[index + 1..]
                    .iter()
                    .filter(|&&later| later != BLANK && later < tile)
                    .count()
            })
            .sum()
    }
}

/// Formats a board as a grid of right-aligned tile labels.
///
/// The blank shows as '.'.
pub fn format_board<const SIDE: usize, const CELLS: usize>(board: &Board<CELLS>) -> String {
    let width = (CELLS - 1).to_string().len();
    let mut output = String::new();

    for row in board.tiles().chunks(SIDE) {
        let cells: Vec<String> = row
            .iter()
            .map(|&tile| {
                if tile == BLANK {
                    format!("{:>width$}", ".")
                } else {
                    format!("{tile:>width$}")
                }
            })
            .collect();
        output.push_str(&cells.join(" "));
        output.push('\n');
    }

    output
}
