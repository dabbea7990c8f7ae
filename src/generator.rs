//! Random start states for the benchmark.
//!
//! States are produced by walking the blank away from the goal with legal
//! moves, so every generated board is solvable without a parity check.

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::error::Error;
use crate::topology::{Puzzle, MAX_NEIGHBORS};

/// Inclusive range for the length of the random walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkBounds {
    pub min_moves: usize,
    pub max_moves: usize,
}

impl WalkBounds {
    pub fn new(min_moves: usize, max_moves: usize) -> Result<Self, Error> {
        let bounds = Self {
            min_moves,
            max_moves,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Rejects bounds where the minimum exceeds the maximum.
    pub fn validate(&self) -> Result<(), Error> {
        if self.min_moves > self.max_moves {
            return Err(Error::InvalidWalkBounds {
                min_moves: self.min_moves,
                max_moves: self.max_moves,
            });
        }
        Ok(())
    }
}

impl Default for WalkBounds {
    fn default() -> Self {
        Self {
            min_moves: 5,
            max_moves: 10,
        }
    }
}

/// Generates a solvable board with a walk length drawn uniformly from
/// `bounds`.
///
/// Assumes `bounds` is valid; an inverted range is treated as `min..=min`.
pub fn generate<const SIDE: usize, const CELLS: usize, R: Rng + ?Sized>(
    puzzle: &Puzzle<SIDE, CELLS>,
    bounds: WalkBounds,
    rng: &mut R,
) -> Board<CELLS> {
    let moves = rng.gen_range(bounds.min_moves..=bounds.max_moves.max(bounds.min_moves));
    trace!("random walk of {moves} moves");
    walk(puzzle, moves, rng)
}

/// Moves the blank `moves` times from the goal.
///
/// Each step picks uniformly among the blank's neighbours, leaving out the
/// cell the blank just came from unless that is the only option.
pub fn walk<const SIDE: usize, const CELLS: usize, R: Rng + ?Sized>(
    puzzle: &Puzzle<SIDE, CELLS>,
    moves: usize,
    rng: &mut R,
) -> Board<CELLS> {
    let mut board = Board::<CELLS>::goal();
    let mut blank = board.blank_index();
    let mut previous: Option<usize> = None;

    for _ in 0..moves {
        let neighbors = puzzle.neighbors(blank);

        let mut candidates = [0u8; MAX_NEIGHBORS];
        let mut count = 0;
        for &cell in neighbors {
            if Some(cell as usize) != previous {
                candidates[count] = cell;
                count += 1;
            }
        }
        let choices = if count > 0 {
            &candidates[..count]
        } else {
            neighbors
        };

        // a 1x1 grid has nowhere to move
        let Some(&next) = choices.choose(rng) else {
            break;
        };

        board = board.slide(blank, next as usize);
        previous = Some(blank);
        blank = next as usize;
    }

    board
}
