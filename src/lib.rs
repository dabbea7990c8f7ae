//! Sliding-Tile Puzzle Benchmark Library
//!
//! Solves N×N sliding-tile puzzles with A* and compares how many states each
//! heuristic expands on the same randomly generated boards.

pub mod board;
pub mod error;
pub mod experiment;
pub mod generator;
pub mod heuristics;
pub mod persistence;
pub mod search;
pub mod topology;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use board::{format_board, Board};
use error::Error;
use experiment::{ExperimentConfig, ExperimentReport};
use generator::WalkBounds;
use heuristics::Heuristic;
use search::SearchOutcome;
use topology::{Puzzle, EIGHT_PUZZLE, FIFTEEN_PUZZLE, TRIO_PUZZLE, TWENTY_FOUR_PUZZLE};

/// A solved board with the tiles of every step, start first.
#[derive(Clone, Debug)]
pub struct Solution {
    pub outcome: SearchOutcome,
    pub steps: Vec<Vec<u8>>,
}

/// Trait that erases compile-time grid parameters for dynamic dispatch.
///
/// The const generics (`SIDE`, `CELLS`) are hidden behind the vtable so the
/// CLI can pick a grid size at runtime. Boards cross this boundary as plain
/// tile slices.
pub trait PuzzleOps: Sync {
    fn side(&self) -> usize;
    fn run_experiment(&self, config: &ExperimentConfig) -> Result<ExperimentReport, Error>;
    fn generate(&self, bounds: WalkBounds, seed: Option<u64>) -> Result<Vec<u8>, Error>;
    fn solve(&self, tiles: &[u8], heuristic: Heuristic) -> Result<Solution, Error>;
    fn format_board(&self, tiles: &[u8]) -> Result<String, Error>;
}

impl<const SIDE: usize, const CELLS: usize> PuzzleOps for Puzzle<SIDE, CELLS> {
    fn side(&self) -> usize {
        SIDE
    }

    fn run_experiment(&self, config: &ExperimentConfig) -> Result<ExperimentReport, Error> {
        experiment::run(self, config)
    }

    fn generate(&self, bounds: WalkBounds, seed: Option<u64>) -> Result<Vec<u8>, Error> {
        bounds.validate()?;
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let board = generator::generate(self, bounds, &mut rng);
        Ok(board.tiles().to_vec())
    }

    fn solve(&self, tiles: &[u8], heuristic: Heuristic) -> Result<Solution, Error> {
        let start = Board::<CELLS>::from_tiles(tiles)?;
        if !start.is_solvable::<SIDE>() {
            return Err(Error::Unsolvable);
        }

        let path = search::solve_with_path(self, &start, heuristic);
        Ok(Solution {
            outcome: path.outcome,
            steps: path.boards.iter().map(|b| b.tiles().to_vec()).collect(),
        })
    }

    fn format_board(&self, tiles: &[u8]) -> Result<String, Error> {
        let board = Board::<CELLS>::from_tiles(tiles)?;
        Ok(format_board::<SIDE, CELLS>(&board))
    }
}

/// Returns the compiled puzzle definition for a `side`×`side` grid.
pub fn puzzle_for_side(side: usize) -> Result<&'static dyn PuzzleOps, Error> {
    match side {
        0 => Err(Error::InvalidSide),
        2 => Ok(&TRIO_PUZZLE),
        3 => Ok(&EIGHT_PUZZLE),
        4 => Ok(&FIFTEEN_PUZZLE),
        5 => Ok(&TWENTY_FOUR_PUZZLE),
        _ => Err(Error::UnsupportedSide { side }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_lookup() {
        assert_eq!(puzzle_for_side(0).err(), Some(Error::InvalidSide));
        assert_eq!(
            puzzle_for_side(7).err(),
            Some(Error::UnsupportedSide { side: 7 })
        );
        for side in 2..=5 {
            assert_eq!(puzzle_for_side(side).unwrap().side(), side);
        }
    }

    #[test]
    fn test_solve_through_trait() {
        let puzzle = puzzle_for_side(3).unwrap();
        let solution = puzzle
            .solve(&[1, 2, 3, 4, 5, 6, 7, 0, 8], Heuristic::LinearConflict)
            .unwrap();
        assert_eq!(solution.outcome.cost, Some(1));
        assert_eq!(
            solution.steps,
            vec![vec![1, 2, 3, 4, 5, 6, 7, 0, 8], vec![1, 2, 3, 4, 5, 6, 7, 8, 0]]
        );
    }

    #[test]
    fn test_solve_rejects_unsolvable_input() {
        let puzzle = puzzle_for_side(3).unwrap();
        let result = puzzle.solve(&[2, 1, 3, 4, 5, 6, 7, 8, 0], Heuristic::Manhattan);
        assert!(matches!(result, Err(Error::Unsolvable)));

        let result = puzzle.solve(&[1, 2, 3], Heuristic::Manhattan);
        assert!(matches!(result, Err(Error::BoardLength { .. })));
    }

    #[test]
    fn test_generated_tiles_format_and_solve() {
        let puzzle = puzzle_for_side(4).unwrap();
        let tiles = puzzle.generate(WalkBounds::new(6, 6).unwrap(), Some(3)).unwrap();
        assert_eq!(tiles.len(), 16);
        assert_eq!(puzzle.format_board(&tiles).unwrap().lines().count(), 4);

        let solution = puzzle.solve(&tiles, Heuristic::Manhattan).unwrap();
        assert!(solution.outcome.cost.unwrap() <= 6);
    }
}
