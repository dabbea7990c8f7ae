//! Typed errors for configuration and board input.
//!
//! These are raised before any search work begins. A search that exhausts
//! its frontier is not an error; it is reported through
//! [`crate::search::SearchOutcome`].

/// Failure to build a puzzle, a board or an experiment from caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Grid side of zero.
    InvalidSide,
    /// Grid side with no compiled puzzle definition.
    UnsupportedSide { side: usize },
    /// Experiment configured with zero trials.
    ZeroTrials,
    /// Experiment configured without any heuristic to compare.
    NoHeuristics,
    /// Random walk bounds where the minimum exceeds the maximum.
    InvalidWalkBounds { min_moves: usize, max_moves: usize },
    /// Distinct start states requested but the generator kept repeating.
    DistinctStatesExhausted { requested: usize, found: usize },
    /// Board input with the wrong number of tiles.
    BoardLength { expected: usize, found: usize },
    /// Board input with a label outside `0..cells`.
    TileOutOfRange { tile: u8, cells: usize },
    /// Board input with a label repeated.
    DuplicateTile { tile: u8 },
    /// Board input that is a permutation but cannot reach the goal.
    Unsolvable,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSide => write!(f, "grid side must be at least 1"),
            Self::UnsupportedSide { side } => {
                write!(f, "no puzzle definition for a {side}x{side} grid")
            }
            Self::ZeroTrials => write!(f, "trial count must be at least 1"),
            Self::NoHeuristics => write!(f, "at least one heuristic is required"),
            Self::InvalidWalkBounds {
                min_moves,
                max_moves,
            } => write!(
                f,
                "min_moves ({min_moves}) must not exceed max_moves ({max_moves})"
            ),
            Self::DistinctStatesExhausted { requested, found } => write!(
                f,
                "only found {found} distinct start states out of {requested} requested"
            ),
            Self::BoardLength { expected, found } => {
                write!(f, "expected {expected} tiles, found {found}")
            }
            Self::TileOutOfRange { tile, cells } => {
                write!(f, "tile {tile} is outside 0..{cells}")
            }
            Self::DuplicateTile { tile } => write!(f, "tile {tile} appears more than once"),
            Self::Unsolvable => write!(f, "board cannot reach the goal state"),
        }
    }
}

impl std::error::Error for Error {}
