//! A* search from a start board to the goal.
//!
//! Key points:
//! - Min-priority frontier on `f = g + h`, ties broken by lower `g`, then by
//!   the lexicographically smaller board
//! - Lazy deletion: improved entries are pushed again and stale copies are
//!   dropped when popped, since `BinaryHeap` has no decrease-key
//! - FxHashMap/FxHashSet for the best-g map, closed set and parent links
//! - Every structure is owned by one call and dropped when it returns

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::Board;
use crate::heuristics::Heuristic;
use crate::topology::Puzzle;

/// Cost reported in tables and CSV files when the goal is unreachable.
pub const UNREACHABLE_COST: i64 = -1;

/// Result of one search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Moves on the shortest path found, or `None` if the frontier ran dry.
    pub cost: Option<u32>,
    /// Number of states finalized, counted once per state.
    pub expanded: u64,
}

impl SearchOutcome {
    /// Path cost with [`UNREACHABLE_COST`] standing in for "no path".
    pub fn reported_cost(&self) -> i64 {
        self.cost.map_or(UNREACHABLE_COST, i64::from)
    }

    pub fn is_solved(&self) -> bool {
        self.cost.is_some()
    }
}

/// Search result together with the boards along the path.
#[derive(Clone, Debug)]
pub struct SearchPath<const CELLS: usize> {
    pub outcome: SearchOutcome,
    /// Boards from start to goal inclusive; empty when unreachable.
    pub boards: Vec<Board<CELLS>>,
}

/// Frontier ordering key.
///
/// Field order is the comparison order: `f`, then `g`, then the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierKey<const CELLS: usize> {
    f: u32,
    g: u32,
    board: Board<CELLS>,
}

/// Finds the shortest path cost from `start` to the goal using `heuristic`.
pub fn solve<const SIDE: usize, const CELLS: usize>(
    puzzle: &Puzzle<SIDE, CELLS>,
    start: &Board<CELLS>,
    heuristic: Heuristic,
) -> SearchOutcome {
    astar(puzzle, start, |board| heuristic.evaluate(puzzle, board), None)
}

/// Like [`solve`], but also records parent links and rebuilds the path.
pub fn solve_with_path<const SIDE: usize, const CELLS: usize>(
    puzzle: &Puzzle<SIDE, CELLS>,
    start: &Board<CELLS>,
    heuristic: Heuristic,
) -> SearchPath<CELLS> {
    let mut parents = FxHashMap::default();
    let outcome = astar(
        puzzle,
        start,
        |board| heuristic.evaluate(puzzle, board),
        Some(&mut parents),
    );

    let boards = if outcome.is_solved() {
        rebuild_path(&parents, *start)
    } else {
        Vec::new()
    };

    SearchPath { outcome, boards }
}

/// A* over any estimate function.
///
/// `estimate` must be non-negative; the search stays complete for any such
/// function and returns shortest paths when it never overestimates. When
/// `parents` is given, each improved state records the board it was reached
/// from.
pub fn astar<const SIDE: usize, const CELLS: usize, H>(
    puzzle: &Puzzle<SIDE, CELLS>,
    start: &Board<CELLS>,
    estimate: H,
    mut parents: Option<&mut FxHashMap<Board<CELLS>, Board<CELLS>>>,
) -> SearchOutcome
where
    H: Fn(&Board<CELLS>) -> u32,
{
    let goal = Board::<CELLS>::goal();
    if *start == goal {
        return SearchOutcome {
            cost: Some(0),
            expanded: 0,
        };
    }

    let mut frontier = BinaryHeap::new();
    let mut best_g: FxHashMap<Board<CELLS>, u32> = FxHashMap::default();
    let mut closed: FxHashSet<Board<CELLS>> = FxHashSet::default();
    let mut expanded = 0u64;

    best_g.insert(*start, 0);
    frontier.push(Reverse(FrontierKey {
        f: estimate(start),
        g: 0,
        board: *start,
    }));

    while let Some(Reverse(FrontierKey { g, board, .. })) = frontier.pop() {
        // stale duplicate of a state that was already finalized
        if !closed.insert(board) {
            continue;
        }
        expanded += 1;

        if board == goal {
            debug!("goal reached: cost={g} expanded={expanded}");
            return SearchOutcome {
                cost: Some(g),
                expanded,
            };
        }

        let blank = board.blank_index();
        let tentative = g + 1;

        for &cell in puzzle.neighbors(blank) {
            let next = board.slide(blank, cell as usize);
            if closed.contains(&next) {
                continue;
            }

            let improved = best_g.get(&next).map_or(true, |&known| tentative < known);
            if !improved {
                continue;
            }

            best_g.insert(next, tentative);
            if let Some(parents) = parents.as_deref_mut() {
                parents.insert(next, board);
            }
            frontier.push(Reverse(FrontierKey {
                f: tentative + estimate(&next),
                g: tentative,
                board: next,
            }));
        }
    }

    debug!("frontier exhausted: expanded={expanded}");
    SearchOutcome {
        cost: None,
        expanded,
    }
}

/// Follows parent links back from the goal to `start`.
fn rebuild_path<const CELLS: usize>(
    parents: &FxHashMap<Board<CELLS>, Board<CELLS>>,
    start: Board<CELLS>,
) -> Vec<Board<CELLS>> {
    let mut path = vec![Board::<CELLS>::goal()];
    let mut current = Board::<CELLS>::goal();

    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }

    path.reverse();
    debug_assert_eq!(
        path.first(),
        Some(&start),
        "parent links must lead back to the start"
    );
    path
}
