//! Grid geometry for square sliding-tile puzzles.
//!
//! Generic over the side length (`SIDE`) and total cell count
//! (`CELLS = SIDE^2`). Both lookup tables are built at compile time and never
//! change afterwards, so every search and every trial can borrow the same
//! `Puzzle` value.

/// Maximum number of orthogonal neighbours a cell can have.
pub const MAX_NEIGHBORS: usize = 4;

/// A (row, column) position on the board.
pub type Cell = (u8, u8);

/// Cells reachable from one cell by a single blank swap.
///
/// Uses a fixed-size array so the adjacency table can be built in a const fn.
#[derive(Clone, Copy, Debug)]
pub struct Neighbors {
    cells: [u8; MAX_NEIGHBORS],
    len: u8,
}

impl Neighbors {
    /// A neighbour list with no entries.
    pub const EMPTY: Self = Self {
        cells: [0; MAX_NEIGHBORS],
        len: 0,
    };

    const fn push(mut self, cell: usize) -> Self {
        self.cells[self.len as usize] = cell as u8;
        self.len += 1;
        self
    }

    /// Returns the neighbouring linear indices in up, down, left, right order.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.cells[..self.len as usize]
    }
}

/// Builds the adjacency table at compile time for any square grid.
///
/// Neighbour order is up, down, left, right. The order is fixed so that
/// frontier ties resolve identically from run to run.
const fn build_adjacency<const SIDE: usize, const CELLS: usize>() -> [Neighbors; CELLS] {
    let mut table = [Neighbors::EMPTY; CELLS];

    let mut cell = 0;
    while cell < CELLS {
        let row = cell / SIDE;
        let col = cell % SIDE;
        let mut neighbors = Neighbors::EMPTY;

        if row > 0 {
            neighbors = neighbors.push(cell - SIDE);
        }
        if row + 1 < SIDE {
            neighbors = neighbors.push(cell + SIDE);
        }
        if col > 0 {
            neighbors = neighbors.push(cell - 1);
        }
        if col + 1 < SIDE {
            neighbors = neighbors.push(cell + 1);
        }

        table[cell] = neighbors;
        cell += 1;
    }
    table
}

/// Builds the goal position index: entry `tile` holds where that tile sits
/// in the solved board.
///
/// Tile `t >= 1` belongs at linear index `t - 1`; the blank belongs in the
/// last cell.
const fn build_goal_positions<const SIDE: usize, const CELLS: usize>() -> [Cell; CELLS] {
    let mut positions = [(0u8, 0u8); CELLS];

    let mut tile = 0;
    while tile < CELLS {
        let goal_index = if tile == 0 { CELLS - 1 } else { tile - 1 };
        positions[tile] = idx_to_cell::<SIDE>(goal_index);
        tile += 1;
    }
    positions
}

/// Converts a linear cell index to (row, column). Index order is row-major.
#[inline(always)]
pub const fn idx_to_cell<const SIDE: usize>(index: usize) -> Cell {
    ((index / SIDE) as u8, (index % SIDE) as u8)
}

/// Converts (row, column) to a linear cell index.
#[inline(always)]
pub const fn cell_to_idx<const SIDE: usize>(row: usize, col: usize) -> usize {
    row * SIDE + col
}

/// Puzzle definition with compile-time parameters.
///
/// - `SIDE`: tiles per row and per column (4 for the fifteen puzzle)
/// - `CELLS`: total cells on the board (must equal SIDE^2)
pub struct Puzzle<const SIDE: usize, const CELLS: usize> {
    adjacency: [Neighbors; CELLS],
    goal_positions: [Cell; CELLS],
}

impl<const SIDE: usize, const CELLS: usize> Puzzle<SIDE, CELLS> {
    /// Creates a puzzle definition with compile-time validation.
    pub const fn new() -> Self {
        assert!(SIDE >= 1, "SIDE must be at least 1");
        assert!(SIDE * SIDE == CELLS, "CELLS must equal SIDE^2");
        assert!(CELLS <= 256, "CELLS must be <= 256 (u8 tile labels)");
        Self {
            adjacency: build_adjacency::<SIDE, CELLS>(),
            goal_positions: build_goal_positions::<SIDE, CELLS>(),
        }
    }

    /// Tiles per row and per column.
    pub const fn side(&self) -> usize {
        SIDE
    }

    /// Cells the blank can swap with when it sits at `cell`.
    #[inline]
    pub fn neighbors(&self, cell: usize) -> &[u8] {
        self.adjacency[cell].as_slice()
    }

    /// Where `tile` sits in the goal board.
    #[inline]
    pub fn goal_position(&self, tile: u8) -> Cell {
        self.goal_positions[tile as usize]
    }
}

impl<const SIDE: usize, const CELLS: usize> Default for Puzzle<SIDE, CELLS> {
    fn default() -> Self {
        Self::new()
    }
}

/// The 2x2 three-tile puzzle.
pub static TRIO_PUZZLE: Puzzle<2, 4> = Puzzle::new();

/// The 3x3 eight puzzle.
pub static EIGHT_PUZZLE: Puzzle<3, 9> = Puzzle::new();

/// The 4x4 fifteen puzzle.
pub static FIFTEEN_PUZZLE: Puzzle<4, 16> = Puzzle::new();

/// The 5x5 twenty-four puzzle.
pub static TWENTY_FOUR_PUZZLE: Puzzle<5, 25> = Puzzle::new();
