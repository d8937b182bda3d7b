//! Grid state model.
//!
//! # Responsibility
//! - Own the 9x9 text matrix behind a Mandalart board.
//! - Apply the one-way sync rule from center-block sub-goals to the centers
//!   of the eight outer blocks.
//!
//! # Invariants
//! - A `Grid` is always exactly 9x9; every cell holds a (possibly empty) string.
//! - After every `GridState::set_cell`, each sync link target equals its source.
//! - Sync links only flow source -> target, never the reverse.
//! - Loaded snapshots are installed as-is; they are not re-synced here.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of rows and columns in the board.
pub const GRID_SIZE: usize = 9;
/// Number of rows and columns in one block.
pub const BLOCK_SIZE: usize = 3;

/// Error for out-of-range coordinates and malformed grid shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Coordinates outside `0..=8`.
    OutOfBounds { row: usize, col: usize },
    /// Input rows do not form a 9x9 matrix.
    Shape(String),
}

impl Display for GridError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds { row, col } => {
                write!(f, "cell ({row}, {col}) is outside the 9x9 grid")
            }
            Self::Shape(message) => write!(f, "invalid grid shape: {message}"),
        }
    }
}

impl Error for GridError {}

/// Validated cell coordinate, 0-indexed and row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    row: usize,
    col: usize,
}

impl CellPos {
    /// Creates a coordinate, rejecting anything outside the board.
    pub fn new(row: usize, col: usize) -> Result<Self, GridError> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(GridError::OutOfBounds { row, col });
        }
        Ok(Self { row, col })
    }

    const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Offset of this cell inside its containing block.
    pub fn local(self) -> (usize, usize) {
        (self.row % BLOCK_SIZE, self.col % BLOCK_SIZE)
    }

    /// Iterates all 81 cells in row-major order.
    pub fn all() -> impl Iterator<Item = CellPos> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| CellPos::at(row, col)))
    }
}

/// Coordinate of one 3x3 block, `(0..=2, 0..=2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    row: usize,
    col: usize,
}

impl BlockPos {
    /// The planning block in the middle of the board.
    pub const CENTER: BlockPos = BlockPos { row: 1, col: 1 };

    /// Creates a block coordinate when both parts are in `0..=2`.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BLOCK_SIZE && col < BLOCK_SIZE).then_some(Self { row, col })
    }

    /// Returns the block that contains `pos`.
    pub fn of(pos: CellPos) -> Self {
        Self {
            row: pos.row / BLOCK_SIZE,
            col: pos.col / BLOCK_SIZE,
        }
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    pub fn is_center(self) -> bool {
        self == Self::CENTER
    }

    /// Middle cell of this block.
    pub fn center_cell(self) -> CellPos {
        CellPos::at(self.row * BLOCK_SIZE + 1, self.col * BLOCK_SIZE + 1)
    }

    /// The eight outer blocks in row-major order.
    pub fn outer() -> impl Iterator<Item = BlockPos> {
        (0..BLOCK_SIZE)
            .flat_map(|row| (0..BLOCK_SIZE).map(move |col| BlockPos { row, col }))
            .filter(|block| !block.is_center())
    }
}

/// Fixed source -> target table.
///
/// Source `(3 + dr, 3 + dc)` feeds the center of outer block `(dr, dc)`.
pub const SYNC_LINKS: [(CellPos, CellPos); 8] = [
    (CellPos::at(3, 3), CellPos::at(1, 1)),
    (CellPos::at(3, 4), CellPos::at(1, 4)),
    (CellPos::at(3, 5), CellPos::at(1, 7)),
    (CellPos::at(4, 3), CellPos::at(4, 1)),
    (CellPos::at(4, 5), CellPos::at(4, 7)),
    (CellPos::at(5, 3), CellPos::at(7, 1)),
    (CellPos::at(5, 4), CellPos::at(7, 4)),
    (CellPos::at(5, 5), CellPos::at(7, 7)),
];

/// Returns the mirrored target when `pos` is a sync link source.
pub fn sync_target(pos: CellPos) -> Option<CellPos> {
    SYNC_LINKS
        .iter()
        .find(|(source, _)| *source == pos)
        .map(|(_, target)| *target)
}

/// Returns the sub-goal feeding `pos` when `pos` is a sync link target.
pub fn sync_source(pos: CellPos) -> Option<CellPos> {
    SYNC_LINKS
        .iter()
        .find(|(_, target)| *target == pos)
        .map(|(source, _)| *source)
}

/// Immutable-shape 9x9 text matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: [[String; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Creates an all-empty grid.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a grid from nested rows, rejecting anything that is not 9x9.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self, GridError> {
        if rows.len() != GRID_SIZE {
            return Err(GridError::Shape(format!(
                "expected {GRID_SIZE} rows, got {}",
                rows.len()
            )));
        }

        let mut grid = Self::empty();
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != GRID_SIZE {
                return Err(GridError::Shape(format!(
                    "row {row_index} has {} cells, expected {GRID_SIZE}",
                    row.len()
                )));
            }
            for (col_index, text) in row.into_iter().enumerate() {
                grid.cells[row_index][col_index] = text;
            }
        }

        Ok(grid)
    }

    /// Copies the matrix out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }

    pub fn rows(&self) -> &[[String; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    pub fn cell(&self, pos: CellPos) -> &str {
        self.cells[pos.row][pos.col].as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(String::is_empty)
    }

    /// Whether every sync link target currently mirrors its source.
    pub fn is_synced(&self) -> bool {
        SYNC_LINKS
            .iter()
            .all(|(source, target)| self.cell(*source) == self.cell(*target))
    }

    /// Copies every sync source onto its target.
    pub fn resync(&mut self) {
        for (source, target) in SYNC_LINKS {
            let text = self.cell(source).to_string();
            self.put(target, text);
        }
    }

    fn put(&mut self, pos: CellPos, text: String) {
        self.cells[pos.row][pos.col] = text;
    }
}

/// Mutable board state with sync propagation.
///
/// `GridState` has no notion of cell roles; it permits writes to any cell.
/// Read-only enforcement happens at the board boundary.
#[derive(Debug, Clone, Default)]
pub struct GridState {
    grid: Grid,
}

impl GridState {
    /// Creates a state holding an all-empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn text(&self, pos: CellPos) -> &str {
        self.grid.cell(pos)
    }

    /// Writes `text` to `pos` and, for sync sources, to the linked target.
    ///
    /// Both writes happen under one exclusive borrow, so no reader can see
    /// only one side of the pair.
    pub fn set_cell(&mut self, pos: CellPos, text: impl Into<String>) -> &Grid {
        let text = text.into();
        if let Some(target) = sync_target(pos) {
            self.grid.put(target, text.clone());
        }
        self.grid.put(pos, text);
        &self.grid
    }

    /// Replaces the grid with a fresh all-empty one.
    pub fn reset(&mut self) {
        self.grid = Grid::empty();
    }

    /// Validates `rows` and installs them; state is untouched on error.
    pub fn load_snapshot(&mut self, rows: Vec<Vec<String>>) -> Result<(), GridError> {
        let grid = Grid::from_rows(rows)?;
        self.install(grid);
        Ok(())
    }

    /// Installs an already-shaped grid wholesale.
    pub fn install(&mut self, grid: Grid) {
        self.grid = grid;
    }

    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        sync_source, sync_target, BlockPos, CellPos, Grid, GridError, GridState, SYNC_LINKS,
    };

    fn pos(row: usize, col: usize) -> CellPos {
        CellPos::new(row, col).expect("test coordinates are in range")
    }

    #[test]
    fn cell_pos_rejects_out_of_range() {
        assert_eq!(
            CellPos::new(9, 0),
            Err(GridError::OutOfBounds { row: 9, col: 0 })
        );
        assert!(CellPos::new(0, 9).is_err());
        assert!(CellPos::new(8, 8).is_ok());
    }

    #[test]
    fn all_positions_are_row_major() {
        let cells: Vec<CellPos> = CellPos::all().collect();
        assert_eq!(cells.len(), 81);
        assert_eq!(cells[0], pos(0, 0));
        assert_eq!(cells[9], pos(1, 0));
        assert_eq!(cells[80], pos(8, 8));
    }

    #[test]
    fn sync_links_follow_block_offsets() {
        assert_eq!(SYNC_LINKS.len(), 8);
        for (source, target) in SYNC_LINKS {
            assert_eq!(BlockPos::of(source), BlockPos::CENTER);
            let (dr, dc) = (source.row() - 3, source.col() - 3);
            let block = BlockPos::new(dr, dc).expect("offset is a block coordinate");
            assert!(!block.is_center());
            assert_eq!(block.center_cell(), target);
        }
    }

    #[test]
    fn sync_lookup_is_one_directional() {
        assert_eq!(sync_target(pos(3, 3)), Some(pos(1, 1)));
        assert_eq!(sync_target(pos(1, 1)), None);
        assert_eq!(sync_source(pos(1, 1)), Some(pos(3, 3)));
        assert_eq!(sync_target(pos(4, 4)), None);
    }

    #[test]
    fn outer_blocks_skip_center() {
        let blocks: Vec<BlockPos> = BlockPos::outer().collect();
        assert_eq!(blocks.len(), 8);
        assert!(blocks.iter().all(|block| !block.is_center()));
    }

    #[test]
    fn set_cell_on_source_updates_target() {
        let mut state = GridState::new();
        state.set_cell(pos(3, 3), "Health");
        assert_eq!(state.text(pos(3, 3)), "Health");
        assert_eq!(state.text(pos(1, 1)), "Health");
        assert!(state.grid().is_synced());
    }

    #[test]
    fn set_cell_on_target_does_not_flow_back() {
        let mut state = GridState::new();
        state.set_cell(pos(3, 3), "Health");
        state.set_cell(pos(1, 1), "Override");
        assert_eq!(state.text(pos(3, 3)), "Health");
        assert_eq!(state.text(pos(1, 1)), "Override");
    }

    #[test]
    fn from_rows_rejects_wrong_shape() {
        let short = vec![vec![String::new(); 9]; 8];
        assert!(matches!(Grid::from_rows(short), Err(GridError::Shape(_))));

        let mut ragged = vec![vec![String::new(); 9]; 9];
        ragged[4].pop();
        assert!(matches!(Grid::from_rows(ragged), Err(GridError::Shape(_))));
    }

    #[test]
    fn to_rows_rebuilds_same_grid() {
        let mut state = GridState::new();
        state.set_cell(pos(8, 8), "last");
        let grid = state.snapshot();
        assert_eq!(Grid::from_rows(grid.to_rows()).unwrap(), grid);
    }

    #[test]
    fn load_snapshot_leaves_state_untouched_on_error() {
        let mut state = GridState::new();
        state.set_cell(pos(0, 0), "keep");
        let error = state
            .load_snapshot(vec![vec![String::new(); 3]; 9])
            .expect_err("ragged snapshot must be rejected");
        assert!(matches!(error, GridError::Shape(_)));
        assert_eq!(state.text(pos(0, 0)), "keep");
    }

    #[test]
    fn resync_copies_sources_onto_targets() {
        let mut rows = vec![vec![String::new(); 9]; 9];
        rows[5][5] = "Family".to_string();
        rows[7][7] = "stale".to_string();
        let mut grid = Grid::from_rows(rows).expect("9x9 rows");
        assert!(!grid.is_synced());

        grid.resync();
        assert!(grid.is_synced());
        assert_eq!(grid.cell(pos(7, 7)), "Family");
    }
}
