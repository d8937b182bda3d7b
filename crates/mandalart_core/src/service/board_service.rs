//! Board use-case service.
//!
//! # Responsibility
//! - Map render-surface callbacks (edit, reset, save, load) onto grid state
//!   and persistence.
//! - Project per-cell text plus derived role for display.
//!
//! # Invariants
//! - Edits to read-only cells are rejected before reaching `GridState`.
//! - A failed load never mutates the current grid.
//! - Cell text never appears in log events; only coordinates and lengths.

use crate::config::BoardOptions;
use crate::model::grid::{CellPos, Grid, GridError, GridState};
use crate::model::role::{resolve_role, CellRole, CellView};
use crate::repo::snapshot_store::SnapshotStore;
use crate::service::persistence_service::{self, PersistError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Edit-path error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    Grid(GridError),
    /// Target cell is derived from a sub-goal and cannot be typed into.
    ReadOnlyCell { row: usize, col: usize },
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grid(err) => write!(f, "{err}"),
            Self::ReadOnlyCell { row, col } => write!(
                f,
                "cell ({row}, {col}) mirrors its sub-goal and is read-only"
            ),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(err) => Some(err),
            Self::ReadOnlyCell { .. } => None,
        }
    }
}

impl From<GridError> for BoardError {
    fn from(value: GridError) -> Self {
        Self::Grid(value)
    }
}

/// Persistence action a `BoardOutcome` reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    Save,
    Load,
}

/// Save/load result presented to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardOutcome {
    /// Carries the new access code after a save, `None` after a load.
    Success(Option<String>),
    NotFound,
    InvalidData,
    InvalidFormat,
    /// Store rejected the read or write behind `action`.
    StorageError { action: BoardAction, details: String },
}

impl BoardOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// User-facing feedback text.
    pub fn message(&self) -> String {
        match self {
            Self::Success(Some(code)) => format!("Saved. Your access code is {code}."),
            Self::Success(None) => "Board loaded.".to_string(),
            Self::NotFound => "No saved board matches this access code.".to_string(),
            Self::InvalidData => "The saved board is damaged and cannot be loaded.".to_string(),
            Self::InvalidFormat => "Access codes are exactly 12 digits.".to_string(),
            Self::StorageError {
                action: BoardAction::Save,
                details,
            } => format!("Could not save the board: {details}"),
            Self::StorageError {
                action: BoardAction::Load,
                details,
            } => format!("Could not read saved boards: {details}"),
        }
    }

    fn from_persist(action: BoardAction, err: PersistError) -> Self {
        match err {
            PersistError::InvalidFormat => Self::InvalidFormat,
            PersistError::NotFound => Self::NotFound,
            PersistError::InvalidData(_) => Self::InvalidData,
            PersistError::Encode(err) => Self::StorageError {
                action,
                details: err.to_string(),
            },
            PersistError::Storage(err) => Self::StorageError {
                action,
                details: err.to_string(),
            },
        }
    }
}

/// One board bound to a snapshot store.
pub struct BoardService<S: SnapshotStore> {
    state: GridState,
    store: S,
    options: BoardOptions,
}

impl<S: SnapshotStore> BoardService<S> {
    /// Creates an empty board with default options.
    pub fn new(store: S) -> Self {
        Self::with_options(store, BoardOptions::default())
    }

    pub fn with_options(store: S, options: BoardOptions) -> Self {
        Self {
            state: GridState::new(),
            store,
            options,
        }
    }

    pub fn grid(&self) -> &Grid {
        self.state.grid()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &BoardOptions {
        &self.options
    }

    /// Applies a user edit, propagating sub-goals to their synced centers.
    pub fn on_cell_edit(
        &mut self,
        row: usize,
        col: usize,
        text: impl Into<String>,
    ) -> Result<(), BoardError> {
        let pos = CellPos::new(row, col)?;
        let descriptor = resolve_role(pos);
        if !descriptor.editable {
            warn!(
                "event=cell_edit module=board status=rejected error_code=read_only row={row} col={col}"
            );
            return Err(BoardError::ReadOnlyCell { row, col });
        }

        let text = text.into();
        debug!(
            "event=cell_edit module=board status=ok row={row} col={col} len={} propagated={}",
            text.chars().count(),
            descriptor.role == CellRole::SubGoal
        );
        self.state.set_cell(pos, text);
        Ok(())
    }

    /// Clears every cell. Confirmation is the caller's concern.
    pub fn on_reset(&mut self) {
        self.state.reset();
        info!("event=board_reset module=board status=ok");
    }

    /// Saves the current grid, returning the access code on success.
    pub fn on_save(&self) -> BoardOutcome {
        match persistence_service::save(&self.store, self.state.grid(), &self.options) {
            Ok(code) => BoardOutcome::Success(Some(code)),
            Err(err) => BoardOutcome::from_persist(BoardAction::Save, err),
        }
    }

    /// Loads the grid saved under `code`; current grid is kept on failure.
    pub fn on_load(&mut self, code: &str) -> BoardOutcome {
        match persistence_service::load(&self.store, code) {
            Ok(mut grid) => {
                if self.options.resync_on_load && !grid.is_synced() {
                    info!("event=board_load module=board status=resynced");
                    grid.resync();
                }
                self.state.install(grid);
                BoardOutcome::Success(None)
            }
            Err(err) => BoardOutcome::from_persist(BoardAction::Load, err),
        }
    }

    /// Display projection of one cell.
    pub fn cell_view(&self, row: usize, col: usize) -> Result<CellView, BoardError> {
        let pos = CellPos::new(row, col)?;
        Ok(CellView::of(self.state.grid(), pos))
    }

    /// Display projections of all 81 cells, row-major.
    pub fn cell_views(&self) -> Vec<CellView> {
        CellPos::all()
            .map(|pos| CellView::of(self.state.grid(), pos))
            .collect()
    }
}
