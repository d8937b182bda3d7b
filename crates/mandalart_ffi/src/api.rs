//! FFI board API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose render-surface callbacks (edit, reset, save, load) to Dart via FRB.
//! - Project the 81 cells with their derived role, theme and editability.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One board per process; every call observes a fully applied edit.
//! - The store file is opened lazily, on the first save or load.

use log::warn;
use mandalart_core::db::open_db;
use mandalart_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    resolve_db_path, BoardOptions, BoardOutcome, BoardService, CellView, SnapshotStore,
    SqliteSnapshotStore, StoreResult,
};
use rusqlite::Connection;
use std::cell::OnceCell;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

static BOARD: OnceLock<Mutex<BoardService<EntryStore>>> = OnceLock::new();
static BOARD_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// SQLite store opened on first use at the resolved board path.
struct EntryStore {
    path: PathBuf,
    conn: OnceCell<Connection>,
}

impl EntryStore {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            conn: OnceCell::new(),
        }
    }

    fn connection(&self) -> StoreResult<&Connection> {
        if let Some(conn) = self.conn.get() {
            return Ok(conn);
        }
        let conn = open_db(&self.path)?;
        Ok(self.conn.get_or_init(|| conn))
    }
}

impl SnapshotStore for EntryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        SqliteSnapshotStore::new(self.connection()?).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        SqliteSnapshotStore::new(self.connection()?).set(key, value)
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        SqliteSnapshotStore::new(self.connection()?).contains(key)
    }
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Display projection of one board cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCellItem {
    pub row: u32,
    pub col: u32,
    pub text: String,
    /// `core_goal|sub_goal|synced_center|action_plan`.
    pub role: String,
    pub editable: bool,
    /// Placeholder hint for empty cells, empty when none applies.
    pub placeholder: String,
    /// One of the eight theme names; `None` for the core goal.
    pub theme: Option<String>,
}

/// Result envelope for board actions.
///
/// `board_load` trims the code before handing it to the core; core
/// `BoardService::on_load` itself reports `InvalidFormat` for padded codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// `success|not_found|invalid_data|invalid_format|storage_error|rejected`.
    pub outcome: String,
    /// Access code minted by a successful save.
    pub code: Option<String>,
    /// Human-readable message for UI feedback.
    pub message: String,
}

impl BoardActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            outcome: "success".to_string(),
            code: None,
            message: message.into(),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            outcome: "rejected".to_string(),
            code: None,
            message: message.into(),
        }
    }
}

impl From<BoardOutcome> for BoardActionResponse {
    fn from(outcome: BoardOutcome) -> Self {
        let message = outcome.message();
        let (ok, label, code) = match outcome {
            BoardOutcome::Success(code) => (true, "success", code),
            BoardOutcome::NotFound => (false, "not_found", None),
            BoardOutcome::InvalidData => (false, "invalid_data", None),
            BoardOutcome::InvalidFormat => (false, "invalid_format", None),
            BoardOutcome::StorageError { .. } => (false, "storage_error", None),
        };
        Self {
            ok,
            outcome: label.to_string(),
            code,
            message,
        }
    }
}

/// Returns all 81 cells in row-major order.
#[flutter_rust_bridge::frb(sync)]
pub fn board_cells() -> Vec<BoardCellItem> {
    lock_board()
        .cell_views()
        .into_iter()
        .map(to_cell_item)
        .collect()
}

/// Returns one cell, or `None` when coordinates are off the board.
#[flutter_rust_bridge::frb(sync)]
pub fn board_cell(row: u32, col: u32) -> Option<BoardCellItem> {
    lock_board()
        .cell_view(row as usize, col as usize)
        .ok()
        .map(to_cell_item)
}

/// Applies a cell edit; sub-goal edits also update their synced center.
///
/// # FFI contract
/// - Read-only and out-of-range cells return `outcome = rejected`.
#[flutter_rust_bridge::frb(sync)]
pub fn board_edit_cell(row: u32, col: u32, text: String) -> BoardActionResponse {
    match lock_board().on_cell_edit(row as usize, col as usize, text) {
        Ok(()) => BoardActionResponse::success("Cell updated."),
        Err(err) => BoardActionResponse::rejected(format!("board_edit_cell failed: {err}")),
    }
}

/// Clears the board. Confirmation belongs to the UI.
#[flutter_rust_bridge::frb(sync)]
pub fn board_reset() -> BoardActionResponse {
    lock_board().on_reset();
    BoardActionResponse::success("Board cleared.")
}

/// Saves the board and returns its new access code.
#[flutter_rust_bridge::frb(sync)]
pub fn board_save() -> BoardActionResponse {
    lock_board().on_save().into()
}

/// Loads the board saved under `code` (surrounding whitespace ignored).
///
/// Trimming happens here only; the core rejects padded codes as `invalid_format`.
#[flutter_rust_bridge::frb(sync)]
pub fn board_load(code: String) -> BoardActionResponse {
    lock_board().on_load(code.trim()).into()
}

fn lock_board() -> MutexGuard<'static, BoardService<EntryStore>> {
    let board = BOARD.get_or_init(|| {
        Mutex::new(BoardService::with_options(
            EntryStore::new(resolve_board_db_path()),
            BoardOptions::default(),
        ))
    });
    board.lock().unwrap_or_else(|poisoned| {
        warn!("event=board_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    })
}

fn resolve_board_db_path() -> PathBuf {
    BOARD_DB_PATH.get_or_init(resolve_db_path).clone()
}

fn to_cell_item(view: CellView) -> BoardCellItem {
    BoardCellItem {
        row: view.row as u32,
        col: view.col as u32,
        text: view.text,
        role: view.role.label().to_string(),
        editable: view.editable,
        placeholder: view.placeholder.label().to_string(),
        theme: view.theme.map(|theme| theme.label().to_string()),
    }
}
