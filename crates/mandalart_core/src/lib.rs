//! Core domain logic for the Mandalart planning board.
//! This crate is the single source of truth for grid invariants.

pub mod codec;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use codec::access_code::{
    generate_code, store_key, validate_code_format, ACCESS_CODE_LEN, STORE_KEY_PREFIX,
};
pub use codec::snapshot::{decode_grid, encode_grid, CodecError};
pub use config::{resolve_db_path, BoardOptions};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::grid::{
    sync_source, sync_target, BlockPos, CellPos, Grid, GridError, GridState, GRID_SIZE,
    SYNC_LINKS,
};
pub use model::role::{resolve_role, CellDescriptor, CellRole, CellView, PlaceholderKind, Theme};
pub use repo::snapshot_store::{
    MemorySnapshotStore, SnapshotStore, SqliteSnapshotStore, StoreError, StoreResult,
};
pub use service::board_service::{BoardAction, BoardError, BoardOutcome, BoardService};
pub use service::persistence_service::{load, save, PersistError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
