//! Board configuration defaults.
//!
//! # Responsibility
//! - Hold tunable board behavior with defaults matching the classic board.
//! - Resolve the on-disk store location, honoring `MANDALART_DB_PATH`.

use std::path::PathBuf;

/// Environment variable overriding the store file location.
pub const DB_PATH_ENV: &str = "MANDALART_DB_PATH";
/// Store file name used under the temp directory by default.
pub const DEFAULT_DB_FILE_NAME: &str = "mandalart_board.sqlite3";

/// Tunable board behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardOptions {
    /// Copy every sub-goal onto its synced center after a load.
    ///
    /// Off by default: stored pairs are trusted as-is.
    pub resync_on_load: bool,
    /// How many times `save` regenerates a code whose key already exists.
    ///
    /// `0` keeps overwrite-on-collision semantics.
    pub collision_retries: u32,
}

/// Resolves the store path from `MANDALART_DB_PATH` or the temp directory.
pub fn resolve_db_path() -> PathBuf {
    db_path_from(std::env::var(DB_PATH_ENV).ok().as_deref())
}

fn db_path_from(raw: Option<&str>) -> PathBuf {
    match raw.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => PathBuf::from(trimmed),
        _ => std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
    }
}
