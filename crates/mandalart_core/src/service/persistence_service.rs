//! Save and load of board snapshots by access code.
//!
//! # Responsibility
//! - Bind the codec to a `SnapshotStore`.
//! - Classify load failures into format, missing and malformed cases.
//!
//! # Invariants
//! - Load checks the code format before touching the store.
//! - A failed save persists nothing.
//! - Every save mints a new code; records are never updated in place.

use crate::codec::access_code::{generate_code_with, masked, store_key, validate_code_format};
use crate::codec::snapshot::{decode_grid, encode_grid, CodecError};
use crate::config::BoardOptions;
use crate::model::grid::Grid;
use crate::repo::snapshot_store::{SnapshotStore, StoreError};
use log::{info, warn};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of a save or load.
#[derive(Debug)]
pub enum PersistError {
    /// Code is not exactly 12 ASCII digits.
    InvalidFormat,
    /// Well-formed code with no matching record.
    NotFound,
    /// Record exists but is not a 9x9 string matrix.
    InvalidData(String),
    /// Snapshot could not be serialized.
    Encode(CodecError),
    /// Store rejected the read or write.
    Storage(StoreError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat => write!(f, "access code must be exactly 12 digits"),
            Self::NotFound => write!(f, "no saved board for this access code"),
            Self::InvalidData(message) => write!(f, "saved board is corrupted: {message}"),
            Self::Encode(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for PersistError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

impl From<CodecError> for PersistError {
    fn from(value: CodecError) -> Self {
        match value {
            CodecError::InvalidData(message) => Self::InvalidData(message),
            other => Self::Encode(other),
        }
    }
}

/// Saves `grid` under a freshly generated code and returns the code.
pub fn save<S: SnapshotStore + ?Sized>(
    store: &S,
    grid: &Grid,
    options: &BoardOptions,
) -> Result<String, PersistError> {
    save_with_rng(store, grid, options, &mut rand::thread_rng())
}

/// Same as [`save`] with a caller-provided RNG.
pub fn save_with_rng<S: SnapshotStore + ?Sized, R: Rng>(
    store: &S,
    grid: &Grid,
    options: &BoardOptions,
    rng: &mut R,
) -> Result<String, PersistError> {
    let encoded = encode_grid(grid)?;

    let mut code = generate_code_with(rng);
    let mut retries = 0;
    while retries < options.collision_retries && store.contains(&store_key(&code))? {
        warn!(
            "event=board_save module=persistence status=retry reason=code_collision code={} attempt={}",
            masked(&code),
            retries + 1
        );
        code = generate_code_with(rng);
        retries += 1;
    }

    if let Err(err) = store.set(&store_key(&code), &encoded) {
        warn!(
            "event=board_save module=persistence status=error error_code=store_write_failed bytes={} error={}",
            encoded.len(),
            err
        );
        return Err(err.into());
    }

    info!(
        "event=board_save module=persistence status=ok code={} bytes={}",
        masked(&code),
        encoded.len()
    );
    Ok(code)
}

/// Loads the grid saved under `code`.
pub fn load<S: SnapshotStore + ?Sized>(store: &S, code: &str) -> Result<Grid, PersistError> {
    if !validate_code_format(code) {
        info!(
            "event=board_load module=persistence status=rejected error_code=invalid_format input_len={}",
            code.chars().count()
        );
        return Err(PersistError::InvalidFormat);
    }

    let raw = match store.get(&store_key(code))? {
        Some(raw) => raw,
        None => {
            info!(
                "event=board_load module=persistence status=not_found code={}",
                masked(code)
            );
            return Err(PersistError::NotFound);
        }
    };

    let grid = decode_grid(&raw).map_err(|err| {
        warn!(
            "event=board_load module=persistence status=error error_code=invalid_data code={} bytes={}",
            masked(code),
            raw.len()
        );
        PersistError::from(err)
    })?;

    info!(
        "event=board_load module=persistence status=ok code={} bytes={}",
        masked(code),
        raw.len()
    );
    Ok(grid)
}
