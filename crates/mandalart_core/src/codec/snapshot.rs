//! Grid snapshot text encoding.
//!
//! # Invariants
//! - Stored form is a JSON array of 9 arrays of 9 strings, row-major.
//! - Any undecodable or wrong-shaped input maps to `CodecError::InvalidData`.

use crate::model::grid::Grid;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Codec error for stored snapshot values.
#[derive(Debug)]
pub enum CodecError {
    /// Serializer failure while encoding.
    Encode(serde_json::Error),
    /// Stored text is not a 9x9 string matrix.
    InvalidData(String),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode grid: {err}"),
            Self::InvalidData(message) => write!(f, "invalid snapshot data: {message}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

/// Serializes a grid into its stored text form.
pub fn encode_grid(grid: &Grid) -> Result<String, CodecError> {
    serde_json::to_string(grid.rows()).map_err(CodecError::Encode)
}

/// Parses stored text and validates the 9x9 string shape.
pub fn decode_grid(raw: &str) -> Result<Grid, CodecError> {
    let rows: Vec<Vec<String>> = serde_json::from_str(raw)
        .map_err(|err| CodecError::InvalidData(format!("not a string matrix: {err}")))?;
    Grid::from_rows(rows).map_err(|err| CodecError::InvalidData(err.to_string()))
}
