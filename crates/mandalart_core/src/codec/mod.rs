//! Persistence codec for saved boards.
//!
//! # Responsibility
//! - Generate and validate 12-digit access codes.
//! - Convert grids to and from their stored text form.
//!
//! # Invariants
//! - `decode_grid(encode_grid(g)) == g` for every grid.
//! - Decoding never yields a grid that is not 9x9.

pub mod access_code;
pub mod snapshot;
