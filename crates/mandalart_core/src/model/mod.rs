//! Board domain model.
//!
//! # Responsibility
//! - Define the 9x9 grid, its blocks and the fixed sync link table.
//! - Derive per-cell roles and themes from coordinates.
//!
//! # Invariants
//! - Lookup tables are process-wide constants, never mutated.
//! - Role and theme are pure functions of `(row, col)`.

pub mod grid;
pub mod role;
