//! Persistence store boundary for saved boards.
//!
//! # Responsibility
//! - Define the opaque get/set-by-key contract the codec writes through.
//! - Provide SQLite and in-memory implementations.
//!
//! # Invariants
//! - A rejected write persists nothing.
//! - Stores never interpret keys or values.

pub mod snapshot_store;
