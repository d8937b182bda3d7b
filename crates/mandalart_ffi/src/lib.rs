//! Flutter bridge for the Mandalart board core.

pub mod api;
