//! Board use-case services.
//!
//! # Responsibility
//! - Orchestrate grid edits, save and load into render-surface callbacks.
//! - Keep the render surface decoupled from storage details.

pub mod board_service;
pub mod persistence_service;
