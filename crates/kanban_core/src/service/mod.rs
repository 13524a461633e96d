//! Board use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, custom-order bookkeeping and persistence.
//! - Keep host UI layers decoupled from storage details.

pub mod board_service;
pub mod drag;
