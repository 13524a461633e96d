//! Board domain model.
//!
//! # Responsibility
//! - Define the task record, its enums and the display sort configuration.
//! - Own input validation rules shared by every write path.
//!
//! # Invariants
//! - Every task is identified by a stable, unique `TaskId`.
//! - Priority, column and sort settings are closed enums, never free strings.

pub mod deadline;
pub mod sort;
pub mod task;
