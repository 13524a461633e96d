//! Persistence port and its implementations.
//!
//! # Responsibility
//! - Define the key-value contract the board store persists through.
//! - Keep SQLite details out of service/business orchestration.
//!
//! # Invariants
//! - Values are opaque UTF-8 text; encoding is owned by the caller.
//! - A missing key is `Ok(None)`, never an error.

pub mod kv_repo;
pub mod memory_repo;
pub mod sqlite_repo;
