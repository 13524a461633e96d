//! Core domain logic for the kanban task board.
//! This crate is the single source of truth for board invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::deadline::Deadline;
pub use model::sort::{SortConfig, SortMode, SortOrder};
pub use model::task::{
    Column, Priority, Task, TaskId, TaskInput, TaskValidationError, ValidationRule,
    DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS,
};
pub use repo::kv_repo::{KeyValueRepository, RepoError, RepoResult};
pub use repo::memory_repo::MemoryKeyValueRepository;
pub use repo::sqlite_repo::SqliteKeyValueRepository;
pub use service::board_service::{
    BoardError, BoardResult, BoardService, PersistenceCorruption, RecordKeys,
};
pub use service::drag::{DragLocation, DragResult};
pub use view::projection::{project, BoardView};
pub use view::stats::BoardStats;

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
