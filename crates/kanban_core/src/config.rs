//! Core runtime configuration.
//!
//! # Responsibility
//! - Name the persisted record keys and the database location.
//! - Resolve overrides from the process environment.
//!
//! # Invariants
//! - Blank environment values are ignored, never treated as paths.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const TASKS_KEY: &str = "task-manager-tasks";
pub const SORT_CONFIG_KEY: &str = "task-manager-sort-config";
pub const DB_FILE_NAME: &str = "kanban.sqlite3";

pub const ENV_DB_PATH: &str = "KANBAN_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "KANBAN_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "KANBAN_LOG_DIR";

/// Settings shared by hosts embedding the board core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Rolling log directory. Logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
    pub tasks_key: String,
    pub sort_config_key: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            tasks_key: TASKS_KEY.to_string(),
            sort_config_key: SORT_CONFIG_KEY.to_string(),
        }
    }
}

impl CoreConfig {
    /// Defaults overridden by `KANBAN_DB_PATH`, `KANBAN_LOG_LEVEL` and `KANBAN_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = non_blank(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = non_blank(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = non_blank(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        config
    }
}
