//! Connection bootstrap for the board database.
//!
//! # Invariants
//! - Returned connections have a busy timeout and all migrations applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) the board database file at `path`.
///
/// # Side effects
/// - Creates missing parent directories.
/// - Emits `db_open` events with duration and status.
///
/// # Errors
/// - `DbError::CreateDirectory` when the parent directory cannot be created.
/// - `DbError::Sqlite` / `DbError::UnsupportedSchemaVersion` from bootstrap.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| {
            error!(
                "event=db_open module=db status=error mode=file stage=create_dir dir={} error={}",
                parent.display(),
                err
            );
            DbError::CreateDirectory {
                dir: parent.to_path_buf(),
                source: err,
            }
        })?;
    }
    open_with("file", || Connection::open(path))
}

/// Opens a private in-memory board database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let result = open()
        .map_err(DbError::from)
        .and_then(|mut conn| bootstrap_connection(&mut conn).map(|()| conn));

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}
