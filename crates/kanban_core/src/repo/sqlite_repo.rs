//! SQLite-backed key-value store.
//!
//! # Invariants
//! - `save` is an upsert; the last write for a key wins.
//! - The connection must be opened through `db::open_db*` first.

use crate::db::migrations::{latest_version, schema_version};
use crate::repo::kv_repo::{KeyValueRepository, RepoError, RepoResult};
use chrono::Utc;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

pub struct SqliteKeyValueRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `RepoError::SchemaNotReady` when migrations were not applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let found = schema_version(conn)?;
        let expected = latest_version();
        if found != expected {
            return Err(RepoError::SchemaNotReady { found, expected });
        }
        Ok(Self { conn })
    }
}

impl KeyValueRepository for SqliteKeyValueRepository<'_> {
    fn load(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_records WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_records (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value, Utc::now().timestamp_millis()],
        )?;
        debug!(
            "event=kv_save module=repo status=ok key={key} bytes={}",
            value.len()
        );
        Ok(())
    }

    fn remove(&mut self, key: &str) -> RepoResult<()> {
        self.conn.execute("DELETE FROM kv_records WHERE key = ?1;", [key])?;
        Ok(())
    }
}
