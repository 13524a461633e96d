//! Key-value persistence contract.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage transport failure.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection was not migrated to a schema this build can use.
    SchemaNotReady { found: u32, expected: u32 },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::SchemaNotReady { found, expected } => write!(
                f,
                "board database schema version {found} does not match expected {expected}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::SchemaNotReady { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable string store keyed by well-known record names.
pub trait KeyValueRepository {
    fn load(&self, key: &str) -> RepoResult<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> RepoResult<()>;
    fn remove(&mut self, key: &str) -> RepoResult<()>;
}

impl<R: KeyValueRepository + ?Sized> KeyValueRepository for Box<R> {
    fn load(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> RepoResult<()> {
        (**self).save(key, value)
    }

    fn remove(&mut self, key: &str) -> RepoResult<()> {
        (**self).remove(key)
    }
}
