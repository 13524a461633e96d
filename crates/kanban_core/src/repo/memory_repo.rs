//! In-process key-value store for tests and ephemeral hosts.

use crate::repo::kv_repo::{KeyValueRepository, RepoResult};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueRepository {
    records: HashMap<String, String>,
}

impl MemoryKeyValueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw record, bypassing any encoding.
    pub fn with_record(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.records.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.records.get(key).map(String::as_str)
    }
}

impl KeyValueRepository for MemoryKeyValueRepository {
    fn load(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> RepoResult<()> {
        self.records.remove(key);
        Ok(())
    }
}
