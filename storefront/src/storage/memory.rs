//! In-memory store
//!
//! Same JSON encoding as the redb store, so a record that round-trips here
//! round-trips there.

use super::{Record, StorageError, StorageResult, Store};
use dashmap::DashMap;

type Key = (&'static str, String);

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<Key, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents across all tables
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn save<R: Record>(&self, record: &R) -> StorageResult<()> {
        let bytes = serde_json::to_vec(record)?;
        self.entries
            .insert((R::TABLE, record.record_id().to_string()), bytes);
        Ok(())
    }

    fn find_by_id<R: Record>(&self, id: &str) -> StorageResult<Option<R>> {
        match self.entries.get(&(R::TABLE, id.to_string())) {
            Some(bytes) => Ok(Some(serde_json::from_slice(bytes.value())?)),
            None => Ok(None),
        }
    }

    fn load_all<R: Record>(&self) -> StorageResult<Vec<R>> {
        let mut rows: Vec<(String, Vec<u8>)> = self
            .entries
            .iter()
            .filter(|entry| entry.key().0 == R::TABLE)
            .map(|entry| (entry.key().1.clone(), entry.value().clone()))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        rows.into_iter()
            .map(|(_, bytes)| serde_json::from_slice(&bytes).map_err(StorageError::from))
            .collect()
    }

    fn remove<R: Record>(&self, id: &str) -> StorageResult<bool> {
        Ok(self.entries.remove(&(R::TABLE, id.to_string())).is_some())
    }
}
