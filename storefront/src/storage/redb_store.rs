//! redb-backed store
//!
//! One `&str -> &[u8]` table per record type, values are JSON documents.
//! redb commits are durable as soon as `commit()` returns.

use super::{Record, StorageResult, Store};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, TableError};
use std::path::Path;
use std::sync::Arc;

/// Tables created up front on open
const KNOWN_TABLES: [&str; 3] = ["orders", "users", "carts"];

fn table_def(name: &str) -> TableDefinition<'_, &'static str, &'static [u8]> {
    TableDefinition::new(name)
}

/// Store backed by a redb database
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        for name in KNOWN_TABLES {
            let _ = write_txn.open_table(table_def(name))?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }
}

impl Store for RedbStore {
    fn save<R: Record>(&self, record: &R) -> StorageResult<()> {
        let bytes = serde_json::to_vec(record)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(table_def(R::TABLE))?;
            table.insert(record.record_id(), bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn find_by_id<R: Record>(&self, id: &str) -> StorageResult<Option<R>> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(table_def(R::TABLE)) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    fn load_all<R: Record>(&self) -> StorageResult<Vec<R>> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(table_def(R::TABLE)) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for entry in table.iter()? {
            let (_key, value) = entry?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }

    fn remove<R: Record>(&self, id: &str) -> StorageResult<bool> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(table_def(R::TABLE))?;
            table.remove(id)?.is_some()
        };
        write_txn.commit()?;
        Ok(removed)
    }
}
