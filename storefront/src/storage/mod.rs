//! Persistence layer
//!
//! Services receive an explicit store object instead of reaching for global
//! state. Every record is a JSON document keyed by its id inside a named
//! table.
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `orders` | order id | `OrderRecord` |
//! | `users` | user id | `User` |
//! | `carts` | owner id | `Cart` |
//!
//! Two backends: [`RedbStore`] (file-backed) and [`MemoryStore`].

mod memory;
mod redb_store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};
use shared::models::{OrderRecord, User};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Serialization(e) => {
                AppError::with_message(ErrorCode::StorageCorrupted, e.to_string())
            }
            other => AppError::database(other.to_string()),
        }
    }
}

/// A document that lives in one store table
pub trait Record: Serialize + DeserializeOwned {
    /// Table name
    const TABLE: &'static str;

    /// Primary key inside [`Record::TABLE`]
    fn record_id(&self) -> &str;
}

impl Record for OrderRecord {
    const TABLE: &'static str = "orders";

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for User {
    const TABLE: &'static str = "users";

    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Repository object shared by the services
pub trait Store: Send + Sync {
    /// Insert or replace by `record_id()`
    fn save<R: Record>(&self, record: &R) -> StorageResult<()>;

    fn find_by_id<R: Record>(&self, id: &str) -> StorageResult<Option<R>>;

    /// All records of a table, ordered by id
    fn load_all<R: Record>(&self) -> StorageResult<Vec<R>>;

    /// Returns whether a record was removed
    fn remove<R: Record>(&self, id: &str) -> StorageResult<bool>;
}
