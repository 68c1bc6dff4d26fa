//! Record repositories
//!
//! The sync engine consumes two abstract repositories (field and central)
//! through [`RecordRepository`]; it never knows how records persist.
//! Two implementations ship with the crate: an in-memory store and a
//! JSON-file store used by the CLI.

mod json_file;
mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CentralRecord, CentralRecordId, FieldRecord};

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;

/// Key-value-style store for one record collection.
///
/// `add` assigns an id to records that have none; `put` upserts by id.
#[async_trait]
pub trait RecordRepository<R>: Send + Sync {
    /// Load a full snapshot of the collection
    async fn list_all(&self) -> Result<Vec<R>>;

    /// Fetch one record by id
    async fn get_by_id(&self, id: &str) -> Result<Option<R>>;

    /// Insert a record, assigning an id when it has none
    async fn add(&self, record: R) -> Result<R>;

    /// Upsert a record by id
    async fn put(&self, record: &R) -> Result<()>;
}

/// Storage-key access for records kept in the generic repositories.
pub trait StoredRecord: Clone + Send + Sync {
    /// The record's storage key, if assigned
    fn storage_key(&self) -> Option<String>;

    /// Assign a storage key (repository-generated id)
    fn assign_storage_key(&mut self, key: String);
}

impl StoredRecord for FieldRecord {
    fn storage_key(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn assign_storage_key(&mut self, key: String) {
        self.id = key.into();
    }
}

impl StoredRecord for CentralRecord {
    fn storage_key(&self) -> Option<String> {
        self.id.as_ref().map(CentralRecordId::to_string)
    }

    fn assign_storage_key(&mut self, key: String) {
        self.id = Some(key.into());
    }
}
