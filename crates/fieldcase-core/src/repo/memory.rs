//! In-memory record repository

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::repo::{RecordRepository, StoredRecord};

/// In-memory repository keyed by record id.
///
/// Backs tests and headless runs; `add` assigns UUID v7 keys to records
/// without one.
#[derive(Debug, Default)]
pub struct MemoryRepository<R> {
    records: RwLock<BTreeMap<String, R>>,
}

impl<R: StoredRecord> MemoryRepository<R> {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a repository pre-populated with records.
    ///
    /// Records without a key are silently dropped; seed data is expected
    /// to be fully formed.
    pub async fn seeded(records: impl IntoIterator<Item = R>) -> Self {
        let repo = Self::new();
        {
            let mut guard = repo.records.write().await;
            for record in records {
                if let Some(key) = record.storage_key() {
                    guard.insert(key, record);
                }
            }
        }
        repo
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the repository holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl<R: StoredRecord> RecordRepository<R> for MemoryRepository<R> {
    async fn list_all(&self) -> Result<Vec<R>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<R>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn add(&self, mut record: R) -> Result<R> {
        let mut guard = self.records.write().await;
        let key = match record.storage_key() {
            Some(key) => key,
            None => {
                let key = Uuid::now_v7().to_string();
                record.assign_storage_key(key.clone());
                key
            }
        };
        guard.insert(key, record.clone());
        Ok(record)
    }

    async fn put(&self, record: &R) -> Result<()> {
        let key = record
            .storage_key()
            .ok_or_else(|| Error::InvalidInput("cannot put a record without an id".into()))?;
        self.records.write().await.insert(key, record.clone());
        Ok(())
    }
}
