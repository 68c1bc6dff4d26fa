//! JSON-file record repository

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::repo::{RecordRepository, StoredRecord};

/// File-backed repository storing one collection as a JSON array.
///
/// A missing file reads as an empty collection. Writes go through a
/// sibling temp file followed by a rename, so a snapshot on disk is
/// always either the old or the new state.
#[derive(Debug)]
pub struct JsonFileRepository<R> {
    path: PathBuf,
    // serializes read-modify-write cycles on the file
    write_lock: Mutex<()>,
    _record: PhantomData<R>,
}

impl<R> JsonFileRepository<R>
where
    R: StoredRecord + Serialize + DeserializeOwned,
{
    /// Create a repository backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    /// The backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<R>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(Error::Repository(format!(
                "failed to read {}: {error}",
                self.path.display()
            ))),
        }
    }

    async fn store(&self, records: &[R]) -> Result<()> {
        let payload = serde_json::to_vec_pretty(records)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload).await.map_err(|error| {
            Error::Repository(format!("failed to write {}: {error}", tmp_path.display()))
        })?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|error| {
                Error::Repository(format!(
                    "failed to replace {}: {error}",
                    self.path.display()
                ))
            })
    }
}

#[async_trait]
impl<R> RecordRepository<R> for JsonFileRepository<R>
where
    R: StoredRecord + Serialize + DeserializeOwned,
{
    async fn list_all(&self) -> Result<Vec<R>> {
        self.load().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<R>> {
        let records = self.load().await?;
        Ok(records
            .into_iter()
            .find(|record| record.storage_key().as_deref() == Some(id)))
    }

    async fn add(&self, mut record: R) -> Result<R> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        if record.storage_key().is_none() {
            record.assign_storage_key(Uuid::now_v7().to_string());
        }
        let key = record.storage_key();
        records.retain(|existing| existing.storage_key() != key);
        records.push(record.clone());
        self.store(&records).await?;
        Ok(record)
    }

    async fn put(&self, record: &R) -> Result<()> {
        let key = record
            .storage_key()
            .ok_or_else(|| Error::InvalidInput("cannot put a record without an id".into()))?;
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        records.retain(|existing| existing.storage_key().as_deref() != Some(key.as_str()));
        records.push(record.clone());
        self.store(&records).await
    }
}
