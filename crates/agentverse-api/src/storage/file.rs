//! File system stores: one JSON document per record.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use agentverse_protocols::{
    NewPluginConfiguration, NewWorkflow, PluginConfigStore, PluginConfiguration,
    PluginConfigurationUpdate, StoreError, WorkflowDefinition, WorkflowStore, WorkflowUpdate,
};

use super::record::{OwnedRecord, new_id, sort_records};

/// Directory of `<id>.json` files.
pub struct FileStore<T> {
    dir: PathBuf,
    /// Serializes read-modify-write sequences.
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

pub type FileWorkflowStore = FileStore<WorkflowDefinition>;
pub type FilePluginConfigStore = FileStore<PluginConfiguration>;

impl<T> FileStore<T>
where
    T: OwnedRecord + Serialize + DeserializeOwned,
{
    /// Open the store, creating `dir` if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        debug!("File store initialized at {:?}", dir);

        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
            _record: PhantomData,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", Self::sanitize_id(id)))
    }

    fn sanitize_id(id: &str) -> String {
        id.chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    async fn read(&self, path: &Path) -> Result<Option<T>, StoreError> {
        match fs::read_to_string(path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the record file atomically so unlocked readers never see a
    /// partial document.
    async fn write(&self, record: &T) -> Result<(), StoreError> {
        let path = self.record_path(record.id());
        let tmp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(record)?;
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &path).await?;
        debug!("Saved record '{}' to {:?}", record.id(), path);
        Ok(())
    }

    async fn get_record(&self, id: &str, owner: &str) -> Result<Option<T>, StoreError> {
        let record = self.read(&self.record_path(id)).await?;
        Ok(record.filter(|r| r.id() == id && r.owner() == owner))
    }

    async fn create_record(&self, owner: &str, new: T::New) -> Result<T, StoreError> {
        let record = T::create(new_id(), owner, new, Utc::now());
        let _guard = self.write_lock.lock().await;
        self.write(&record).await?;
        Ok(record)
    }

    async fn list_records(&self, owner: &str) -> Result<Vec<T>, StoreError> {
        let mut records = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match self.read(&path).await {
                Ok(Some(record)) if record.owner() == owner => records.push(record),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable record {:?}: {}", path, e),
            }
        }

        sort_records(&mut records);
        Ok(records)
    }

    async fn update_record(
        &self,
        id: &str,
        owner: &str,
        update: T::Update,
    ) -> Result<Option<T>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let Some(mut record) = self.get_record(id, owner).await? else {
            return Ok(None);
        };
        record.apply(update, Utc::now());
        self.write(&record).await?;
        Ok(Some(record))
    }

    async fn delete_record(&self, id: &str, owner: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        if self.get_record(id, owner).await?.is_none() {
            return Ok(false);
        }
        fs::remove_file(self.record_path(id)).await?;
        Ok(true)
    }
}

#[async_trait]
impl WorkflowStore for FileStore<WorkflowDefinition> {
    async fn create(&self, owner: &str, new: NewWorkflow) -> Result<WorkflowDefinition, StoreError> {
        self.create_record(owner, new).await
    }

    async fn get(&self, id: &str, owner: &str) -> Result<Option<WorkflowDefinition>, StoreError> {
        self.get_record(id, owner).await
    }

    async fn list(&self, owner: &str) -> Result<Vec<WorkflowDefinition>, StoreError> {
        self.list_records(owner).await
    }

    async fn update(
        &self,
        id: &str,
        owner: &str,
        update: WorkflowUpdate,
    ) -> Result<Option<WorkflowDefinition>, StoreError> {
        self.update_record(id, owner, update).await
    }

    async fn delete(&self, id: &str, owner: &str) -> Result<bool, StoreError> {
        self.delete_record(id, owner).await
    }
}

#[async_trait]
impl PluginConfigStore for FileStore<PluginConfiguration> {
    async fn create(
        &self,
        owner: &str,
        new: NewPluginConfiguration,
    ) -> Result<PluginConfiguration, StoreError> {
        self.create_record(owner, new).await
    }

    async fn get(&self, id: &str, owner: &str) -> Result<Option<PluginConfiguration>, StoreError> {
        self.get_record(id, owner).await
    }

    async fn list(&self, owner: &str) -> Result<Vec<PluginConfiguration>, StoreError> {
        self.list_records(owner).await
    }

    async fn update(
        &self,
        id: &str,
        owner: &str,
        update: PluginConfigurationUpdate,
    ) -> Result<Option<PluginConfiguration>, StoreError> {
        self.update_record(id, owner, update).await
    }

    async fn delete(&self, id: &str, owner: &str) -> Result<bool, StoreError> {
        self.delete_record(id, owner).await
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
