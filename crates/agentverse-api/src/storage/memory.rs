//! In-memory stores.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use agentverse_protocols::{
    NewPluginConfiguration, NewWorkflow, PluginConfigStore, PluginConfiguration,
    PluginConfigurationUpdate, StoreError, WorkflowDefinition, WorkflowStore, WorkflowUpdate,
};

use super::record::{OwnedRecord, new_id, sort_records};

/// In-memory store of owned records. Contents are lost on restart.
pub struct MemoryStore<T> {
    records: RwLock<HashMap<String, T>>,
}

pub type MemoryWorkflowStore = MemoryStore<WorkflowDefinition>;
pub type MemoryPluginConfigStore = MemoryStore<PluginConfiguration>;

impl<T: OwnedRecord> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a fully built record, replacing any record with the same id.
    pub async fn insert(&self, record: T) {
        self.records
            .write()
            .await
            .insert(record.id().to_string(), record);
    }

    async fn create_record(&self, owner: &str, new: T::New) -> T {
        let record = T::create(new_id(), owner, new, Utc::now());
        self.insert(record.clone()).await;
        record
    }

    async fn get_record(&self, id: &str, owner: &str) -> Option<T> {
        let records = self.records.read().await;
        records.get(id).filter(|r| r.owner() == owner).cloned()
    }

    async fn list_records(&self, owner: &str) -> Vec<T> {
        let records = self.records.read().await;
        let mut owned: Vec<T> = records
            .values()
            .filter(|r| r.owner() == owner)
            .cloned()
            .collect();
        sort_records(&mut owned);
        owned
    }

    async fn update_record(&self, id: &str, owner: &str, update: T::Update) -> Option<T> {
        let mut records = self.records.write().await;
        let record = records.get_mut(id).filter(|r| r.owner() == owner)?;
        record.apply(update, Utc::now());
        Some(record.clone())
    }

    async fn delete_record(&self, id: &str, owner: &str) -> bool {
        let mut records = self.records.write().await;
        let owned = records.get(id).is_some_and(|r| r.owner() == owner);
        if owned {
            records.remove(id);
        }
        owned
    }
}

impl<T: OwnedRecord> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkflowStore for MemoryStore<WorkflowDefinition> {
    async fn create(&self, owner: &str, new: NewWorkflow) -> Result<WorkflowDefinition, StoreError> {
        Ok(self.create_record(owner, new).await)
    }

    async fn get(&self, id: &str, owner: &str) -> Result<Option<WorkflowDefinition>, StoreError> {
        Ok(self.get_record(id, owner).await)
    }

    async fn list(&self, owner: &str) -> Result<Vec<WorkflowDefinition>, StoreError> {
        Ok(self.list_records(owner).await)
    }

    async fn update(
        &self,
        id: &str,
        owner: &str,
        update: WorkflowUpdate,
    ) -> Result<Option<WorkflowDefinition>, StoreError> {
        Ok(self.update_record(id, owner, update).await)
    }

    async fn delete(&self, id: &str, owner: &str) -> Result<bool, StoreError> {
        Ok(self.delete_record(id, owner).await)
    }
}

#[async_trait]
impl PluginConfigStore for MemoryStore<PluginConfiguration> {
    async fn create(
        &self,
        owner: &str,
        new: NewPluginConfiguration,
    ) -> Result<PluginConfiguration, StoreError> {
        Ok(self.create_record(owner, new).await)
    }

    async fn get(&self, id: &str, owner: &str) -> Result<Option<PluginConfiguration>, StoreError> {
        Ok(self.get_record(id, owner).await)
    }

    async fn list(&self, owner: &str) -> Result<Vec<PluginConfiguration>, StoreError> {
        Ok(self.list_records(owner).await)
    }

    async fn update(
        &self,
        id: &str,
        owner: &str,
        update: PluginConfigurationUpdate,
    ) -> Result<Option<PluginConfiguration>, StoreError> {
        Ok(self.update_record(id, owner, update).await)
    }

    async fn delete(&self, id: &str, owner: &str) -> Result<bool, StoreError> {
        Ok(self.delete_record(id, owner).await)
    }
}
