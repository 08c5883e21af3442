//! Owner-scoped storage protocols.
//!
//! Every lookup is keyed by `(id, owner)`. A record owned by someone else
//! is indistinguishable from a missing one: both yield `None` / `false`.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{
    NewPluginConfiguration, NewWorkflow, PluginConfiguration, PluginConfigurationUpdate,
    WorkflowDefinition, WorkflowUpdate,
};

/// Trait for workflow definition persistence.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Create a workflow owned by `owner`.
    async fn create(
        &self,
        owner: &str,
        new: NewWorkflow,
    ) -> Result<WorkflowDefinition, StoreError>;

    /// Load a workflow by ID for its owner.
    async fn get(&self, id: &str, owner: &str) -> Result<Option<WorkflowDefinition>, StoreError>;

    /// List all workflows of an owner.
    async fn list(&self, owner: &str) -> Result<Vec<WorkflowDefinition>, StoreError>;

    /// Update a workflow; `None` if it does not exist for this owner.
    async fn update(
        &self,
        id: &str,
        owner: &str,
        update: WorkflowUpdate,
    ) -> Result<Option<WorkflowDefinition>, StoreError>;

    /// Delete a workflow; `false` if it does not exist for this owner.
    async fn delete(&self, id: &str, owner: &str) -> Result<bool, StoreError>;
}

/// Trait for plugin configuration persistence.
#[async_trait]
pub trait PluginConfigStore: Send + Sync {
    async fn create(
        &self,
        owner: &str,
        new: NewPluginConfiguration,
    ) -> Result<PluginConfiguration, StoreError>;

    async fn get(&self, id: &str, owner: &str) -> Result<Option<PluginConfiguration>, StoreError>;

    async fn list(&self, owner: &str) -> Result<Vec<PluginConfiguration>, StoreError>;

    async fn update(
        &self,
        id: &str,
        owner: &str,
        update: PluginConfigurationUpdate,
    ) -> Result<Option<PluginConfiguration>, StoreError>;

    async fn delete(&self, id: &str, owner: &str) -> Result<bool, StoreError>;
}
