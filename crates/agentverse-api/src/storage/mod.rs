//! Owner-scoped record storage.
//!
//! Both backends store whole records keyed by id. Ownership is checked on
//! every access, so a foreign record is reported exactly like a missing one.

mod file;
mod memory;
mod record;

use std::sync::Arc;

use agentverse_config::{StorageConfig, storage_backends};
use agentverse_protocols::{PluginConfigStore, StoreError, WorkflowStore};
use tracing::info;

pub use file::{FilePluginConfigStore, FileStore, FileWorkflowStore};
pub use memory::{MemoryPluginConfigStore, MemoryStore, MemoryWorkflowStore};
pub use record::OwnedRecord;

/// Open the workflow and plugin configuration stores selected by `config`.
pub async fn open_stores(
    config: &StorageConfig,
) -> Result<(Arc<dyn WorkflowStore>, Arc<dyn PluginConfigStore>), StoreError> {
    match config.backend.as_str() {
        storage_backends::MEMORY => {
            info!("Using in-memory storage");
            Ok((
                Arc::new(MemoryWorkflowStore::new()),
                Arc::new(MemoryPluginConfigStore::new()),
            ))
        }
        storage_backends::FILE => {
            let root = config.resolved_path();
            info!("Using file storage at {:?}", root);
            let workflows = FileWorkflowStore::open(root.join("workflows")).await?;
            let plugins = FilePluginConfigStore::open(root.join("plugins")).await?;
            Ok((Arc::new(workflows), Arc::new(plugins)))
        }
        other => Err(StoreError::Unavailable(format!(
            "Unknown storage backend: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_stores() {
        let (workflows, plugins) = open_stores(&StorageConfig::default()).await.unwrap();
        assert!(workflows.list("u1").await.unwrap().is_empty());
        assert!(plugins.list("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_file_stores() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: "file".to_string(),
            path: Some(dir.path().to_string_lossy().to_string()),
        };
        open_stores(&config).await.unwrap();
        assert!(dir.path().join("workflows").is_dir());
        assert!(dir.path().join("plugins").is_dir());
    }

    #[tokio::test]
    async fn test_open_unknown_backend() {
        let config = StorageConfig {
            backend: "postgres".to_string(),
            path: None,
        };
        assert!(open_stores(&config).await.is_err());
    }
}
