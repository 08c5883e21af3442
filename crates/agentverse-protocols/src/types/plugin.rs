//! Plugin configuration types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored plugin configuration, referenced by plugin steps via `config_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfiguration {
    pub id: String,

    /// Owner.
    pub user_id: String,

    /// Selects the plugin runtime that executes this configuration.
    pub plugin_type: String,

    pub name: String,

    /// Opaque configuration blob, handed to the runtime as-is.
    #[serde(default)]
    pub config_blob: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PluginConfiguration {
    /// Materialize a create request.
    pub fn from_new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        new: NewPluginConfiguration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            plugin_type: new.plugin_type,
            name: new.name,
            config_blob: new.config_blob,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn apply(&mut self, update: PluginConfigurationUpdate, now: DateTime<Utc>) {
        if let Some(plugin_type) = update.plugin_type {
            self.plugin_type = plugin_type;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(config_blob) = update.config_blob {
            self.config_blob = config_blob;
        }
        self.updated_at = Some(now);
    }
}

/// Request body for creating a plugin configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPluginConfiguration {
    pub plugin_type: String,
    pub name: String,
    #[serde(default)]
    pub config_blob: String,
}

/// Request body for updating a plugin configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginConfigurationUpdate {
    #[serde(default)]
    pub plugin_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub config_blob: Option<String>,
}
