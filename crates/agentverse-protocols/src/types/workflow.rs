//! Workflow definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_helpers::null_as_default;
use crate::capability::Parameters;

/// Step type tags registered by default.
pub mod step_types {
    pub const PLUGIN: &str = "plugin";
    pub const AGENT: &str = "agent";
    pub const TOOL: &str = "tool";
}

/// A workflow step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Step ID, unique within the workflow. Optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Step type tag.
    #[serde(rename = "type")]
    pub step_type: String,

    /// Reference to a stored capability configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_id: Option<String>,

    /// Provider parameters.
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Parameters,
}

impl WorkflowStep {
    /// Create a step of the given type with no id, config or parameters.
    pub fn new(step_type: impl Into<String>) -> Self {
        Self {
            id: None,
            step_type: step_type.into(),
            config_id: None,
            parameters: Parameters::new(),
        }
    }

    /// Create a plugin step.
    pub fn plugin(id: impl Into<String>, config_id: impl Into<String>) -> Self {
        Self::new(step_types::PLUGIN)
            .with_id(id)
            .with_config_id(config_id)
    }

    /// Create an agent step.
    pub fn agent(id: impl Into<String>) -> Self {
        Self::new(step_types::AGENT).with_id(id)
    }

    /// Create a tool step.
    pub fn tool(id: impl Into<String>) -> Self {
        Self::new(step_types::TOOL).with_id(id)
    }

    /// Set the step ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the configuration reference.
    pub fn with_config_id(mut self, config_id: impl Into<String>) -> Self {
        self.config_id = Some(config_id.into());
        self
    }

    /// Add a parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// The declared ID, ignoring empty strings.
    pub fn declared_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// A stored workflow definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    #[serde(default)]
    pub id: String,

    /// Owner.
    #[serde(default)]
    pub user_id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Steps in execution order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<WorkflowStep>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl WorkflowDefinition {
    /// Create a definition with no timestamps.
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
        steps: Vec<WorkflowStep>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            name: name.into(),
            description: None,
            steps,
            created_at: None,
            updated_at: None,
        }
    }

    /// Materialize a create request.
    pub fn from_new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        new: NewWorkflow,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            name: new.name,
            description: new.description,
            steps: new.steps,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Set description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Apply a partial update; only present fields are replaced.
    pub fn apply(&mut self, update: WorkflowUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(steps) = update.steps {
            self.steps = steps;
        }
        self.updated_at = Some(now);
    }
}

/// Request body for creating a workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkflow {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub steps: Vec<WorkflowStep>,
}

/// Request body for updating a workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Option<Vec<WorkflowStep>>,
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
