//! Records the stores know how to key and own.

use chrono::{DateTime, Utc};

use agentverse_protocols::{
    NewPluginConfiguration, NewWorkflow, PluginConfiguration, PluginConfigurationUpdate,
    WorkflowDefinition, WorkflowUpdate,
};

/// A record owned by exactly one user.
pub trait OwnedRecord: Clone + Send + Sync + 'static {
    type New: Send;
    type Update: Send;

    fn id(&self) -> &str;
    fn owner(&self) -> &str;
    fn created_at(&self) -> Option<DateTime<Utc>>;

    fn create(id: String, owner: &str, new: Self::New, now: DateTime<Utc>) -> Self;
    fn apply(&mut self, update: Self::Update, now: DateTime<Utc>);
}

impl OwnedRecord for WorkflowDefinition {
    type New = NewWorkflow;
    type Update = WorkflowUpdate;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner(&self) -> &str {
        &self.user_id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn create(id: String, owner: &str, new: NewWorkflow, now: DateTime<Utc>) -> Self {
        Self::from_new(id, owner, new, now)
    }

    fn apply(&mut self, update: WorkflowUpdate, now: DateTime<Utc>) {
        WorkflowDefinition::apply(self, update, now)
    }
}

impl OwnedRecord for PluginConfiguration {
    type New = NewPluginConfiguration;
    type Update = PluginConfigurationUpdate;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner(&self) -> &str {
        &self.user_id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn create(id: String, owner: &str, new: NewPluginConfiguration, now: DateTime<Utc>) -> Self {
        Self::from_new(id, owner, new, now)
    }

    fn apply(&mut self, update: PluginConfigurationUpdate, now: DateTime<Utc>) {
        PluginConfiguration::apply(self, update, now)
    }
}

/// Stable listing order: oldest first, then by id.
pub(crate) fn sort_records<T: OwnedRecord>(records: &mut [T]) {
    records.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
