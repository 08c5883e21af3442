//! Placeholder capabilities for step types without a real backend yet.

use agentverse_protocols::{
    CapabilityError, CapabilityOutput, CapabilityProvider, Parameters, StepContext, step_types,
};
use async_trait::async_trait;
use tracing::debug;

/// Succeeds with a fixed "not implemented" message.
pub struct StubCapability {
    step_type: String,
    message: String,
    note: String,
}

impl StubCapability {
    pub fn new(step_type: impl Into<String>, message: impl Into<String>) -> Self {
        let step_type = step_type.into();
        let note = format!("{} execution is a stub", step_type);
        Self {
            step_type,
            message: message.into(),
            note,
        }
    }

    pub fn agent() -> Self {
        Self::new(step_types::AGENT, "Agent execution not implemented")
    }

    pub fn tool() -> Self {
        Self::new(step_types::TOOL, "Tool execution not implemented")
    }
}

#[async_trait]
impl CapabilityProvider for StubCapability {
    fn step_type(&self) -> &str {
        &self.step_type
    }

    fn description(&self) -> &str {
        &self.note
    }

    async fn execute(
        &self,
        _params: Parameters,
        ctx: StepContext,
    ) -> Result<CapabilityOutput, CapabilityError> {
        debug!("Stub {} step {}", self.step_type, ctx.step_key);
        Ok(CapabilityOutput::new(serde_json::json!({ "message": self.message }))
            .with_note(self.note.clone()))
    }
}
