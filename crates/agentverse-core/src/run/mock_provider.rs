//! Mock capability provider for testing.

use std::collections::HashMap;
use std::time::Duration;

use agentverse_protocols::{
    CapabilityError, CapabilityOutput, CapabilityProvider, Parameters, StepContext,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Provider returning pre-configured responses keyed by step key.
///
/// Unconfigured steps echo their merged parameters back. Every call is
/// recorded as `(step_key, params)`.
pub struct MockCapabilityProvider {
    step_type: String,
    responses: RwLock<HashMap<String, serde_json::Value>>,
    errors: RwLock<HashMap<String, String>>,
    delays: RwLock<HashMap<String, Duration>>,
    calls: RwLock<Vec<(String, Parameters)>>,
}

impl MockCapabilityProvider {
    pub fn new(step_type: impl Into<String>) -> Self {
        Self {
            step_type: step_type.into(),
            responses: RwLock::new(HashMap::new()),
            errors: RwLock::new(HashMap::new()),
            delays: RwLock::new(HashMap::new()),
            calls: RwLock::new(Vec::new()),
        }
    }

    pub async fn set_response(&self, step_key: &str, response: serde_json::Value) {
        self.responses
            .write()
            .await
            .insert(step_key.to_string(), response);
    }

    pub async fn set_error(&self, step_key: &str, message: &str) {
        self.errors
            .write()
            .await
            .insert(step_key.to_string(), message.to_string());
    }

    /// Make the step sleep before answering.
    pub async fn set_delay(&self, step_key: &str, delay: Duration) {
        self.delays
            .write()
            .await
            .insert(step_key.to_string(), delay);
    }

    /// Recorded calls in invocation order.
    pub async fn calls(&self) -> Vec<(String, Parameters)> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl CapabilityProvider for MockCapabilityProvider {
    fn step_type(&self) -> &str {
        &self.step_type
    }

    fn description(&self) -> &str {
        "Mock capability"
    }

    async fn execute(
        &self,
        params: Parameters,
        ctx: StepContext,
    ) -> Result<CapabilityOutput, CapabilityError> {
        self.calls
            .write()
            .await
            .push((ctx.step_key.clone(), params.clone()));

        let delay = self.delays.read().await.get(&ctx.step_key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.errors.read().await.get(&ctx.step_key) {
            return Err(CapabilityError::ExecutionFailed(message.clone()));
        }

        let responses = self.responses.read().await;
        let payload = match responses.get(&ctx.step_key) {
            Some(response) => response.clone(),
            None => serde_json::Value::Object(params),
        };
        Ok(CapabilityOutput::new(payload))
    }
}
