//! Step execution context.

use tokio_util::sync::CancellationToken;

/// Context for one step invocation.
///
/// Built fresh by the executor for every step; providers never see the
/// executor's internal run state.
#[derive(Debug, Clone)]
pub struct StepContext {
    /// Workflow being run.
    pub workflow_id: String,

    /// Caller identity that owns the workflow.
    pub owner_id: String,

    /// Key the step's output is recorded under.
    pub step_key: String,

    /// Stored configuration the step refers to, if any.
    pub config_ref: Option<String>,

    /// Cancellation signal for the enclosing run.
    pub cancellation: CancellationToken,
}

impl StepContext {
    /// Create a new step context.
    pub fn new(
        workflow_id: impl Into<String>,
        owner_id: impl Into<String>,
        step_key: impl Into<String>,
    ) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            owner_id: owner_id.into(),
            step_key: step_key.into(),
            config_ref: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Set the configuration reference.
    pub fn with_config_ref(mut self, config_ref: Option<String>) -> Self {
        self.config_ref = config_ref;
        self
    }

    /// Share the run's cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Check if the enclosing run has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
