//! Run executor: runs a stored workflow step by step.

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use agentverse_protocols::{Parameters, StepContext, WorkflowDefinition, WorkflowStore};
use tracing::{debug, error, info, warn};

use crate::error::RunError;

use super::context::RunContext;
use super::dispatcher::StepDispatcher;
use super::options::RunOptions;
use super::outcome::{StepError, StepOutcome};
use super::result::{RunAccumulator, RunResult};

/// Default bound on a single provider call.
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(300);

/// Executes workflow runs.
///
/// Steps run strictly in order. A failing step is recorded and the run
/// moves on; only a missing workflow or a store failure fails the call.
pub struct RunExecutor {
    store: Arc<dyn WorkflowStore>,
    dispatcher: StepDispatcher,
    step_timeout: Duration,
}

impl RunExecutor {
    /// Create a new run executor.
    pub fn new(store: Arc<dyn WorkflowStore>, dispatcher: StepDispatcher) -> Self {
        Self {
            store,
            dispatcher,
            step_timeout: DEFAULT_STEP_TIMEOUT,
        }
    }

    /// Set the per-step timeout.
    pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }

    pub fn dispatcher(&self) -> &StepDispatcher {
        &self.dispatcher
    }

    pub fn step_timeout(&self) -> Duration {
        self.step_timeout
    }

    /// Run a stored workflow with no cancellation or deadline.
    pub async fn run(
        &self,
        workflow_id: &str,
        owner: &str,
        inputs: Parameters,
    ) -> Result<RunResult, RunError> {
        self.run_with(workflow_id, owner, inputs, RunOptions::default())
            .await
    }

    /// Run a stored workflow under the given options.
    pub async fn run_with(
        &self,
        workflow_id: &str,
        owner: &str,
        inputs: Parameters,
        options: RunOptions,
    ) -> Result<RunResult, RunError> {
        let definition = match self.store.get(workflow_id, owner).await {
            Ok(Some(definition)) => definition,
            Ok(None) => {
                warn!("Workflow {} not found for owner {}", workflow_id, owner);
                return Err(RunError::NotFound(workflow_id.to_string()));
            }
            Err(e) => {
                error!("Failed to load workflow {}: {}", workflow_id, e);
                return Err(e.into());
            }
        };

        let context = RunContext::new(inputs);
        Ok(self
            .execute_definition(&definition, owner, &context, &options)
            .await)
    }

    /// Run an already loaded definition.
    pub async fn execute_definition(
        &self,
        definition: &WorkflowDefinition,
        owner: &str,
        context: &RunContext,
        options: &RunOptions,
    ) -> RunResult {
        info!(
            "Starting workflow run: {} ({} steps)",
            definition.id,
            definition.steps.len()
        );

        let mut acc = RunAccumulator::new();

        for (index, step) in definition.steps.iter().enumerate() {
            let key = acc.resolve_key(step.declared_id(), index);

            if options.should_stop() {
                info!("Run of {} cancelled before step {}", definition.id, key);
                acc.cancelled_before(&key);
                break;
            }

            debug!("Starting step {} (type: {})", key, step.step_type);
            acc.step_started(&key, &step.step_type);

            let ctx = StepContext::new(&definition.id, owner, &key)
                .with_config_ref(step.config_id.clone())
                .with_cancellation(options.cancellation.clone());
            let params = context.merged_for(&step.parameters, owner);

            let outcome = self
                .dispatch_bounded(&step.step_type, ctx, params, options)
                .await;
            if let StepOutcome::Failure(err) = &outcome {
                warn!("Error in step {}: {}", key, err.log_detail());
            }

            acc.record(&key, &step.step_type, outcome);
            if acc.is_cancelled() {
                break;
            }
        }

        let result = acc.finish();
        info!(
            "Workflow run {} finished: {} ({} steps recorded)",
            definition.id,
            result.status,
            result.output.len()
        );
        result
    }

    /// Dispatch one step, racing it against cancellation, the run deadline
    /// and the per-step timeout.
    async fn dispatch_bounded(
        &self,
        step_type: &str,
        ctx: StepContext,
        params: Parameters,
        options: &RunOptions,
    ) -> StepOutcome {
        let deadline = async {
            match options.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };
        let step = tokio::time::timeout(
            self.step_timeout,
            self.dispatcher.dispatch(step_type, ctx, params),
        );

        tokio::select! {
            biased;
            _ = options.cancellation.cancelled() => StepOutcome::Failure(StepError::Cancelled),
            _ = deadline => StepOutcome::Failure(StepError::DeadlineExceeded),
            result = step => match result {
                Ok(outcome) => outcome,
                Err(_) => StepOutcome::Failure(StepError::TimedOut(self.step_timeout)),
            },
        }
    }
}
