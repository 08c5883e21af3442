//! Step dispatcher: routes a step to its registered provider.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use agentverse_protocols::{Parameters, StepContext};
use futures::FutureExt;
use tracing::{debug, warn};

use crate::registry::CapabilityRegistry;

use super::outcome::{StepError, StepOutcome};

/// Maps a step type to its provider and normalizes whatever the provider
/// does into a [`StepOutcome`]. Never fails itself.
#[derive(Clone)]
pub struct StepDispatcher {
    registry: Arc<CapabilityRegistry>,
}

impl StepDispatcher {
    pub fn new(registry: Arc<CapabilityRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<CapabilityRegistry> {
        &self.registry
    }

    /// Execute one step against the provider registered for `step_type`.
    pub async fn dispatch(
        &self,
        step_type: &str,
        ctx: StepContext,
        params: Parameters,
    ) -> StepOutcome {
        let Some(provider) = self.registry.get(step_type) else {
            warn!("No capability registered for step type '{}'", step_type);
            return StepOutcome::Failure(StepError::UnknownType(step_type.to_string()));
        };

        debug!("Dispatching step {} to '{}'", ctx.step_key, step_type);

        match AssertUnwindSafe(provider.execute(params, ctx))
            .catch_unwind()
            .await
        {
            Ok(Ok(output)) => StepOutcome::Success(output),
            Ok(Err(e)) => StepOutcome::Failure(StepError::Provider(e.to_string())),
            Err(_) => {
                warn!("Capability '{}' panicked", step_type);
                StepOutcome::Failure(StepError::Provider(format!(
                    "{} provider panicked",
                    step_type
                )))
            }
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
