//! Capability provider trait definition.

use async_trait::async_trait;

use super::{CapabilityOutput, Parameters, StepContext};
use crate::error::CapabilityError;

/// Core trait for capability providers.
///
/// Side effects (network calls, writes) are entirely the provider's concern.
/// Any `Err` returned here becomes a failed step; it never aborts a run.
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// Step type tag this provider serves (e.g. `"plugin"`).
    fn step_type(&self) -> &str;

    /// Short human-readable description.
    fn description(&self) -> &str {
        ""
    }

    /// Execute one step.
    async fn execute(
        &self,
        params: Parameters,
        ctx: StepContext,
    ) -> Result<CapabilityOutput, CapabilityError>;
}
