//! Run-level error types.

use agentverse_protocols::StoreError;
use thiserror::Error;

/// Hard failures of a run invocation.
///
/// Step failures are never reported here; they live in the run result.
#[derive(Debug, Error)]
pub enum RunError {
    /// No definition for this workflow ID and owner.
    #[error("Workflow not found: {0}")]
    NotFound(String),

    /// The definition store could not be reached.
    #[error("Workflow store failure: {0}")]
    Store(#[from] StoreError),
}
