//! Normalized step outcomes.

use std::time::Duration;

use agentverse_protocols::CapabilityOutput;
use thiserror::Error;

/// Why a step failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepError {
    #[error("Unknown step type: {0}")]
    UnknownType(String),

    /// Provider returned an error or panicked.
    #[error("{0}")]
    Provider(String),

    #[error("Step timed out after {}s", .0.as_secs())]
    TimedOut(Duration),

    #[error("Step cancelled")]
    Cancelled,

    #[error("Run deadline exceeded")]
    DeadlineExceeded,
}

impl StepError {
    /// Detail text for the run log line.
    pub fn log_detail(&self) -> String {
        match self {
            Self::UnknownType(step_type) => format!("has unknown type '{}'", step_type),
            other => other.to_string(),
        }
    }

    /// Whether this failure stops the run.
    pub fn stops_run(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}

/// Result of dispatching one step. Exactly one of success or failure.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Success(CapabilityOutput),
    Failure(StepError),
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl From<Result<CapabilityOutput, StepError>> for StepOutcome {
    fn from(result: Result<CapabilityOutput, StepError>) -> Self {
        match result {
            Ok(output) => Self::Success(output),
            Err(e) => Self::Failure(e),
        }
    }
}
