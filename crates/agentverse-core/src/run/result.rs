//! Run results and the per-run accumulator.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::outcome::StepOutcome;

/// Overall status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Every step succeeded.
    Success,
    /// At least one step failed.
    Error,
    /// Stopped by cancellation or the run deadline.
    Cancelled,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Immutable result of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub status: RunStatus,
    /// Step key to payload, or `{"error": message}` for failed steps.
    pub output: serde_json::Map<String, serde_json::Value>,
    pub logs: Vec<String>,
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }

    /// Payload recorded for a step key.
    pub fn step_output(&self, key: &str) -> Option<&serde_json::Value> {
        self.output.get(key)
    }

    /// Error message recorded for a step key, if the step failed.
    pub fn step_error(&self, key: &str) -> Option<&str> {
        self.output.get(key)?.get("error")?.as_str()
    }
}

/// Mutable state of one run. Owned by a single invocation.
pub(crate) struct RunAccumulator {
    output: serde_json::Map<String, serde_json::Value>,
    logs: Vec<String>,
    used_keys: HashSet<String>,
    failed: bool,
    cancelled: bool,
}

impl RunAccumulator {
    pub(crate) fn new() -> Self {
        Self {
            output: serde_json::Map::new(),
            logs: Vec::new(),
            used_keys: HashSet::new(),
            failed: false,
            cancelled: false,
        }
    }

    /// Output key for the step at `index`.
    ///
    /// A missing, empty or already-used id falls back to `step_<index>`.
    pub(crate) fn resolve_key(&mut self, declared: Option<&str>, index: usize) -> String {
        let key = match declared {
            Some(id) if !self.used_keys.contains(id) => id.to_string(),
            _ => {
                let mut key = format!("step_{}", index);
                // A declared id may already occupy the positional name.
                while self.used_keys.contains(&key) {
                    key.push('_');
                }
                key
            }
        };
        self.used_keys.insert(key.clone());
        key
    }

    pub(crate) fn step_started(&mut self, key: &str, step_type: &str) {
        self.logs
            .push(format!("Starting step {} (type: {})", key, step_type));
    }

    pub(crate) fn record(&mut self, key: &str, step_type: &str, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Success(output) => {
                let note = output
                    .note
                    .unwrap_or_else(|| format!("{} result received", step_type));
                self.logs.push(format!("Step {}: {}", key, note));
                self.output.insert(key.to_string(), output.payload);
            }
            StepOutcome::Failure(err) => {
                self.logs
                    .push(format!("Error in step {}: {}", key, err.log_detail()));
                self.output.insert(
                    key.to_string(),
                    serde_json::json!({ "error": err.to_string() }),
                );
                if err.stops_run() {
                    self.cancelled = true;
                } else {
                    self.failed = true;
                }
            }
        }
    }

    pub(crate) fn cancelled_before(&mut self, key: &str) {
        self.logs.push(format!("Run cancelled before step {}", key));
        self.cancelled = true;
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub(crate) fn finish(self) -> RunResult {
        let status = if self.cancelled {
            RunStatus::Cancelled
        } else if self.failed {
            RunStatus::Error
        } else {
            RunStatus::Success
        };

        RunResult {
            status,
            output: self.output,
            logs: self.logs,
        }
    }
}
