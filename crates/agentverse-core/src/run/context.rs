//! Run context and per-step parameter merging.

use agentverse_protocols::Parameters;

/// Parameter key carrying the owner of the run.
pub const OWNER_KEY: &str = "user_id";

/// Caller-supplied inputs for one run.
///
/// Steps never write to it; each step gets its own merged copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunContext {
    inputs: Parameters,
}

impl RunContext {
    pub fn new(inputs: Parameters) -> Self {
        Self { inputs }
    }

    /// Build from an arbitrary JSON value. Anything but an object yields an
    /// empty context.
    pub fn from_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self::new(map),
            _ => Self::default(),
        }
    }

    pub fn inputs(&self) -> &Parameters {
        &self.inputs
    }

    /// Parameters handed to one step: inputs, then the step's own
    /// parameters, then the owner key, later layers winning.
    pub fn merged_for(&self, step_params: &Parameters, owner: &str) -> Parameters {
        let mut merged = self.inputs.clone();
        for (key, value) in step_params {
            merged.insert(key.clone(), value.clone());
        }
        merged.insert(
            OWNER_KEY.to_string(),
            serde_json::Value::String(owner.to_string()),
        );
        merged
    }
}

impl From<Parameters> for RunContext {
    fn from(inputs: Parameters) -> Self {
        Self::new(inputs)
    }
}
