//! Provider success value.

/// Value returned by a provider on success.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityOutput {
    /// Payload recorded under the step key in the run output.
    pub payload: serde_json::Value,

    /// Optional short note used for the step's success log line.
    pub note: Option<String>,
}

impl CapabilityOutput {
    /// Create an output carrying only a payload.
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            payload,
            note: None,
        }
    }

    /// Attach a note for the run log.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl From<serde_json::Value> for CapabilityOutput {
    fn from(payload: serde_json::Value) -> Self {
        Self::new(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_note() {
        let output = CapabilityOutput::new(serde_json::json!({"ok": true}))
            .with_note("plugin result received");
        assert_eq!(output.note.as_deref(), Some("plugin result received"));
        assert_eq!(output.payload["ok"], true);
    }

    #[test]
    fn test_from_value() {
        let output: CapabilityOutput = serde_json::json!("done").into();
        assert_eq!(output.payload, "done");
        assert!(output.note.is_none());
    }
}
