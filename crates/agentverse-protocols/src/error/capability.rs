//! Capability provider errors.

use thiserror::Error;

/// Error raised by a capability provider while executing a step.
///
/// The engine never inspects the variant; it records the display message
/// as the step's failure.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("{0}")]
    ExecutionFailed(String),

    #[error("Missing config_id for {0} step")]
    MissingConfigRef(String),

    #[error("Plugin configuration not found: {0}")]
    ConfigNotFound(String),

    #[error("No runtime registered for plugin type: {0}")]
    UnsupportedPluginType(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Storage error: {0}")]
    Store(#[from] super::StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_failed_is_verbatim() {
        let err = CapabilityError::ExecutionFailed("plugin failed".to_string());
        assert_eq!(err.to_string(), "plugin failed");
    }

    #[test]
    fn test_missing_config_ref() {
        let err = CapabilityError::MissingConfigRef("plugin".to_string());
        assert!(err.to_string().contains("config_id"));
        assert!(err.to_string().contains("plugin"));
    }

    #[test]
    fn test_config_not_found() {
        let err = CapabilityError::ConfigNotFound("cfg1".to_string());
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("cfg1"));
    }

    #[test]
    fn test_unsupported_plugin_type() {
        let err = CapabilityError::UnsupportedPluginType("webhook".to_string());
        assert!(err.to_string().contains("webhook"));
    }

    #[test]
    fn test_from_store_error() {
        let err: CapabilityError = super::super::StoreError::Unavailable("down".to_string()).into();
        assert!(err.to_string().contains("down"));
    }
}
