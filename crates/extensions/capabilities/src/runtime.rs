//! Plugin runtimes.
//!
//! A plugin configuration's `plugin_type` selects the runtime that executes
//! it. New plugin kinds are added by registering a runtime.

use std::sync::Arc;

use agentverse_core::registry::{BaseRegistry, Registerable};
use agentverse_protocols::{CapabilityError, ExtensionError, Parameters, PluginConfiguration};
use async_trait::async_trait;
use serde_json::{Value, json};

/// Executes plugin configurations of one `plugin_type`.
#[async_trait]
pub trait PluginRuntime: Send + Sync {
    fn plugin_type(&self) -> &str;

    async fn invoke(
        &self,
        config: &PluginConfiguration,
        params: Parameters,
    ) -> Result<Value, CapabilityError>;
}

impl Registerable for dyn PluginRuntime {
    fn routing_key(&self) -> &str {
        self.plugin_type()
    }
}

/// Runtimes keyed by plugin type.
pub struct PluginRuntimeRegistry {
    inner: BaseRegistry<dyn PluginRuntime>,
}

impl PluginRuntimeRegistry {
    pub fn new() -> Self {
        Self {
            inner: BaseRegistry::new(),
        }
    }

    /// Registry holding the `echo` and `static` runtimes.
    pub fn with_defaults() -> Result<Self, ExtensionError> {
        let registry = Self::new();
        registry.register(Arc::new(EchoPluginRuntime))?;
        registry.register(Arc::new(StaticPluginRuntime))?;
        Ok(registry)
    }

    pub fn register(&self, runtime: Arc<dyn PluginRuntime>) -> Result<(), ExtensionError> {
        self.inner.register(runtime)
    }

    pub fn get(&self, plugin_type: &str) -> Option<Arc<dyn PluginRuntime>> {
        self.inner.get(plugin_type)
    }

    pub fn plugin_types(&self) -> Vec<String> {
        self.inner.keys()
    }
}

impl Default for PluginRuntimeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Reports the call back without side effects.
pub struct EchoPluginRuntime;

#[async_trait]
impl PluginRuntime for EchoPluginRuntime {
    fn plugin_type(&self) -> &str {
        "echo"
    }

    async fn invoke(
        &self,
        config: &PluginConfiguration,
        params: Parameters,
    ) -> Result<Value, CapabilityError> {
        Ok(json!({
            "result": "Plugin executed",
            "plugin": config.name,
            "inputs": params,
        }))
    }
}

/// Returns the configuration blob, parsed as JSON, as the plugin result.
pub struct StaticPluginRuntime;

#[async_trait]
impl PluginRuntime for StaticPluginRuntime {
    fn plugin_type(&self) -> &str {
        "static"
    }

    async fn invoke(
        &self,
        config: &PluginConfiguration,
        _params: Parameters,
    ) -> Result<Value, CapabilityError> {
        if config.config_blob.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&config.config_blob).map_err(|e| {
            CapabilityError::InvalidParameters(format!(
                "config_blob of plugin '{}' is not valid JSON: {}",
                config.name, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(plugin_type: &str, blob: &str) -> PluginConfiguration {
        PluginConfiguration {
            id: "cfg1".to_string(),
            user_id: "u1".to_string(),
            plugin_type: plugin_type.to_string(),
            name: "Sample".to_string(),
            config_blob: blob.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_defaults_registered() {
        let registry = PluginRuntimeRegistry::with_defaults().unwrap();
        assert_eq!(registry.plugin_types(), vec!["echo", "static"]);
        assert!(registry.get("webhook").is_none());
    }

    #[tokio::test]
    async fn test_echo_runtime() {
        let mut params = Parameters::new();
        params.insert("param1".to_string(), json!("foo"));

        let value = EchoPluginRuntime
            .invoke(&config("echo", ""), params)
            .await
            .unwrap();
        assert_eq!(value["result"], "Plugin executed");
        assert_eq!(value["plugin"], "Sample");
        assert_eq!(value["inputs"]["param1"], "foo");
    }

    #[tokio::test]
    async fn test_static_runtime() {
        let value = StaticPluginRuntime
            .invoke(&config("static", r#"{"result": "plugin success"}"#), Parameters::new())
            .await
            .unwrap();
        assert_eq!(value, json!({"result": "plugin success"}));
    }

    #[tokio::test]
    async fn test_static_runtime_invalid_blob() {
        let err = StaticPluginRuntime
            .invoke(&config("static", "{not json"), Parameters::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }
}
