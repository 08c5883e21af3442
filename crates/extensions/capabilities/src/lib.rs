//! Built-in capabilities for AgentVerse.
//!
//! This extension provides:
//! - `plugin`: runs a stored plugin configuration through its [`PluginRuntime`]
//! - `agent`: placeholder agent dispatcher
//! - `tool`: placeholder tool invoker

mod plugin;
mod runtime;
mod stub;

use std::sync::Arc;

use agentverse_core::CapabilityRegistry;
use agentverse_protocols::{ExtensionError, PluginConfigStore};

pub use plugin::PluginCapability;
pub use runtime::{EchoPluginRuntime, PluginRuntime, PluginRuntimeRegistry, StaticPluginRuntime};
pub use stub::StubCapability;

/// Register the `plugin`, `agent` and `tool` capabilities.
pub fn register_builtin(
    registry: &CapabilityRegistry,
    configs: Arc<dyn PluginConfigStore>,
) -> Result<(), ExtensionError> {
    let runtimes = Arc::new(PluginRuntimeRegistry::with_defaults()?);
    registry.register(Arc::new(PluginCapability::new(configs, runtimes)))?;
    registry.register(Arc::new(StubCapability::agent()))?;
    registry.register(Arc::new(StubCapability::tool()))?;
    Ok(())
}
