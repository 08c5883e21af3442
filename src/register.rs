//! Capability registration for AgentVerse.

use std::sync::Arc;

use tracing::info;

use agentverse_core::CapabilityRegistry;
use agentverse_protocols::{ExtensionError, PluginConfigStore};

/// Build the capability registry with every built-in step type registered.
pub(crate) fn build_registry(
    plugins: Arc<dyn PluginConfigStore>,
) -> Result<Arc<CapabilityRegistry>, ExtensionError> {
    let registry = CapabilityRegistry::new();
    agentverse_capabilities::register_builtin(&registry, plugins)?;

    info!(
        "Registered {} capabilities: {}",
        registry.len(),
        registry.step_types().join(", ")
    );
    Ok(Arc::new(registry))
}
