//! Plugin capability.

use std::sync::Arc;

use agentverse_protocols::{
    CapabilityError, CapabilityOutput, CapabilityProvider, Parameters, PluginConfigStore,
    StepContext, step_types,
};
use async_trait::async_trait;
use tracing::debug;

use crate::runtime::PluginRuntimeRegistry;

/// Runs the plugin configuration a step refers to.
///
/// The configuration is looked up by `(config_id, owner)`, so a step can
/// only reach configurations of the workflow's owner.
pub struct PluginCapability {
    configs: Arc<dyn PluginConfigStore>,
    runtimes: Arc<PluginRuntimeRegistry>,
}

impl PluginCapability {
    pub fn new(configs: Arc<dyn PluginConfigStore>, runtimes: Arc<PluginRuntimeRegistry>) -> Self {
        Self { configs, runtimes }
    }

    pub fn runtimes(&self) -> &Arc<PluginRuntimeRegistry> {
        &self.runtimes
    }
}

#[async_trait]
impl CapabilityProvider for PluginCapability {
    fn step_type(&self) -> &str {
        step_types::PLUGIN
    }

    fn description(&self) -> &str {
        "Runs a stored plugin configuration"
    }

    async fn execute(
        &self,
        params: Parameters,
        ctx: StepContext,
    ) -> Result<CapabilityOutput, CapabilityError> {
        let config_id = ctx
            .config_ref
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CapabilityError::MissingConfigRef(step_types::PLUGIN.to_string()))?;

        let config = self
            .configs
            .get(config_id, &ctx.owner_id)
            .await?
            .ok_or_else(|| CapabilityError::ConfigNotFound(config_id.to_string()))?;

        let runtime = self
            .runtimes
            .get(&config.plugin_type)
            .ok_or_else(|| CapabilityError::UnsupportedPluginType(config.plugin_type.clone()))?;

        debug!(
            "Executing plugin {} ({}) for step {}",
            config.name, config.plugin_type, ctx.step_key
        );

        let payload = runtime.invoke(&config, params).await?;
        Ok(CapabilityOutput::new(payload).with_note("plugin result received"))
    }
}

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;
