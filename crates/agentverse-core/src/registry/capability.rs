//! Capability registry: the step type routing table.

use std::sync::Arc;

use agentverse_protocols::{CapabilityProvider, ExtensionError};

use super::base::{BaseRegistry, Registerable};

impl Registerable for dyn CapabilityProvider {
    fn routing_key(&self) -> &str {
        self.step_type()
    }
}

/// Registry mapping a step type tag to its capability provider.
///
/// Adding a step type is a registration; the dispatcher never branches on
/// type names.
pub struct CapabilityRegistry {
    inner: BaseRegistry<dyn CapabilityProvider>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self {
            inner: BaseRegistry::new(),
        }
    }

    /// Register a provider under its step type.
    pub fn register(&self, provider: Arc<dyn CapabilityProvider>) -> Result<(), ExtensionError> {
        self.inner.register(provider)
    }

    pub fn unregister(&self, step_type: &str) -> Result<(), ExtensionError> {
        self.inner.unregister(step_type)
    }

    /// Look up the provider for a step type.
    pub fn get(&self, step_type: &str) -> Option<Arc<dyn CapabilityProvider>> {
        self.inner.get(step_type)
    }

    pub fn contains(&self, step_type: &str) -> bool {
        self.inner.contains(step_type)
    }

    /// Registered step types, sorted.
    pub fn step_types(&self) -> Vec<String> {
        self.inner.keys()
    }

    /// `(step_type, description)` pairs, sorted by step type.
    pub fn describe(&self) -> Vec<(String, String)> {
        self.inner
            .sorted()
            .iter()
            .map(|p| (p.step_type().to_string(), p.description().to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
