//! Registries for capability providers.

mod base;
mod capability;

pub use base::{BaseRegistry, Registerable};
pub use capability::CapabilityRegistry;
