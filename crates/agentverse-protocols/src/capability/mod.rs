//! Capability provider protocol.
//!
//! A capability provider is the backend that performs the work of one step
//! type (plugin, agent, tool, ...). Providers are registered by their step
//! type tag and invoked once per step with the merged step parameters.

mod context;
mod output;
mod traits;

pub use context::*;
pub use output::*;
pub use traits::*;

/// Parameters handed to a provider: a JSON object.
pub type Parameters = serde_json::Map<String, serde_json::Value>;
