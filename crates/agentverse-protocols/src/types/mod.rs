//! Data types shared across the AgentVerse crates.

mod plugin;
mod serde_helpers;
mod workflow;

pub use plugin::*;
pub use workflow::*;
