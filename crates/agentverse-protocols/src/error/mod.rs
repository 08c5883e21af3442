//! Error types for the AgentVerse protocol layer.

mod capability;
mod extension;
mod store;

pub use capability::*;
pub use extension::*;
pub use store::*;
