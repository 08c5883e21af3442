//! # AgentVerse Protocols
//!
//! Core protocol definitions (traits) for the AgentVerse workflow engine.
//! Contains only interface definitions and plain data types.
//!
//! ## Core Traits
//!
//! - [`CapabilityProvider`] - Backend that performs the work of one step type
//! - [`WorkflowStore`] - Owner-scoped storage of workflow definitions
//! - [`PluginConfigStore`] - Owner-scoped storage of plugin configurations

pub mod capability;
pub mod error;
pub mod store;
pub mod types;

// Re-export core traits
pub use capability::{CapabilityOutput, CapabilityProvider, Parameters, StepContext};
pub use error::{CapabilityError, ExtensionError, StoreError};
pub use store::{PluginConfigStore, WorkflowStore};
pub use types::*;
