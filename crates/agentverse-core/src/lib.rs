//! # AgentVerse Core
//!
//! Workflow step execution engine.
//!
//! ## Components
//!
//! - [`CapabilityRegistry`] - Step type tag to capability provider table
//! - [`StepDispatcher`] - Routes one step to its provider and normalizes the outcome
//! - [`RunExecutor`] - Runs a stored workflow step by step and builds a [`RunResult`]
//!
//! A run never aborts because of a single step: failures are recorded in the
//! result and the remaining steps still execute. Only a missing workflow or
//! an unreachable store fail the call itself.

pub mod error;
pub mod registry;
pub mod run;

pub use error::RunError;
pub use registry::CapabilityRegistry;
pub use run::{
    MockCapabilityProvider, RunContext, RunExecutor, RunOptions, RunResult, RunStatus,
    StepDispatcher, StepError, StepOutcome,
};
