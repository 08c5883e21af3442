//! Workflow run execution.

mod context;
mod dispatcher;
mod executor;
mod mock_provider;
mod options;
mod outcome;
mod result;

pub use context::{OWNER_KEY, RunContext};
pub use dispatcher::StepDispatcher;
pub use executor::{DEFAULT_STEP_TIMEOUT, RunExecutor};
pub use mock_provider::MockCapabilityProvider;
pub use options::RunOptions;
pub use outcome::{StepError, StepOutcome};
pub use result::{RunResult, RunStatus};
