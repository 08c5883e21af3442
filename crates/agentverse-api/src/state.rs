//! Application state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use agentverse_config::Config;
use agentverse_core::{CapabilityRegistry, RunExecutor, RunOptions, StepDispatcher};
use agentverse_protocols::{PluginConfigStore, WorkflowStore};

/// Application state shared across handlers.
pub struct AppState {
    pub workflows: Arc<dyn WorkflowStore>,
    pub plugins: Arc<dyn PluginConfigStore>,
    pub registry: Arc<CapabilityRegistry>,
    pub executor: Arc<RunExecutor>,
    pub config: Config,
    start_time: Instant,
}

impl AppState {
    pub fn new(
        config: Config,
        workflows: Arc<dyn WorkflowStore>,
        plugins: Arc<dyn PluginConfigStore>,
        registry: Arc<CapabilityRegistry>,
    ) -> Self {
        let executor = RunExecutor::new(workflows.clone(), StepDispatcher::new(registry.clone()))
            .with_step_timeout(config.executor.step_timeout());

        Self {
            workflows,
            plugins,
            registry,
            executor: Arc::new(executor),
            config,
            start_time: Instant::now(),
        }
    }

    /// Get uptime.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Identity used for requests without a bearer token.
    pub fn default_user(&self) -> Option<&str> {
        self.config.auth.default_user.as_deref()
    }

    /// Options for a new run, bounded by the configured run timeout.
    pub fn run_options(&self) -> RunOptions {
        match self.config.executor.run_timeout() {
            Some(timeout) => RunOptions::new().with_timeout(timeout),
            None => RunOptions::new(),
        }
    }
}
