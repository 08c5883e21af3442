//! Per-run options.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation and deadline for one run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub cancellation: CancellationToken,
    pub deadline: Option<Instant>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Stop the run once `timeout` has elapsed from now. A timeout too large
    /// to represent as an instant leaves the run without a deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Whether the run must not start another step.
    pub fn should_stop(&self) -> bool {
        self.is_cancelled() || self.is_expired()
    }
}
