//! Invocation-wide deadline

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{FluxError, Result};

/// Budgets too large to represent as an instant are clamped to this
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// One deadline shared by every remote call of an invocation
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    budget: Duration,
    expires_at: Instant,
}

impl Deadline {
    /// Start the clock now
    pub fn after(budget: Duration) -> Self {
        let now = Instant::now();
        let expires_at = now
            .checked_add(budget)
            .unwrap_or_else(|| now + FAR_FUTURE);
        Self { budget, expires_at }
    }

    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Run a remote call, failing with `Timeout` once the deadline passes
    pub async fn run<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout_at(self.expires_at, call).await {
            Ok(result) => result,
            Err(_) => Err(FluxError::Timeout(self.budget)),
        }
    }
}
