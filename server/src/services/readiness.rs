//! Store readiness polling.
//!
//! DESIGN
//! ======
//! A store that is still starting up (or briefly unreachable) is checked a
//! bounded number of times with a fixed delay between checks. A failed
//! check counts as "not ready"; after the ceiling the caller gets
//! [`Readiness::Exhausted`] and reports the store as unavailable. This is
//! the only automatic retry in the viewer.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::config::ReadinessConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 10, delay: Duration::from_millis(500) }
    }
}

impl From<ReadinessConfig> for RetryPolicy {
    fn from(config: ReadinessConfig) -> Self {
        Self { max_attempts: config.max_attempts.max(1), delay: config.delay() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready { attempts: u32 },
    Exhausted { attempts: u32 },
}

impl RetryPolicy {
    /// Check until ready or out of attempts. Sleeps `delay` between checks,
    /// never after the last one.
    pub async fn wait_ready<F, Fut, E>(&self, mut check: F) -> Readiness
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: std::fmt::Display,
    {
        let max_attempts = self.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            match check().await {
                Ok(()) => return Readiness::Ready { attempts: attempt },
                Err(e) => debug!(attempt, max_attempts, error = %e, "store not ready"),
            }
            if attempt < max_attempts {
                tokio::time::sleep(self.delay).await;
            }
        }
        Readiness::Exhausted { attempts: max_attempts }
    }
}

#[cfg(test)]
#[path = "readiness_test.rs"]
mod tests;
