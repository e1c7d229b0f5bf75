//! Bounded retry with exponential backoff for network-facing calls.

use std::time::Duration;

/// Retry schedule: at most `max_attempts` tries, delay doubling from
/// `initial_delay` and capped at `max_delay`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay,
        }
    }

    /// No waiting between attempts; for tests.
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    /// Delay before retry number `attempt` (1-based; attempt 0 is the first
    /// try and has no delay).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let exp = attempt.saturating_sub(1).min(16);
        let delay = self.initial_delay.saturating_mul(1u32 << exp);
        delay.min(self.max_delay)
    }

    /// Run `op` until it succeeds or the attempt budget is spent, sleeping
    /// the scheduled backoff between attempts. Returns the last error when
    /// every attempt fails.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: core::fmt::Display,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt + 1 < self.max_attempts => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    tracing::warn!(%e, attempt, delay_ms = delay.as_millis() as u64, "retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // 1s, 2s, 4s... capped at 30s, five tries total.
        Self::new(5, Duration::from_secs(1), Duration::from_secs(30))
    }
}
