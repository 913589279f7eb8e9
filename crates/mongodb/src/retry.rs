//! Bounded retry with a fixed delay between attempts.

use std::future::Future;
use std::time::Duration;

/// Default number of connection attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default delay between attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// How many times to try an operation and how long to wait in between.
///
/// There is no backoff: every attempt is independent and separated by the
/// same delay, so the worst case wait is `(max_attempts - 1) * delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Total time spent sleeping when every attempt fails.
    pub fn max_wait(&self) -> Duration {
        self.delay * self.max_attempts.saturating_sub(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }
}

/// Run `operation` until it succeeds or `policy.max_attempts` is exhausted.
///
/// The closure receives the 1-based attempt number. The error of the last
/// attempt is returned with context naming `what`.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, what: &str, mut operation: F) -> anyhow::Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        tracing::debug!("{what}: attempt {attempt}/{max_attempts}");
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!("{what} succeeded after {attempt} attempts");
                }
                return Ok(value);
            }
            Err(e) => {
                if attempt < max_attempts {
                    tracing::warn!(
                        "{} failed (attempt {}/{}): {:#}. Retrying in {:?}...",
                        what,
                        attempt,
                        max_attempts,
                        e,
                        policy.delay
                    );
                    tokio::time::sleep(policy.delay).await;
                } else {
                    tracing::warn!("{what} failed (attempt {attempt}/{max_attempts}): {e:#}");
                }
                last_error = Some(e);
            }
        }
    }

    let last_error = last_error.unwrap_or_else(|| anyhow::anyhow!("no attempt was made"));
    Err(last_error.context(format!("{what} failed after {max_attempts} attempts")))
}
