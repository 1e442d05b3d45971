use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Retry policy for upstream calls: bounded attempts, exponential backoff,
/// and a budget per attempt so one slow call cannot stall a whole request.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles with each further retry
    pub base_backoff: Duration,
    /// Budget for a single attempt
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_backoff: Duration::from_millis(250),
            timeout: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    // Capped so misconfigured retry counts cannot produce hour-long waits
    fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(6);
        self.base_backoff * (1u32 << exponent)
    }
}

/// Runs `call` until it succeeds, fails with a non-retryable error, or the
/// retry budget is spent. Attempts that outlive the per-attempt timeout
/// count as retryable upstream failures.
pub async fn call_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut call: F,
) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;

        let outcome = match tokio::time::timeout(policy.timeout, call()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(AppError::Upstream(format!(
                "{} timed out after {:?}",
                operation, policy.timeout
            ))),
        };

        match outcome {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt <= policy.max_retries => {
                let delay = policy.backoff(attempt);
                tracing::warn!(
                    operation,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Upstream call failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
