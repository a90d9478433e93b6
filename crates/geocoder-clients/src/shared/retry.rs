use std::time::Duration;

use super::RequestError;

/**
    How many times, and how patiently, a failed request gets retried.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub attempt_timeout: Duration,
}

impl RetryPolicy {
    /**
        The delay to wait after the given (zero-based) attempt has failed,
        doubling for every attempt made so far.
    */
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff.saturating_mul(2u32.saturating_pow(attempt))
    }

    /**
        Whether another attempt should be made after `error`,
        given that `attempt` (zero-based) was the one that failed.
    */
    #[must_use]
    pub fn should_retry(&self, error: &RequestError, attempt: u32) -> bool {
        attempt < self.max_retries && error.is_retryable()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_secs(1),
            attempt_timeout: Duration::from_secs(8),
        }
    }
}
