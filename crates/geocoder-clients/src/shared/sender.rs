use tokio::time::{sleep, timeout};
use tracing::debug;

use super::{RateLimiter, Request, RequestError, RequestResult, RetryPolicy, Transport};

/**
    Sends requests through a [`Transport`], honoring a shared
    [`RateLimiter`] and retrying transient failures per [`RetryPolicy`].

    Every attempt, including retries, waits for the rate limiter
    and gets its own timeout. A timed out attempt is retried.
*/
#[derive(Debug, Clone)]
pub struct RequestSender<T> {
    transport: T,
    limiter: RateLimiter,
    policy: RetryPolicy,
}

impl<T: Transport> RequestSender<T> {
    #[must_use]
    pub fn new(transport: T, limiter: RateLimiter, policy: RetryPolicy) -> Self {
        Self {
            transport,
            limiter,
            policy,
        }
    }

    #[allow(clippy::missing_errors_doc)]
    pub async fn send(&self, request: &Request) -> RequestResult<Vec<u8>> {
        let mut attempt = 0;
        loop {
            let result = self.send_once(request).await;
            match result {
                Err(e) if self.policy.should_retry(&e, attempt) => {
                    let delay = self.policy.backoff(attempt);
                    debug!(
                        "Attempt {} for '{}' failed ({e}), retrying in {delay:?}",
                        attempt + 1,
                        request.url()
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn send_once(&self, request: &Request) -> RequestResult<Vec<u8>> {
        let _permit = self.limiter.acquire().await;
        let limit = self.policy.attempt_timeout;
        match timeout(limit, self.transport.send(request)).await {
            Ok(result) => result,
            Err(_) => Err(RequestError::Timeout(limit)),
        }
    }
}
