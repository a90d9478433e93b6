use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::{Instant, sleep_until};
use tracing::trace;

/**
    Serializes outgoing requests so that each one starts at least
    `delay` after the previous one has completed.

    Clones share the same underlying clock.
*/
#[derive(Debug, Clone)]
pub struct RateLimiter {
    delay: Duration,
    last: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last: Arc::new(Mutex::new(None)),
        }
    }

    /**
        Waits for the slot to become free, and for the minimum delay
        since the last completed request to pass.

        The returned permit must be held for the whole request - the
        completion time is recorded when it gets dropped, which also
        happens if the request future itself is dropped midway.
    */
    pub async fn acquire(&self) -> RateLimitPermit {
        let last = Arc::clone(&self.last).lock_owned().await;

        if let Some(previous) = *last {
            let ready_at = previous + self.delay;
            if ready_at > Instant::now() {
                trace!("Rate limited, waiting {:?}", ready_at - Instant::now());
                sleep_until(ready_at).await;
            }
        }

        RateLimitPermit { last }
    }
}

#[derive(Debug)]
pub struct RateLimitPermit {
    last: OwnedMutexGuard<Option<Instant>>,
}

impl Drop for RateLimitPermit {
    fn drop(&mut self) {
        *self.last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::sleep;

    use super::*;

    const DELAY: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn first_permit_is_immediate() {
        let limiter = RateLimiter::new(DELAY);
        let start = Instant::now();
        drop(limiter.acquire().await);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn consecutive_permits_are_spaced() {
        let limiter = RateLimiter::new(DELAY);
        let start = Instant::now();
        drop(limiter.acquire().await);
        drop(limiter.acquire().await);
        drop(limiter.acquire().await);
        assert!(start.elapsed() >= DELAY * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_counts_from_completion() {
        let limiter = RateLimiter::new(DELAY);
        let start = Instant::now();

        let permit = limiter.acquire().await;
        sleep(Duration::from_millis(500)).await;
        drop(permit);

        drop(limiter.acquire().await);
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_time_is_credited() {
        let limiter = RateLimiter::new(DELAY);
        drop(limiter.acquire().await);
        sleep(Duration::from_secs(5)).await;

        let before = Instant::now();
        drop(limiter.acquire().await);
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_the_clock() {
        let a = RateLimiter::new(DELAY);
        let b = a.clone();
        let start = Instant::now();
        drop(a.acquire().await);
        drop(b.acquire().await);
        assert!(start.elapsed() >= DELAY);
    }
}
