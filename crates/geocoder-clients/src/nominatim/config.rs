use std::time::Duration;

use crate::shared::RetryPolicy;

use super::consts::{
    BASE_URL, CACHE_MAX_SIZE, CACHE_TTL, INITIAL_BACKOFF, MAX_RETRIES, RATE_LIMIT_DELAY,
    REQUEST_TIMEOUT, REVERSE_ZOOM, SEARCH_LIMIT, USER_AGENT,
};

/**
    Tunables for a [`NominatimClient`](super::NominatimClient).

    The defaults follow the public Nominatim usage policy:
    at most one request per second, with an identifying user agent.
*/
#[derive(Debug, Clone, PartialEq)]
pub struct NominatimConfig {
    pub base_url: String,
    pub user_agent: String,
    pub cache_ttl: Duration,
    pub cache_max_size: usize,
    pub rate_limit_delay: Duration,
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub search_limit: u32,
    pub reverse_zoom: u8,
}

impl NominatimConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            cache_ttl: CACHE_TTL,
            cache_max_size: CACHE_MAX_SIZE,
            rate_limit_delay: RATE_LIMIT_DELAY,
            request_timeout: REQUEST_TIMEOUT,
            max_retries: MAX_RETRIES,
            initial_backoff: INITIAL_BACKOFF,
            search_limit: SEARCH_LIMIT,
            reverse_zoom: REVERSE_ZOOM,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_cache_max_size(mut self, max_size: usize) -> Self {
        self.cache_max_size = max_size;
        self
    }

    #[must_use]
    pub fn with_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, initial_backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.initial_backoff = initial_backoff;
        self
    }

    pub(super) fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_backoff: self.initial_backoff,
            attempt_timeout: self.request_timeout,
        }
    }

    pub(super) fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_usage_policy() {
        let config = NominatimConfig::default();
        assert_eq!(config.rate_limit_delay, Duration::from_secs(1));
        assert_eq!(config.request_timeout, Duration::from_secs(8));
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.cache_max_size, 100);
        assert_eq!(config.search_limit, 5);
        assert_eq!(config.reverse_zoom, 18);
        assert!(config.user_agent.starts_with("geocoder/"));
    }

    #[test]
    fn retry_policy_mirrors_config() {
        let policy = NominatimConfig::default()
            .with_retries(4, Duration::from_millis(250))
            .retry_policy();
        assert_eq!(policy.max_retries, 4);
        assert_eq!(policy.initial_backoff, Duration::from_millis(250));
        assert_eq!(policy.attempt_timeout, Duration::from_secs(8));
    }

    #[test]
    fn endpoint_joins_paths() {
        let config = NominatimConfig::default().with_base_url("http://localhost:8080/");
        assert_eq!(config.endpoint("search"), "http://localhost:8080/search");
    }
}
