use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::shared::{
    RateLimiter, ReqwestTransport, Request, RequestResult, RequestSender, Transport,
};

mod cache;
mod config;
mod consts;
mod requests;
mod util;

pub mod models;


pub use self::config::NominatimConfig;

use self::cache::NominatimCache;

/**
    A client for the Nominatim place search and reverse geocoding API.

    Results are cached for a short while, concurrent identical lookups
    share a single request, and all requests - across both search and
    reverse lookups - go through one rate limiter that allows at most
    one request per second by default.

    Cloning the client is cheap, and clones share caches and rate limits.
*/
#[derive(Debug, Clone)]
pub struct NominatimClient<T = ReqwestTransport> {
    config: Arc<NominatimConfig>,
    cache: NominatimCache,
    sender: RequestSender<T>,
}

impl NominatimClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(NominatimConfig::default())
    }

    #[must_use]
    pub fn with_config(config: NominatimConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> NominatimClient<T> {
    #[must_use]
    pub fn with_transport(config: NominatimConfig, transport: T) -> Self {
        let limiter = RateLimiter::new(config.rate_limit_delay);
        let sender = RequestSender::new(transport, limiter, config.retry_policy());
        Self {
            cache: NominatimCache::new(&config),
            config: Arc::new(config),
            sender,
        }
    }

    #[must_use]
    pub fn config(&self) -> &NominatimConfig {
        &self.config
    }

    /**
        Empties both caches and forgets about any in-flight requests.
    */
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            search_cache_size: self.cache.searches.len(),
            reverse_cache_size: self.cache.reverses.len(),
            pending_requests: self.cache.searches.pending_len() + self.cache.reverses.pending_len(),
        }
    }

    fn request_get(&self, path: &str) -> Request {
        Request::get(self.config.endpoint(path))
            .with_header("User-Agent", self.config.user_agent.as_str())
            .with_query("format", "json")
    }

    fn emit_result<V>(result: &RequestResult<V>) {
        if let Err(e) = &result {
            debug!("Nominatim error: {e}");
        }
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

/**
    A snapshot of the cache sizes of a [`NominatimClient`].
*/
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub search_cache_size: usize,
    pub reverse_cache_size: usize,
    pub pending_requests: usize,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "search cache: {}, reverse cache: {}, pending requests: {}",
            self.search_cache_size, self.reverse_cache_size, self.pending_requests
        )
    }
}
