mod shared;

pub mod nominatim;

pub use tokio_util::sync::CancellationToken;

pub use self::nominatim::{CacheStats, NominatimClient, NominatimConfig};
pub use self::shared::{
    RateLimitPermit, RateLimiter, ReqwestTransport, Request, RequestCacheMap, RequestError,
    RequestResult, RequestSender, ResponseError, RetryPolicy, Transport, with_cancellation,
};

/**
    All of the clients used by the application, created once
    at startup and handed out to whatever needs them.
*/
#[derive(Debug, Clone)]
pub struct Clients {
    pub nominatim: NominatimClient,
}

impl Clients {
    #[must_use]
    pub fn new() -> Self {
        Self::with_nominatim_config(NominatimConfig::default())
    }

    #[must_use]
    pub fn with_nominatim_config(config: NominatimConfig) -> Self {
        Self {
            nominatim: NominatimClient::with_config(config),
        }
    }
}

impl Default for Clients {
    fn default() -> Self {
        Self::new()
    }
}
