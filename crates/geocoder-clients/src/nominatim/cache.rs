use crate::shared::RequestCacheMap;

use super::config::NominatimConfig;
use super::models::{LocationResult, ReverseResult};

#[derive(Debug, Clone)]
pub(super) struct NominatimCache {
    pub searches: RequestCacheMap<Vec<LocationResult>>,
    pub reverses: RequestCacheMap<Option<ReverseResult>>,
}

impl NominatimCache {
    pub fn new(config: &NominatimConfig) -> Self {
        Self {
            searches: RequestCacheMap::new(config.cache_ttl, config.cache_max_size),
            reverses: RequestCacheMap::new(config.cache_ttl, config.cache_max_size),
        }
    }

    pub fn clear(&self) {
        self.searches.clear();
        self.reverses.clear();
    }
}
