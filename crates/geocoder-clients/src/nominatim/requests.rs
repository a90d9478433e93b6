use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::shared::{RequestError, with_cancellation};

use super::consts::{MIN_QUERY_CHARS, REVERSE_PATH, SEARCH_PATH};
use super::models::{LocationResult, ReverseResult};
use super::util::{coordinate_key, normalize_query};
use super::{NominatimClient, RequestResult, Transport};

impl<T: Transport> NominatimClient<T> {
    /**
        Searches for places matching the given free-text query.

        Queries shorter than two characters, after trimming,
        resolve to an empty list without touching the network.
    */
    #[allow(clippy::missing_errors_doc)]
    pub async fn search(&self, query: &str) -> RequestResult<Vec<LocationResult>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let key = normalize_query(query);
        let request = self
            .request_get(SEARCH_PATH)
            .with_query("q", query)
            .with_query("limit", self.config.search_limit)
            .with_query("addressdetails", 1)
            .with_query("extratags", 1);

        let sender = self.sender.clone();
        let query = query.to_string();
        let fut = async move {
            debug!("Fetching Nominatim search results for '{query}'");

            // NOTE: We make this inner scope so that
            // we can catch and emit all errors at once
            let inner: RequestResult<Vec<LocationResult>> = async {
                let bytes = sender.send(&request).await?;
                Ok(LocationResult::list_from_json(&bytes))
            }
            .await;

            Self::emit_result(&inner);

            inner
        };

        self.cache.searches.with_caching(key, fut).await
    }

    /**
        Same as [`NominatimClient::search`], but resolves to
        [`RequestError::Cancelled`] as soon as `token` is cancelled.

        Cancelling only affects this caller - anyone else waiting
        for the same query still receives the result.
    */
    #[allow(clippy::missing_errors_doc)]
    pub async fn search_with_cancel(
        &self,
        query: &str,
        token: &CancellationToken,
    ) -> RequestResult<Vec<LocationResult>> {
        with_cancellation(token, self.search(query)).await
    }

    /**
        Looks up the address for a coordinate, including its parts.

        Coordinates are rounded to 4 decimal places for caching, so nearby
        lookups share results. Only found addresses are cached.
    */
    #[allow(clippy::missing_errors_doc)]
    pub async fn reverse_lookup(&self, lat: f64, lng: f64) -> RequestResult<Option<ReverseResult>> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(RequestError::InvalidInput(format!(
                "invalid coordinates ({lat}, {lng})"
            )));
        }

        let key = coordinate_key(lat, lng);
        let request = self
            .request_get(REVERSE_PATH)
            .with_query("lat", lat)
            .with_query("lon", lng)
            .with_query("addressdetails", 1)
            .with_query("zoom", self.config.reverse_zoom);

        let sender = self.sender.clone();
        let fut = async move {
            debug!("Fetching Nominatim address for ({lat}, {lng})");

            // NOTE: We make this inner scope so that
            // we can catch and emit all errors at once
            let inner: RequestResult<Option<ReverseResult>> = async {
                let bytes = sender.send(&request).await?;
                Ok(ReverseResult::try_from_json(&bytes)?)
            }
            .await;

            Self::emit_result(&inner);

            inner
        };

        self.cache
            .reverses
            .with_caching_if(key, fut, Option::is_some)
            .await
    }

    #[allow(clippy::missing_errors_doc)]
    pub async fn reverse_lookup_with_cancel(
        &self,
        lat: f64,
        lng: f64,
        token: &CancellationToken,
    ) -> RequestResult<Option<ReverseResult>> {
        with_cancellation(token, self.reverse_lookup(lat, lng)).await
    }

    /**
        Looks up the display address for a coordinate.

        Resolves to `None` if the provider has no address for it.
    */
    #[allow(clippy::missing_errors_doc)]
    pub async fn reverse_geocode(&self, lat: f64, lng: f64) -> RequestResult<Option<String>> {
        let result = self.reverse_lookup(lat, lng).await?;
        Ok(result.map(|r| r.display_name))
    }

    #[allow(clippy::missing_errors_doc)]
    pub async fn reverse_geocode_with_cancel(
        &self,
        lat: f64,
        lng: f64,
        token: &CancellationToken,
    ) -> RequestResult<Option<String>> {
        with_cancellation(token, self.reverse_geocode(lat, lng)).await
    }
}
