use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared, WeakShared};
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::{debug, trace};

use super::RequestResult;

/// Share of the capacity that gets evicted, oldest first, once the map overflows.
const EVICTION_FRACTION: f64 = 0.2;

type SharedRequest<T> = Shared<BoxFuture<'static, RequestResult<T>>>;
type WeakRequest<T> = WeakShared<BoxFuture<'static, RequestResult<T>>>;

struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

impl<T> CacheEntry<T> {
    fn is_valid(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

struct PendingRequest<T> {
    id: u64,
    request: WeakRequest<T>,
}

struct CacheState<T> {
    entries: HashMap<String, CacheEntry<T>>,
    order: VecDeque<String>,
    pending: HashMap<String, PendingRequest<T>>,
    next_pending_id: u64,
}

impl<T> CacheState<T> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            pending: HashMap::new(),
            next_pending_id: 0,
        }
    }

    fn remove_entry(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }
}

enum Lookup<T> {
    Cached(T),
    InFlight(SharedRequest<T>),
}

/**
    A map of cached request results, with a bounded size and a time-to-live.

    Concurrent lookups for the same key that miss the cache are coalesced,
    so that only a single request is ever in flight per key. All callers
    that joined an in-flight request receive the same result.

    Once the map grows beyond its capacity, the oldest entries (by insertion
    order) are evicted in a single batch. Reads never change the order.
*/
pub struct RequestCacheMap<T> {
    ttl: Duration,
    max_size: usize,
    state: Arc<Mutex<CacheState<T>>>,
}

impl<T> RequestCacheMap<T>
where
    T: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(ttl: Duration, max_size: usize) -> Self {
        Self {
            ttl,
            max_size,
            state: Arc::new(Mutex::new(CacheState::new())),
        }
    }

    /**
        Returns the cached value for `key`, or runs `fut` to produce it.

        Successful results are always cached, errors never are.
    */
    pub async fn with_caching<F>(&self, key: impl Into<String>, fut: F) -> RequestResult<T>
    where
        F: Future<Output = RequestResult<T>> + Send + 'static,
    {
        self.with_caching_if(key, fut, |_| true).await
    }

    /**
        Same as [`RequestCacheMap::with_caching`], but only successful
        results that pass `should_cache` are written to the cache.
    */
    pub async fn with_caching_if<F>(
        &self,
        key: impl Into<String>,
        fut: F,
        should_cache: fn(&T) -> bool,
    ) -> RequestResult<T>
    where
        F: Future<Output = RequestResult<T>> + Send + 'static,
    {
        let key = key.into();

        // NOTE: Lookup and registration happen in one synchronous critical
        // section, there must never be an await point between the two
        match self.lookup_or_register(&key, fut, should_cache) {
            Lookup::Cached(value) => Ok(value),
            Lookup::InFlight(request) => request.await,
        }
    }

    fn lookup_or_register<F>(&self, key: &str, fut: F, should_cache: fn(&T) -> bool) -> Lookup<T>
    where
        F: Future<Output = RequestResult<T>> + Send + 'static,
    {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        match state.entries.get(key) {
            Some(entry) if entry.is_valid(self.ttl) => {
                debug!("Cache hit for '{key}'");
                return Lookup::Cached(entry.value.clone());
            }
            Some(_) => {
                trace!("Cache entry for '{key}' has expired");
                state.remove_entry(key);
            }
            None => {}
        }

        if let Some(request) = state.pending.get(key).and_then(|p| p.request.upgrade()) {
            debug!("Joining in-flight request for '{key}'");
            return Lookup::InFlight(request);
        }

        let id = state.next_pending_id;
        state.next_pending_id += 1;

        let pending_guard = PendingGuard {
            state: Arc::clone(&self.state),
            key: key.to_string(),
            id,
        };
        let map = self.clone();
        let owned_key = key.to_string();

        let request = async move {
            let _pending_guard = pending_guard;
            let result = fut.await;
            if let Some(value) = result.as_ref().ok().filter(|v| should_cache(v)) {
                map.insert(owned_key, value.clone());
            }
            result
        }
        .boxed()
        .shared();

        if let Some(weak) = request.downgrade() {
            state.pending.insert(key.to_string(), PendingRequest { id, request: weak });
        }

        Lookup::InFlight(request)
    }

    /**
        Returns the cached value for `key`, if there is one and it has not expired.
    */
    #[must_use]
    pub fn get(&self, key: &str) -> Option<T> {
        let state = self.state.lock();
        state
            .entries
            .get(key)
            .filter(|entry| entry.is_valid(self.ttl))
            .map(|entry| entry.value.clone())
    }

    /**
        Writes a value to the cache, evicting the oldest
        entries if the map has grown beyond its capacity.

        Overwriting an existing key counts as a new insertion.
    */
    pub fn insert(&self, key: impl Into<String>, value: T) {
        let key = key.into();
        let mut state = self.state.lock();

        state.remove_entry(&key);
        state.order.push_back(key.clone());
        state.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );

        if state.entries.len() > self.max_size {
            let count = self.eviction_count();
            trace!("Cache over capacity, evicting {count} oldest entries");
            for _ in 0..count {
                match state.order.pop_front() {
                    Some(oldest) => {
                        state.entries.remove(&oldest);
                    }
                    None => break,
                }
            }
        }
    }

    fn eviction_count(&self) -> usize {
        ((self.max_size as f64 * EVICTION_FRACTION).floor() as usize).max(1)
    }

    /**
        Removes all cached values and forgets about any in-flight requests.

        Requests that are already in flight will still deliver their
        results to the callers currently waiting on them.
    */
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.order.clear();
        state.pending.clear();
    }

    /**
        Number of entries in the cache, including expired
        entries that have not been looked up or evicted yet.
    */
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }
}

impl<T> Clone for RequestCacheMap<T> {
    fn clone(&self) -> Self {
        Self {
            ttl: self.ttl,
            max_size: self.max_size,
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> fmt::Debug for RequestCacheMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("RequestCacheMap")
            .field("ttl", &self.ttl)
            .field("max_size", &self.max_size)
            .field("len", &state.entries.len())
            .field("pending", &state.pending.len())
            .finish()
    }
}

/**
    Removes a pending request from the registry once its future either
    settles or gets dropped because every caller waiting on it went away.
*/
struct PendingGuard<T> {
    state: Arc<Mutex<CacheState<T>>>,
    key: String,
    id: u64,
}

impl<T> Drop for PendingGuard<T> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if state.pending.get(&self.key).is_some_and(|p| p.id == self.id) {
            state.pending.remove(&self.key);
        }
    }
}
