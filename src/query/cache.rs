//! Remote-cache layer: server responses keyed by [`QueryKey`].
//!
//! ```text
//! query / ensure_fresh ──→ fresh? ──yes──→ cached state
//!                            │no
//!                            ▼
//!                      in flight? ──yes──→ join it (no second request)
//!                            │no
//!                            ▼
//!                      start fetch ──→ settle ──→ notify subscribers
//!
//! invalidate(filter) ──→ mark matching stale ──→ refetch mounted ones
//! ```
//!
//! Values are stored type-erased; each consumer downcasts to the type its
//! fetcher produces. Failed fetches keep the previous data and record the
//! error next to it.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::config::CacheConfig;
use crate::error::ApiError;

use super::key::QueryKey;
use super::mutation::Mutation;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

type AnyValue = Arc<dyn Any + Send + Sync>;
type ErasedFetcher = Arc<dyn Fn() -> BoxFuture<Result<AnyValue, ApiError>> + Send + Sync>;

/// What a consumer sees for one query identity.
#[derive(Debug)]
pub struct QueryState<T> {
    pub data: Option<Arc<T>>,
    /// No data yet and a request for it is in flight.
    pub is_loading: bool,
    /// A request for this identity is in flight.
    pub is_fetching: bool,
    pub error: Option<ApiError>,
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            is_loading: self.is_loading,
            is_fetching: self.is_fetching,
            error: self.error.clone(),
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_success(&self) -> bool {
        self.data.is_some() && self.error.is_none()
    }

    /// The data, or the error of the last fetch. A recorded error wins
    /// over older cached data.
    pub fn into_result(self) -> Result<Arc<T>, ApiError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.data.ok_or_else(|| ApiError::Network {
            message: "request was cancelled before a response arrived".to_string(),
        })
    }
}

struct InFlight {
    id: u64,
    done: watch::Receiver<bool>,
}

struct Entry {
    data: Option<AnyValue>,
    error: Option<ApiError>,
    invalidated: bool,
    /// Bumped on every invalidation; a fetch started before the bump does
    /// not clear the stale mark.
    epoch: u64,
    fetched_at: Option<Instant>,
    in_flight: Option<InFlight>,
    fetcher: Option<ErasedFetcher>,
    observers: usize,
    version: watch::Sender<u64>,
}

impl Entry {
    fn new() -> Self {
        let (version, _) = watch::channel(0);
        Self {
            data: None,
            error: None,
            invalidated: false,
            epoch: 0,
            fetched_at: None,
            in_flight: None,
            fetcher: None,
            observers: 0,
            version,
        }
    }

    fn bump(&self) {
        self.version.send_modify(|v| *v = v.wrapping_add(1));
    }

    fn is_stale(&self, stale_time: Duration) -> bool {
        self.invalidated
            || self.data.is_none()
            || self
                .fetched_at
                .map_or(true, |at| at.elapsed() >= stale_time)
    }
}

struct CacheInner {
    entries: HashMap<QueryKey, Entry>,
    next_flight: u64,
}

/// Shared query cache. Cloning yields another handle to the same cache.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Mutex<CacheInner>>,
    stale_time: Duration,
}

enum Role {
    Leader(FlightGuard),
    Follower,
}

impl QueryCache {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                entries: HashMap::new(),
                next_flight: 0,
            })),
            stale_time,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Duration::from_millis(config.stale_time_ms))
    }

    /// Return cached data if fresh, otherwise fetch it.
    ///
    /// Concurrent calls for the same key share one request.
    pub async fn query<T, F, Fut>(&self, key: QueryKey, fetch: F) -> QueryState<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let fetcher = erase(fetch);
        if self.needs_fetch(&key) {
            self.run_fetch(&key, fetcher).await;
        } else {
            tracing::debug!(key = %key, "query cache hit");
        }
        self.snapshot(&key)
    }

    /// Mount a consumer of `key`. The entry is refetched on invalidation
    /// for as long as the returned subscription is alive.
    ///
    /// Mounting does not fetch; call [`QuerySubscription::ensure_fresh`].
    pub fn subscribe<T, F, Fut>(&self, key: QueryKey, fetch: F) -> QuerySubscription<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let fetcher = erase(fetch);
        let changes = {
            let mut inner = self.inner.lock();
            let entry = inner.entries.entry(key.clone()).or_insert_with(Entry::new);
            entry.observers += 1;
            entry.fetcher = Some(fetcher.clone());
            entry.version.subscribe()
        };
        tracing::debug!(key = %key, "query mounted");

        QuerySubscription {
            cache: self.clone(),
            key,
            fetcher,
            changes,
            _marker: PhantomData,
        }
    }

    /// Read the current state of `key` without fetching.
    pub fn snapshot<T: Send + Sync + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        let inner = self.inner.lock();
        let Some(entry) = inner.entries.get(key) else {
            return QueryState {
                data: None,
                is_loading: false,
                is_fetching: false,
                error: None,
            };
        };

        let data = entry.data.clone().and_then(|value| match value.downcast::<T>() {
            Ok(typed) => Some(typed),
            Err(_) => {
                tracing::warn!(key = %key, "cached value has a different type than requested");
                None
            }
        });
        let is_fetching = entry.in_flight.is_some();
        let is_loading = data.is_none() && is_fetching;

        QueryState {
            data,
            is_loading,
            is_fetching,
            error: entry.error.clone(),
        }
    }

    /// Mark every entry matching `filter` stale and refetch the mounted
    /// ones. Resolves once those refetches have settled.
    ///
    /// Returns the number of entries invalidated.
    pub async fn invalidate(&self, filter: &QueryKey) -> usize {
        let (count, refetch) = {
            let mut inner = self.inner.lock();
            let mut count = 0;
            let mut refetch = Vec::new();
            for (key, entry) in inner.entries.iter_mut() {
                if !key.matches(filter) {
                    continue;
                }
                count += 1;
                entry.invalidated = true;
                entry.epoch += 1;
                if entry.observers > 0 {
                    if let Some(fetcher) = &entry.fetcher {
                        // The running request may predate the change that
                        // caused the invalidation; its result is discarded.
                        if entry.in_flight.take().is_some() {
                            tracing::debug!(key = %key, "superseding in-flight fetch");
                        }
                        refetch.push((key.clone(), fetcher.clone()));
                    }
                }
                entry.bump();
            }
            (count, refetch)
        };

        tracing::debug!(
            filter = %filter,
            invalidated = count,
            refetching = refetch.len(),
            "queries invalidated"
        );

        for (key, fetcher) in refetch {
            self.run_fetch(&key, fetcher).await;
        }
        count
    }

    /// Start a write whose success invalidates cached queries.
    pub fn mutation<T>(&self) -> Mutation<'_, T> {
        Mutation::new(self)
    }

    /// Number of mounted consumers of `key`.
    pub fn observer_count(&self, key: &QueryKey) -> usize {
        self.inner
            .lock()
            .entries
            .get(key)
            .map_or(0, |entry| entry.observers)
    }

    fn needs_fetch(&self, key: &QueryKey) -> bool {
        let inner = self.inner.lock();
        match inner.entries.get(key) {
            None => true,
            Some(entry) => entry.in_flight.is_some() || entry.is_stale(self.stale_time),
        }
    }

    /// Fetch `key`, or join the request already in flight for it, and wait
    /// until no request for it is outstanding.
    async fn run_fetch(&self, key: &QueryKey, fetcher: ErasedFetcher) {
        let role = {
            let mut inner = self.inner.lock();
            let id = inner.next_flight;
            inner.next_flight += 1;
            let entry = inner.entries.entry(key.clone()).or_insert_with(Entry::new);
            if entry.in_flight.is_some() {
                Role::Follower
            } else {
                let (done, receiver) = watch::channel(false);
                entry.in_flight = Some(InFlight { id, done: receiver });
                entry.bump();
                Role::Leader(FlightGuard {
                    inner: self.inner.clone(),
                    key: key.clone(),
                    id,
                    epoch: entry.epoch,
                    done,
                    outcome: None,
                })
            }
        };

        match role {
            Role::Leader(mut guard) => {
                tracing::debug!(key = %key, "fetching query");
                let outcome = fetcher().await;
                if let Err(err) = &outcome {
                    tracing::warn!(key = %key, error = %err, "query fetch failed");
                }
                guard.outcome = Some(outcome);
                drop(guard);
            }
            Role::Follower => {
                tracing::debug!(key = %key, "joining in-flight query");
            }
        }

        self.wait_settled(key).await;
    }

    /// Wait until `key` has no request in flight, following superseding
    /// requests as they start.
    async fn wait_settled(&self, key: &QueryKey) {
        loop {
            let done = {
                let inner = self.inner.lock();
                inner
                    .entries
                    .get(key)
                    .and_then(|entry| entry.in_flight.as_ref())
                    .map(|flight| flight.done.clone())
            };
            let Some(mut done) = done else {
                return;
            };
            // An error means the leader is gone; its guard already cleared
            // the flight, so the next iteration observes that.
            let _ = done.wait_for(|finished| *finished).await;
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

/// Settles a fetch exactly once: with its outcome, or as abandoned if the
/// fetching future is dropped.
struct FlightGuard {
    inner: Arc<Mutex<CacheInner>>,
    key: QueryKey,
    id: u64,
    epoch: u64,
    done: watch::Sender<bool>,
    outcome: Option<Result<AnyValue, ApiError>>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        {
            let mut inner = self.inner.lock();
            if let Some(entry) = inner.entries.get_mut(&self.key) {
                let current = entry.in_flight.as_ref().map(|flight| flight.id) == Some(self.id);
                if current {
                    entry.in_flight = None;
                    match self.outcome.take() {
                        Some(Ok(value)) => {
                            entry.data = Some(value);
                            entry.error = None;
                            entry.fetched_at = Some(Instant::now());
                            entry.invalidated = entry.epoch != self.epoch;
                        }
                        Some(Err(err)) => entry.error = Some(err),
                        None => {
                            tracing::debug!(key = %self.key, "query fetch abandoned");
                        }
                    }
                    entry.bump();
                } else {
                    tracing::debug!(key = %self.key, "discarding superseded query result");
                }
            }
        }
        self.done.send_replace(true);
    }
}

fn erase<T, F, Fut>(fetch: F) -> ErasedFetcher
where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    Arc::new(move || {
        let fut = fetch();
        let erased: BoxFuture<Result<AnyValue, ApiError>> =
            Box::pin(async move { fut.await.map(|value| Arc::new(value) as AnyValue) });
        erased
    })
}

/// A mounted consumer of one query identity.
///
/// Dropping the subscription unmounts it; an unmounted entry keeps its data
/// but is no longer refetched on invalidation.
pub struct QuerySubscription<T> {
    cache: QueryCache,
    key: QueryKey,
    fetcher: ErasedFetcher,
    changes: watch::Receiver<u64>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> QuerySubscription<T> {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn state(&self) -> QueryState<T> {
        self.cache.snapshot(&self.key)
    }

    /// Fetch if the data is missing or stale; join an in-flight request.
    pub async fn ensure_fresh(&self) -> QueryState<T> {
        if self.cache.needs_fetch(&self.key) {
            self.cache.run_fetch(&self.key, self.fetcher.clone()).await;
        }
        self.state()
    }

    /// Fetch regardless of freshness (still joins an in-flight request).
    pub async fn refetch(&self) -> QueryState<T> {
        self.cache.run_fetch(&self.key, self.fetcher.clone()).await;
        self.state()
    }

    /// Wait for the next state change of this identity.
    ///
    /// Returns `false` if the entry is gone and no further change can come.
    pub async fn changed(&mut self) -> bool {
        self.changes.changed().await.is_ok()
    }
}

impl<T> Drop for QuerySubscription<T> {
    fn drop(&mut self) {
        let mut inner = self.cache.inner.lock();
        if let Some(entry) = inner.entries.get_mut(&self.key) {
            entry.observers = entry.observers.saturating_sub(1);
            if entry.observers == 0 {
                entry.fetcher = None;
            }
        }
        tracing::debug!(key = %self.key, "query unmounted");
    }
}
