//! TTL read cache wrapping the device aggregation call.
//!
//! One lock guards the whole check-compute-store sequence, so concurrent
//! callers hitting an expired entry are serialized rather than deduplicated
//! through a shared in-flight future. The store is local and cheap; staleness
//! bounds matter more than miss throughput here.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Time source for cache entries, injected so expiry is testable without
/// sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A keyed cache of computed values with a single time-to-live.
///
/// Keys name the wrapped operation; the read path only ever uses one key, but
/// the map keeps `clear` and any future second operation trivial.
pub struct ReadCache<T, C = SystemClock> {
    ttl: Duration,
    clock: C,
    entries: Mutex<HashMap<&'static str, (T, Instant)>>,
}

impl<T: Clone> ReadCache<T> {
    /// Create a cache on the system clock with the given time-to-live.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<T: Clone, C: Clock> ReadCache<T, C> {
    /// Create a cache with an explicit clock.
    #[must_use]
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key` if it is younger than the TTL,
    /// otherwise run `compute` and store its result.
    ///
    /// # Errors
    ///
    /// Propagates the error from `compute`; nothing is cached on failure.
    pub async fn get_or_compute<F, Fut, E>(&self, key: &'static str, compute: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut entries = self.entries.lock().await;

        if let Some((value, stored_at)) = entries.get(key) {
            if self.clock.now().duration_since(*stored_at) < self.ttl {
                tracing::debug!(key, "cache hit");
                return Ok(value.clone());
            }
        }

        tracing::debug!(key, "cache miss, recomputing");
        let value = compute().await?;
        entries.insert(key, (value.clone(), self.clock.now()));
        Ok(value)
    }

    /// Drop every entry unconditionally.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}
