//! Bounded TTL cache for serialized search responses.
//!
//! [`QueryCache`] avoids redundant provider calls for repeated queries
//! within a freshness window, under a hard entry bound. Eviction is
//! FIFO-by-insertion-age, not LRU: when an insert would exceed capacity,
//! the entry with the oldest `inserted_at` goes first, regardless of how
//! recently it was read. Keep it that way — switching to LRU changes
//! observable eviction order.
//!
//! Expired entries are purged two ways:
//!
//! - a full sweep at the top of `get`/`insert`, gated by a cooldown so it
//!   runs at most once per cooldown period (amortized O(1) per call
//!   instead of O(n));
//! - each lookup checks its own entry's age regardless of sweep timing,
//!   so a stale entry is never served even if the sweep hasn't run yet.
//!
//! Internal state lives behind a `std::sync::Mutex`; the lock is only
//! held for short synchronous sections, never across an await. Uses
//! `tokio::time::Instant` so paused-clock tests are deterministic.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

/// Configuration for the query cache.
///
/// ```rust
/// # use search_gateway::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(500)
///     .ttl(Duration::from_secs(3600));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 100.
    pub max_entries: usize,
    /// Time-to-live for cached entries. Default: 24 hours.
    pub ttl: Duration,
    /// Minimum interval between full expiry sweeps. Default: 1 hour.
    pub sweep_cooldown: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 100,
            ttl: Duration::from_secs(24 * 3600),
            sweep_cooldown: Duration::from_secs(3600),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: usize) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the minimum interval between full expiry sweeps.
    pub fn sweep_cooldown(mut self, cooldown: Duration) -> Self {
        self.sweep_cooldown = cooldown;
        self
    }
}

struct CacheEntry {
    payload: String,
    inserted_at: Instant,
}

struct CacheInner {
    entries: HashMap<u64, CacheEntry>,
    last_sweep: Instant,
}

/// Thread-safe bounded TTL store for serialized search payloads.
///
/// Created once at startup and shared for the process lifetime. The
/// payload is opaque to the cache; the gateway stores serialized
/// [`SearchResponse`](crate::SearchResponse) JSON.
pub struct QueryCache {
    inner: Mutex<CacheInner>,
    max_entries: usize,
    ttl: Duration,
    sweep_cooldown: Duration,
}

impl QueryCache {
    /// Create an empty cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            max_entries: config.max_entries,
            ttl: config.ttl,
            sweep_cooldown: config.sweep_cooldown,
        }
    }

    /// Look up the payload for a key.
    ///
    /// Returns `None` on miss or when the entry has outlived the TTL; a
    /// found-but-expired entry is removed on the spot. Repeated lookups
    /// never touch `inserted_at`.
    pub fn get(&self, key: u64) -> Option<String> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        self.sweep_expired(&mut inner, now);

        match inner.entries.get(&key) {
            Some(entry) if now.duration_since(entry.inserted_at) < self.ttl => {
                Some(entry.payload.clone())
            }
            Some(_) => {
                inner.entries.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Insert (or overwrite) the payload for a key.
    ///
    /// When a new key would push the cache past capacity, the entry with
    /// the smallest `inserted_at` is evicted first. Overwriting an
    /// existing key never evicts and refreshes the entry's age.
    pub fn insert(&self, key: u64, payload: String) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        self.sweep_expired(&mut inner, now);

        if inner.entries.len() >= self.max_entries && !inner.entries.contains_key(&key) {
            let oldest = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(k, _)| *k);
            if let Some(k) = oldest {
                inner.entries.remove(&k);
            }
        }

        inner.entries.insert(
            key,
            CacheEntry {
                payload,
                inserted_at: now,
            },
        );
    }

    /// Number of entries currently stored, including any not yet swept.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full expiry sweep, gated by the cooldown.
    fn sweep_expired(&self, inner: &mut CacheInner, now: Instant) {
        if now.duration_since(inner.last_sweep) < self.sweep_cooldown {
            return;
        }
        let before = inner.entries.len();
        let ttl = self.ttl;
        inner
            .entries
            .retain(|_, entry| now.duration_since(entry.inserted_at) < ttl);
        inner.last_sweep = now;
        let removed = before - inner.entries.len();
        if removed > 0 {
            debug!(removed, remaining = inner.entries.len(), "swept expired cache entries");
        }
    }
}

/// Compute the cache key for a search call.
///
/// A stable hash (SipHash via `DefaultHasher`) over the trimmed,
/// lower-cased query plus the call parameters, so case and surrounding
/// whitespace variants of the same request collide while requests with
/// different parameters never do. Deterministic within a process
/// lifetime, which is sufficient for an in-memory cache.
pub fn query_key(query: &str, num_results: usize, include_content: bool) -> u64 {
    let mut hasher = DefaultHasher::new();
    query.trim().to_lowercase().hash(&mut hasher);
    num_results.hash(&mut hasher);
    include_content.hash(&mut hasher);
    hasher.finish()
}
