//! In-memory result cache
//!
//! Maps a request [`fingerprint`](key::fingerprint) to the POIs computed for
//! it. Entries live for a fixed TTL and the map is bounded; when full, the
//! least recently used entry is evicted. Expired entries are never returned:
//! they are dropped on access and by [`ResultCache::purge_expired`], which the
//! server runs periodically.
//!
//! The map sits behind one mutex. Entries are immutable once stored (the POI
//! list is shared behind an `Arc`), so readers only ever see whole entries.

pub mod key;

pub use key::fingerprint;

use crate::constants::cache::{RESULT_CAPACITY, RESULT_TTL_SECS};
use crate::poi::Poi;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Longest lifetime an entry can get
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// A stored result set
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub places: Arc<Vec<Poi>>,
    pub total: usize,
    pub expires_at: Instant,
}

impl CacheEntry {
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Bounded, TTL-limited, thread-safe result cache
#[derive(Debug)]
pub struct ResultCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl ResultCache {
    /// Cache with the default capacity (1000) and TTL (300 s)
    pub fn new() -> Self {
        Self::with_settings(RESULT_CAPACITY, Duration::from_secs(RESULT_TTL_SECS))
    }

    /// Cache with explicit capacity and TTL
    ///
    /// A capacity of zero is raised to one.
    pub fn with_settings(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Default TTL applied by [`insert`](Self::insert)
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a live entry, marking it recently used
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        let mut entries = self.lock();
        let expired = entries.peek(key)?.is_expired_at(Instant::now());
        if expired {
            entries.pop(key);
            return None;
        }
        entries.get(key).cloned()
    }

    /// Store `places` under `key` for `ttl`, replacing any previous entry
    ///
    /// Last write wins when two requests race on the same key. `ttl` is capped
    /// at [`MAX_TTL`].
    pub fn put(&self, key: impl Into<String>, places: Vec<Poi>, ttl: Duration) -> CacheEntry {
        let key = key.into();
        let now = Instant::now();
        let entry = CacheEntry {
            total: places.len(),
            places: Arc::new(places),
            expires_at: now
                .checked_add(ttl.min(MAX_TTL))
                .unwrap_or(now),
            key: key.clone(),
        };
        self.lock().put(key, entry.clone());
        entry
    }

    /// [`put`](Self::put) with the cache's own TTL
    pub fn insert(&self, key: impl Into<String>, places: Vec<Poi>) -> CacheEntry {
        self.put(key, places, self.ttl)
    }

    /// Snapshot of every live entry, most recently used first
    ///
    /// Does not change recency. Expired entries found on the way are dropped.
    pub fn live_entries(&self) -> Vec<CacheEntry> {
        let mut entries = self.lock();
        drop_expired(&mut entries, Instant::now());
        entries.iter().map(|(_, entry)| entry.clone()).collect()
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        drop_expired(&mut self.lock(), Instant::now())
    }

    /// Number of stored entries, including any not yet purged
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

fn drop_expired(entries: &mut LruCache<String, CacheEntry>, now: Instant) -> usize {
    let expired: Vec<String> = entries
        .iter()
        .filter(|(_, entry)| entry.is_expired_at(now))
        .map(|(key, _)| key.clone())
        .collect();
    for key in &expired {
        entries.pop(key);
    }
    expired.len()
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}
