//! Result cache trait and the in-memory implementation.

use crate::keys::CacheKey;
use crate::types::{CacheEntry, CacheStats};
use dashmap::DashMap;
use kiosk_core::Candidate;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Keyed store of not-yet-shown candidates.
///
/// Replacing or invalidating a key that has no entry is a no-op. An entry may
/// disappear between a `replace` and a later `get` (expiry); callers treat
/// that exactly like an empty cache.
pub trait ResultCache: Send + Sync {
    /// Look up the remaining candidates for `key`.
    fn get(&self, key: &CacheKey) -> Option<Vec<Candidate>>;

    /// Overwrite the entry for `key`, creating it if absent.
    fn replace(&self, key: &CacheKey, candidates: Vec<Candidate>);

    /// Remove the entry for `key`.
    fn invalidate(&self, key: &CacheKey);

    /// Number of live entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> CacheStats;
}

/// Process-local cache backed by a sharded concurrent map.
///
/// Operations on distinct keys land on independent shards; operations on one
/// key are serialized by that shard's lock.
#[derive(Debug, Default)]
pub struct MemoryResultCache {
    entries: DashMap<CacheKey, CacheEntry>,
    ttl: Option<Duration>,
    hits: AtomicU64,
    misses: AtomicU64,
    replaces: AtomicU64,
    invalidations: AtomicU64,
    expired: AtomicU64,
}

impl MemoryResultCache {
    /// Create a cache whose entries never expire.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache whose entries expire `ttl` after they were stored.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            ..Self::default()
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        self.ttl
            .is_some_and(|ttl| now.duration_since(entry.stored_at) >= ttl)
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        if self.ttl.is_none() {
            return 0;
        }
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !self.is_expired(entry, now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            self.expired.fetch_add(removed as u64, Ordering::Relaxed);
            debug!(removed, "Purged expired cache entries");
        }
        removed
    }

    /// Purge expired entries every `period` on a background task.
    ///
    /// The task holds a weak reference and stops once the cache is dropped.
    /// Panics if `period` is zero.
    pub fn spawn_purge(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let cache = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                cache.purge_expired();
            }
        })
    }
}

impl ResultCache for MemoryResultCache {
    fn get(&self, key: &CacheKey) -> Option<Vec<Candidate>> {
        let now = Instant::now();
        let found = self
            .entries
            .get(key)
            .map(|entry| (self.is_expired(&entry, now), entry.candidates.clone()));

        match found {
            Some((false, candidates)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(candidates)
            }
            Some((true, _)) => {
                // Only evict if nobody refreshed the entry in the meantime.
                if self
                    .entries
                    .remove_if(key, |_, entry| self.is_expired(entry, Instant::now()))
                    .is_some()
                {
                    self.expired.fetch_add(1, Ordering::Relaxed);
                    debug!(cache_key = %key, "Cache entry expired");
                }
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn replace(&self, key: &CacheKey, candidates: Vec<Candidate>) {
        self.entries.insert(
            key.clone(),
            CacheEntry {
                candidates,
                stored_at: Instant::now(),
            },
        );
        self.replaces.fetch_add(1, Ordering::Relaxed);
    }

    fn invalidate(&self, key: &CacheKey) {
        if self.entries.remove(key).is_some() {
            self.invalidations.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            replaces: self.replaces.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}
