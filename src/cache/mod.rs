//! Shared resolution cache.
//!
//! A concurrency-safe map from suffix name to the address it last resolved
//! to, with the observation timestamp that drives TTL-based trust:
//! - entries younger than the TTL are trusted without revalidation
//! - entries at or past the TTL must be revalidated through a reverse
//!   lookup before being trusted again
//!
//! Entries are written only after a successful authoritative resolution or
//! a successful revalidation; a resolution that fails writes nothing. The
//! map is last-writer-wins per key, and an entry is always observed as a
//! complete (address, timestamp) pair.

use crate::base::Addr;
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Default trust window for cache entries.
pub const DEFAULT_TTL: Duration = Duration::from_millis(1000);

/// One cached resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    /// Address the suffix resolved to.
    pub addr: Addr,
    /// When that resolution (or the latest revalidation) was observed.
    pub observed_at: Instant,
}

impl CacheEntry {
    /// Time since the entry was written or last revalidated.
    pub fn age(&self) -> Duration {
        self.observed_at.elapsed()
    }

    /// Whether the entry is still inside the trust window.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}

/// Thread-safe name-to-address cache shared by all in-flight resolutions.
///
/// Uses `DashMap` so concurrent insert/refresh/remove need no external
/// locking. There is no capacity bound: entries persist until a
/// revalidation proves them wrong.
pub struct ResolutionCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionCache {
    /// Creates a cache with the default TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { entries: DashMap::new(), ttl }
    }

    /// The trust window applied to entries.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Looks up the entry for a suffix name, fresh or stale.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| *entry)
    }

    /// Records a resolution observed now.
    pub fn insert(&self, key: impl Into<String>, addr: Addr) {
        self.entries.insert(
            key.into(),
            CacheEntry { addr, observed_at: Instant::now() },
        );
    }

    /// Resets an entry's timestamp to now after a successful revalidation.
    ///
    /// A no-op if the entry was removed in the meantime; revalidation never
    /// resurrects an evicted mapping.
    pub fn refresh(&self, key: &str) {
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.observed_at = Instant::now();
        }
    }

    /// Drops an entry whose revalidation came back with a different name.
    pub fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Number of cached suffixes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
