//! Cache Statistics Module
//!
//! Reports occupancy derived from the store plus running hit, miss,
//! eviction and expiration counters.

use serde::Serialize;

use crate::cache::EvictionStrategy;

// == Cache Counters ==
/// Running counters kept by the store between snapshots.
#[derive(Debug, Clone, Default)]
pub(crate) struct CacheCounters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

impl CacheCounters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}

// == Cache Stats ==
/// Point-in-time view of a cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Entries currently stored, including expired ones not yet purged
    pub size: usize,
    /// Capacity the cache was built with
    pub max_size: usize,
    /// Stored entries whose TTL has elapsed but which have not been purged
    pub expired: usize,
    /// Configured eviction policy
    pub strategy: EvictionStrategy,
    /// Successful `get` calls
    pub hits: u64,
    /// `get` calls on absent or expired keys
    pub misses: u64,
    /// Entries dropped to make room for new keys
    pub evictions: u64,
    /// Entries purged because their TTL elapsed
    pub expirations: u64,
}

impl CacheStats {
    pub(crate) fn new(
        size: usize,
        max_size: usize,
        expired: usize,
        strategy: EvictionStrategy,
        counters: &CacheCounters,
    ) -> Self {
        Self {
            size,
            max_size,
            expired,
            strategy,
            hits: counters.hits,
            misses: counters.misses,
            evictions: counters.evictions,
            expirations: counters.expirations,
        }
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
