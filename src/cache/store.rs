//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with pluggable eviction and
//! lazy TTL expiration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::eviction::EvictionQueue;
use crate::cache::stats::CacheCounters;
use crate::cache::{CacheEntry, CacheStats, EvictionStrategy};
use crate::config::CacheConfig;
use crate::error::Result;

/// Cache handle shared between tasks or threads behind a single lock.
pub type SharedCache<V> = Arc<RwLock<Cache<V>>>;

// == Cache ==
/// In-process cache with per-entry TTL and a fixed eviction policy.
///
/// Expired entries are never removed in the background: `get`, `has` and
/// `cleanup` purge them when they notice. The store never holds more than
/// `max_size` entries once a call returns.
#[derive(Debug)]
pub struct Cache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Lifetime for entries set without an explicit TTL
    default_ttl: Duration,
    /// Victim selection policy
    strategy: EvictionStrategy,
    /// Keys in eviction order for `strategy`
    queue: EvictionQueue,
    /// Logical clock for eviction ordering
    clock: u64,
    /// Hit/miss/eviction counters
    counters: CacheCounters,
}

impl<V> Cache<V> {
    // == Constructor ==
    /// Creates a cache from a validated config.
    ///
    /// Fails with [`CacheError::Configuration`](crate::CacheError::Configuration)
    /// when `max_size` is zero or `ttl` is zero.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entries: HashMap::with_capacity(config.max_size.min(1024)),
            max_size: config.max_size,
            default_ttl: config.ttl,
            strategy: config.strategy,
            queue: EvictionQueue::new(config.strategy),
            clock: 0,
            counters: CacheCounters::default(),
        })
    }

    /// Wraps the cache in the lock used for sharing across tasks.
    pub fn into_shared(self) -> SharedCache<V> {
        Arc::new(RwLock::new(self))
    }

    // == Set ==
    /// Stores a value, replacing any existing entry for `key`.
    ///
    /// Uses `ttl` when given, else the configured default. A zero `ttl`
    /// override is treated as the default as well. Only a new key can
    /// trigger eviction; overwrites never change the size.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        let ttl = ttl.filter(|t| !t.is_zero()).unwrap_or(self.default_ttl);
        let now = Instant::now();
        let seq = self.tick();

        if let Some(entry) = self.entries.get_mut(&key) {
            self.queue.remove(entry);
            entry.replace(value, ttl, now, seq);
            self.queue.insert(&key, entry);
            return;
        }

        while self.entries.len() >= self.max_size {
            if !self.evict_one() {
                break;
            }
        }

        let entry = CacheEntry::new(value, ttl, now, seq);
        self.queue.insert(&key, &entry);
        self.entries.insert(key, entry);
        debug_assert_eq!(self.queue.len(), self.entries.len());
    }

    // == Get ==
    /// Returns the value for `key` and marks it as recently used.
    ///
    /// Expired entries are removed and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let now = Instant::now();
        if self.purge_if_expired(key, now) {
            self.counters.record_miss();
            return None;
        }

        let seq = self.tick();
        match self.entries.get_mut(key) {
            Some(entry) => {
                self.queue.remove(entry);
                entry.touch(now, seq);
                self.queue.insert(key, entry);
                self.counters.record_hit();
                Some(&entry.value)
            }
            None => {
                self.counters.record_miss();
                None
            }
        }
    }

    // == Has ==
    /// Checks for a live entry without refreshing its recency.
    pub fn has(&mut self, key: &str) -> bool {
        let now = Instant::now();
        !self.purge_if_expired(key, now) && self.entries.contains_key(key)
    }

    // == Remove ==
    /// Removes an entry, returning whether one was stored (expired or not).
    pub fn remove(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                self.queue.remove(&entry);
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.queue.clear();
    }

    // == Cleanup ==
    /// Removes all expired entries and returns how many were removed.
    pub fn cleanup(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        let queue = &mut self.queue;
        self.entries.retain(|_, entry| {
            let expired = entry.is_expired_at(now);
            if expired {
                queue.remove(entry);
            }
            !expired
        });
        let removed = before - self.entries.len();

        if removed > 0 {
            self.counters.record_expirations(removed);
            debug!(removed, "purged expired entries");
        }
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    ///
    /// Does not purge: `size` includes expired entries, which are also
    /// counted in `expired`.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let expired = self
            .entries
            .values()
            .filter(|entry| entry.is_expired_at(now))
            .count();
        CacheStats::new(
            self.entries.len(),
            self.max_size,
            expired,
            self.strategy,
            &self.counters,
        )
    }

    // == Keys ==
    /// Returns every stored key, including expired ones not yet purged.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == Peek Entry ==
    /// Returns a live entry with its timestamps. Does not purge or touch
    /// recency.
    pub fn peek_entry(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key).filter(|entry| !entry.is_expired())
    }

    /// Remaining lifetime of a live entry. Does not purge or touch recency.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.peek_entry(key).map(CacheEntry::ttl_remaining)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn strategy(&self) -> EvictionStrategy {
        self.strategy
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn purge_if_expired(&mut self, key: &str, now: Instant) -> bool {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(now));
        if expired {
            if let Some(entry) = self.entries.remove(key) {
                self.queue.remove(&entry);
            }
            self.counters.record_expirations(1);
            debug!(key, "purged expired entry");
        }
        expired
    }

    /// Panics unless every entry holds exactly one queue slot at its rank.
    #[cfg(test)]
    pub(crate) fn assert_queue_consistent(&self) {
        assert_eq!(self.queue.len(), self.entries.len(), "queue length mismatch");
        for (key, entry) in &self.entries {
            assert_eq!(
                self.queue.key_at(self.strategy.rank(entry)),
                Some(key.as_str()),
                "queue slot mismatch for {}",
                key
            );
        }
    }

    fn evict_one(&mut self) -> bool {
        let victim = match self.queue.select_victim() {
            Some(key) => key.to_string(),
            None => return false,
        };
        if let Some(entry) = self.entries.remove(&victim) {
            self.queue.remove(&entry);
        }
        self.counters.record_eviction();
        debug!(key = %victim, strategy = %self.strategy, "evicted entry");
        true
    }
}
