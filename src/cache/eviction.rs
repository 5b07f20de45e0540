//! Eviction Policy Module
//!
//! Selects the entry to drop when an insert would push the cache past capacity.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::cache::CacheEntry;
use crate::error::CacheError;

// == Eviction Strategy ==
/// Eviction policy, resolved once from configuration and fixed for the
/// lifetime of a cache.
///
/// Every variant compares entries by the cache's logical clock, so two
/// entries never tie:
/// - `Lru` evicts the smallest last-access stamp (`set` and `get` refresh it).
/// - `Fifo` evicts the smallest first-insertion stamp; overwriting a live key
///   keeps its place in the queue.
/// - `OldestByCreation` evicts the smallest creation stamp, which every `set`
///   resets. Configured under the name `ttl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionStrategy {
    #[default]
    Lru,
    Fifo,
    #[serde(rename = "ttl")]
    OldestByCreation,
}

impl EvictionStrategy {
    // == Name ==
    /// Returns the configuration name of the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionStrategy::Lru => "lru",
            EvictionStrategy::Fifo => "fifo",
            EvictionStrategy::OldestByCreation => "ttl",
        }
    }

    // == Rank ==
    /// Returns the logical clock stamp this strategy orders `entry` by.
    pub(crate) fn rank<V>(&self, entry: &CacheEntry<V>) -> u64 {
        match self {
            EvictionStrategy::Lru => entry.accessed_seq,
            EvictionStrategy::Fifo => entry.inserted_seq,
            EvictionStrategy::OldestByCreation => entry.created_seq,
        }
    }
}

// == Eviction Queue ==
/// Keys ordered by their strategy rank, oldest first.
///
/// Kept in step with the store's entry map: every entry has exactly one
/// slot, keyed by `strategy.rank(entry)`. Stamps are unique per cache, so
/// slots never collide.
#[derive(Debug)]
pub(crate) struct EvictionQueue {
    strategy: EvictionStrategy,
    order: BTreeMap<u64, String>,
}

impl EvictionQueue {
    pub fn new(strategy: EvictionStrategy) -> Self {
        Self {
            strategy,
            order: BTreeMap::new(),
        }
    }

    /// Adds `key` at the position given by its entry's current rank.
    pub fn insert<V>(&mut self, key: &str, entry: &CacheEntry<V>) {
        self.order.insert(self.strategy.rank(entry), key.to_string());
    }

    /// Drops the slot held by `entry`. Must be called before the entry's
    /// stamps change.
    pub fn remove<V>(&mut self, entry: &CacheEntry<V>) {
        self.order.remove(&self.strategy.rank(entry));
    }

    // == Select Victim ==
    /// Returns the key that should be evicted next, or `None` when empty.
    pub fn select_victim(&self) -> Option<&str> {
        self.order.first_key_value().map(|(_, key)| key.as_str())
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns the key held at `rank`, if any.
    #[cfg(test)]
    pub fn key_at(&self, rank: u64) -> Option<&str> {
        self.order.get(&rank).map(String::as_str)
    }
}

impl fmt::Display for EvictionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionStrategy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionStrategy::Lru),
            "fifo" => Ok(EvictionStrategy::Fifo),
            "ttl" => Ok(EvictionStrategy::OldestByCreation),
            other => Err(CacheError::Configuration(format!(
                "unknown eviction strategy '{}' (expected lru, fifo or ttl)",
                other
            ))),
        }
    }
}
