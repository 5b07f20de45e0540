//! Mini Cache - A lightweight in-process cache
//!
//! Provides per-entry TTL expiration, lazy cleanup, LRU/FIFO/oldest-first
//! eviction and pattern-based bulk invalidation.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{
    create_cache_key, invalidate_cache_pattern, Cache, CacheEntry, CacheStats, EvictionStrategy,
    SharedCache,
};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::CleanupTask;
