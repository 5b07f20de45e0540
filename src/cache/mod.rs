//! Cache Module
//!
//! Provides in-process caching with TTL expiration and pluggable eviction.

mod entry;
mod eviction;
mod keys;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, MAX_TTL};
pub use eviction::EvictionStrategy;
pub use keys::{create_cache_key, invalidate_cache_pattern, KEY_SEPARATOR};
pub use stats::CacheStats;
pub use store::{Cache, SharedCache};
