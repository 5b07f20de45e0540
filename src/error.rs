//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Lookups, removals and sweeps never fail; a miss is reported through
/// `Option`/`bool` results. Only construction and pattern compilation
/// produce errors.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid construction parameters (capacity, ttl, strategy name, interval)
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Invalidation pattern failed to compile as a regular expression
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
