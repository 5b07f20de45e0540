//! Configuration Module
//!
//! Construction parameters for a cache, with validation and loading from
//! environment variables.

use std::env;
use std::time::Duration;

use crate::cache::EvictionStrategy;
use crate::error::{CacheError, Result};

/// Default entry lifetime (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default capacity
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// Cache construction parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Default lifetime for entries set without an explicit TTL
    pub ttl: Duration,
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Eviction policy applied when a new key would exceed `max_size`
    pub strategy: EvictionStrategy,
}

impl CacheConfig {
    /// Creates a config from explicit values. Nothing is checked until
    /// [`validate`](Self::validate) or cache construction.
    pub fn new(ttl: Duration, max_size: usize, strategy: EvictionStrategy) -> Self {
        Self {
            ttl,
            max_size,
            strategy,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_strategy(mut self, strategy: EvictionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Checks that the config describes a usable cache.
    ///
    /// `max_size` must be at least 1 and `ttl` must be non-zero so that every
    /// entry expires strictly after it was created.
    pub fn validate(&self) -> Result<()> {
        if self.max_size < 1 {
            return Err(CacheError::Configuration(
                "max_size must be at least 1".to_string(),
            ));
        }
        if self.ttl.is_zero() {
            return Err(CacheError::Configuration(
                "ttl must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads a config from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `CACHE_STRATEGY` - `lru`, `fifo` or `ttl` (default: lru)
    ///
    /// Unset variables fall back to defaults; set but unparsable ones are a
    /// configuration error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let ttl = match lookup("CACHE_TTL_MS") {
            Some(raw) => Duration::from_millis(parse_var("CACHE_TTL_MS", &raw)?),
            None => defaults.ttl,
        };
        let max_size = match lookup("CACHE_MAX_SIZE") {
            Some(raw) => parse_var("CACHE_MAX_SIZE", &raw)?,
            None => defaults.max_size,
        };
        let strategy = match lookup("CACHE_STRATEGY") {
            Some(raw) => raw.parse()?,
            None => defaults.strategy,
        };

        let config = Self::new(ttl, max_size, strategy);
        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| {
        CacheError::Configuration(format!("{} has invalid value '{}'", name, raw))
    })
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_size: DEFAULT_MAX_SIZE,
            strategy: EvictionStrategy::default(),
        }
    }
}
