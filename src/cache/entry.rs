//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

/// Longest lifetime an entry can have (100 years). Larger TTLs are clamped.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
///
/// Wall-clock instants drive expiration. The `*_seq` stamps come from the
/// owning cache's logical clock and order entries for eviction.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was last written by `set`
    pub created_at: Instant,
    /// When the entry was last written or read through `get`
    pub last_accessed_at: Instant,
    /// When the entry stops being visible (always after `created_at`)
    pub expires_at: Instant,
    /// Stamp of the first insertion of this key, kept across overwrites
    pub(crate) inserted_seq: u64,
    /// Stamp of the latest `set`
    pub(crate) created_seq: u64,
    /// Stamp of the latest `set` or `get`
    pub(crate) accessed_seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry living for `ttl` from `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Lifetime of the entry, must be non-zero
    /// * `now` - Creation instant
    /// * `seq` - Logical clock stamp for this insertion
    pub fn new(value: V, ttl: Duration, now: Instant, seq: u64) -> Self {
        Self {
            value,
            created_at: now,
            last_accessed_at: now,
            expires_at: expiry_after(now, ttl),
            inserted_seq: seq,
            created_seq: seq,
            accessed_seq: seq,
        }
    }

    // == Replace ==
    /// Overwrites value and timestamps in place, keeping the first-insertion stamp.
    pub(crate) fn replace(&mut self, value: V, ttl: Duration, now: Instant, seq: u64) {
        let inserted_seq = self.inserted_seq;
        *self = Self::new(value, ttl, now, seq);
        self.inserted_seq = inserted_seq;
    }

    // == Touch ==
    /// Records a read access.
    pub(crate) fn touch(&mut self, now: Instant, seq: u64) {
        self.last_accessed_at = now;
        self.accessed_seq = seq;
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so
    /// it disappears as soon as its full TTL has elapsed.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Checks whether the entry has expired at the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Time elapsed since the entry was last written.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Time elapsed since the entry was last written or read.
    pub fn idle(&self) -> Duration {
        self.last_accessed_at.elapsed()
    }
}

// == Expiry ==
/// Returns `now + ttl`, clamped to [`MAX_TTL`] and to the range `Instant`
/// can represent. Never panics.
fn expiry_after(now: Instant, ttl: Duration) -> Instant {
    std::iter::successors(Some(ttl.min(MAX_TTL)), |t| Some(*t / 2))
        .find_map(|t| now.checked_add(t))
        .unwrap_or(now)
}
