//! Key-Space Utilities
//!
//! Composite key building and pattern-based bulk invalidation. Both work
//! through the public cache API only.

use regex::Regex;
use tracing::debug;

use crate::cache::Cache;
use crate::error::Result;

/// Separator placed between the prefix and each key part
pub const KEY_SEPARATOR: &str = ":";

/// Joins `prefix` and `parts` with [`KEY_SEPARATOR`].
///
/// ```
/// use mini_cache::create_cache_key;
///
/// assert_eq!(create_cache_key("users", ["123", "profile"]), "users:123:profile");
/// ```
pub fn create_cache_key<I, S>(prefix: &str, parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut key = String::from(prefix);
    for part in parts {
        key.push_str(KEY_SEPARATOR);
        key.push_str(part.as_ref());
    }
    key
}

/// Removes every key that `pattern` matches in full and returns how many
/// were removed.
///
/// `pattern` is a regular expression anchored at both ends, so
/// `users:.*:profile` removes `users:1:profile` but not
/// `users:1:profile:avatar`. Expired entries still in the store are
/// matched and counted like live ones.
///
/// Fails with [`CacheError::Pattern`](crate::CacheError::Pattern) when the
/// pattern does not compile; the cache is left untouched.
pub fn invalidate_cache_pattern<V>(cache: &mut Cache<V>, pattern: &str) -> Result<usize> {
    // `a)|(b` only compiles once wrapped, so the raw form is checked too.
    Regex::new(pattern)?;
    let full_match = Regex::new(&format!("^(?:{})$", pattern))?;

    let mut removed = 0;
    for key in cache.keys() {
        if full_match.is_match(&key) && cache.remove(&key) {
            removed += 1;
        }
    }

    debug!(pattern, removed, "invalidated keys by pattern");
    Ok(removed)
}
