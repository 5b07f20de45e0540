//! Background Tasks Module
//!
//! Caller-owned tasks that operate on a shared cache.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired cache entries at a fixed interval

mod cleanup;

pub use cleanup::CleanupTask;
