//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;
use crate::error::{CacheError, Result};

/// Handle to a running cleanup task.
///
/// The task holds a reference to the cache until it stops. Call
/// [`shutdown`](Self::shutdown) to stop it and wait for the current sweep to
/// finish; dropping the handle aborts it instead.
#[derive(Debug)]
pub struct CleanupTask {
    handle: Option<JoinHandle<()>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl CleanupTask {
    /// Spawns a task that calls `cleanup()` on `cache` every `interval`.
    ///
    /// Each sweep takes the cache's write lock, so it serializes with every
    /// other cache operation. Must be called from within a tokio runtime.
    ///
    /// # Example
    /// ```ignore
    /// let cache = Cache::new(CacheConfig::default())?.into_shared();
    /// let cleanup = CleanupTask::spawn(cache.clone(), Duration::from_secs(1))?;
    /// // Later, during shutdown:
    /// cleanup.shutdown().await;
    /// ```
    pub fn spawn<V>(cache: SharedCache<V>, interval: Duration) -> Result<Self>
    where
        V: Send + Sync + 'static,
    {
        if interval.is_zero() {
            return Err(CacheError::Configuration(
                "cleanup interval must be greater than zero".to_string(),
            ));
        }

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            info!(?interval, "Starting TTL cleanup task");

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = tokio::time::sleep(interval) => {}
                }

                let removed = {
                    let mut cache_guard = cache.write().await;
                    cache_guard.cleanup()
                };

                if removed > 0 {
                    info!(removed, "TTL cleanup removed expired entries");
                } else {
                    debug!("TTL cleanup found no expired entries");
                }
            }

            info!("TTL cleanup task stopped");
        });

        Ok(Self {
            handle: Some(handle),
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Stops the task and waits for it to exit.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }
}

impl Drop for CleanupTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
