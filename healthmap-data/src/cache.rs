//! Fetch-once memoisation of loaded resources keyed by source identifier.
//!
//! The cache is an explicitly constructed value; share it by reference (or
//! inside an [`Arc`]) with every component that needs it. Entries live as
//! long as the cache and are never evicted.
//!
//! Concurrent first requests for the same identifier are not deduplicated:
//! each runs its loader, and the first value to land is the one kept and
//! returned to every later caller.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info};

/// Memoises the resolved value of a loader per source identifier.
///
/// # Examples
/// ```
/// use healthmap_data::ResourceCache;
/// use healthmap_data::test_support::block_on_for_tests;
///
/// let cache = ResourceCache::new();
/// let first = block_on_for_tests(cache.fetch_cached("regions", || async {
///     Ok::<_, std::io::Error>(vec![1, 2, 3])
/// }))?;
/// let second = block_on_for_tests(cache.fetch_cached("regions", || async {
///     Ok::<_, std::io::Error>(Vec::new())
/// }))?;
/// assert_eq!(*second, vec![1, 2, 3]);
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct ResourceCache<T> {
    entries: Mutex<HashMap<String, Arc<T>>>,
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> ResourceCache<T> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `source_id`, running `loader` on a miss.
    ///
    /// A failed load leaves the cache unpopulated, so a later call retries.
    /// Dropping the returned future before it resolves cancels the load and
    /// also leaves the cache unpopulated. The internal lock is never held
    /// across the loader's await point.
    ///
    /// # Errors
    /// Returns the loader's error unchanged.
    pub async fn fetch_cached<F, Fut, E>(&self, source_id: &str, loader: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get(source_id) {
            debug!("resource cache hit for {source_id}");
            return Ok(hit);
        }
        let loaded = Arc::new(loader().await?);
        let stored = Arc::clone(
            self.lock()
                .entry(source_id.to_owned())
                .or_insert_with(|| loaded),
        );
        info!("cached resource {source_id}");
        Ok(stored)
    }

    /// Return the cached value for `source_id` without loading.
    #[must_use]
    pub fn get(&self, source_id: &str) -> Option<Arc<T>> {
        self.lock().get(source_id).cloned()
    }

    /// Report whether `source_id` has a cached value.
    #[must_use]
    pub fn contains(&self, source_id: &str) -> bool {
        self.lock().contains_key(source_id)
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Report whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // The map only ever holds fully constructed values, so a poisoned lock
    // still guards a consistent map.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
