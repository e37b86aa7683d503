//! Cached access to boundary collections and breakdowns.

use std::sync::Arc;

use crate::{
    BoundaryCollection, Breakdown, HttpFetcher, JsonLoader, LoadError, ResourceCache,
    ResourceFetcher,
};

/// Loads map resources through a [`JsonLoader`] and memoises them.
///
/// Each resource kind has its own [`ResourceCache`], so the same identifier
/// may be requested as both kinds without collision.
#[derive(Debug)]
pub struct ResourceStore<F = HttpFetcher> {
    loader: JsonLoader<F>,
    boundaries: ResourceCache<BoundaryCollection>,
    breakdowns: ResourceCache<Breakdown>,
}

impl<F: ResourceFetcher> ResourceStore<F> {
    /// Create a store with empty caches.
    pub fn new(fetcher: F) -> Self {
        Self {
            loader: JsonLoader::new(fetcher),
            boundaries: ResourceCache::new(),
            breakdowns: ResourceCache::new(),
        }
    }

    /// Boundary collection for `source_id`, fetched at most once on success.
    ///
    /// # Errors
    /// Returns [`LoadError`] when the load fails; nothing is cached then.
    pub async fn boundaries(&self, source_id: &str) -> Result<Arc<BoundaryCollection>, LoadError> {
        self.boundaries
            .fetch_cached(source_id, || self.loader.load(source_id))
            .await
    }

    /// Breakdown for `source_id`, fetched at most once on success.
    ///
    /// # Errors
    /// Returns [`LoadError`] when the load fails; nothing is cached then.
    pub async fn breakdown(&self, source_id: &str) -> Result<Arc<Breakdown>, LoadError> {
        self.breakdowns
            .fetch_cached(source_id, || self.loader.load(source_id))
            .await
    }

    /// Borrow the underlying fetcher.
    pub fn fetcher(&self) -> &F {
        self.loader.fetcher()
    }
}
