//! Data access for the health map engine.
//!
//! Responsibilities:
//! - Load the region dataset and map resources from files or HTTP.
//! - Memoise loaded resources per source identifier.
//! - Resolve boundary-feature names to entities, including known aliases.
//!
//! Boundaries:
//! - Do not encode scoring or colouring rules (live in `healthmap-core` and
//!   `healthmap-scorer`).
//! - Network timeouts live in the loader, never in the cache.
//!
//! Invariants:
//! - No global mutable state; caches are explicitly constructed values.
//! - A failed load never populates a cache.

mod alias;
mod boundary;
mod breakdown;
mod cache;
mod dataset;
mod loader;
mod resolver;
mod source;
mod store;

#[doc(hidden)]
pub mod test_support;

pub use alias::{AliasTable, AliasTableError};
pub use boundary::{BoundaryCollection, BoundaryFeature, FeatureMatch, match_features};
pub use breakdown::Breakdown;
pub use cache::ResourceCache;
pub use dataset::{Dataset, DatasetError};
pub use loader::{
    DEFAULT_USER_AGENT, HttpFetcher, JsonLoader, LoadError, LoaderBuildError, LoaderConfig,
    ResourceFetcher,
};
pub use resolver::{EntityNameResolver, resolve};
pub use source::ResourceSource;
pub use store::ResourceStore;
