//! Test utilities for resource loading.
//!
//! [`StubFetcher`] serves canned bodies without touching the network or the
//! filesystem, and [`block_on_for_tests`] drives async loaders from
//! synchronous tests and doctests.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::{LoadError, ResourceFetcher, ResourceSource};

/// Run `future` to completion on a fresh current-thread runtime.
///
/// # Panics
/// Panics when the Tokio runtime cannot be built.
pub fn block_on_for_tests<F: Future>(future: F) -> F::Output {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|err| panic!("failed to build Tokio runtime for tests: {err}"));
    runtime.block_on(future)
}

/// Stub [`ResourceFetcher`] for testing.
///
/// Bodies are keyed by the identifier as displayed by [`ResourceSource`].
/// Unknown identifiers fail with [`LoadError::Status`] 404.
///
/// # Example
///
/// ```
/// use healthmap_data::test_support::{StubFetcher, block_on_for_tests};
/// use healthmap_data::{JsonLoader, LoadError};
///
/// let loader = JsonLoader::new(StubFetcher::new().with_body("a.json", "[1, 2]"));
/// let values: Vec<u8> = block_on_for_tests(loader.load("a.json"))?;
/// assert_eq!(values, [1, 2]);
/// assert_eq!(loader.fetcher().calls("a.json"), 1);
/// # Ok::<(), LoadError>(())
/// ```
#[derive(Debug, Default)]
pub struct StubFetcher {
    bodies: HashMap<String, String>,
    state: Mutex<StubState>,
}

#[derive(Debug, Default)]
struct StubState {
    calls: HashMap<String, u32>,
    fail_once: HashSet<String>,
}

impl StubFetcher {
    /// Create a fetcher with no bodies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `source_id`.
    #[must_use]
    pub fn with_body(mut self, source_id: &str, body: &str) -> Self {
        self.bodies.insert(source_id.to_owned(), body.to_owned());
        self
    }

    /// Fail the first fetch of `source_id` with a transport error.
    #[must_use]
    pub fn failing_once(self, source_id: &str) -> Self {
        self.state().fail_once.insert(source_id.to_owned());
        self
    }

    /// Number of fetches attempted for `source_id`.
    #[must_use]
    pub fn calls(&self, source_id: &str) -> u32 {
        self.state().calls.get(source_id).copied().unwrap_or_default()
    }

    /// Number of fetches attempted across all identifiers.
    #[must_use]
    pub fn total_calls(&self) -> u32 {
        self.state().calls.values().sum()
    }

    fn state(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ResourceFetcher for StubFetcher {
    async fn fetch(&self, source: &ResourceSource) -> Result<String, LoadError> {
        let id = source.to_string();
        {
            let mut state = self.state();
            *state.calls.entry(id.clone()).or_default() += 1;
            if state.fail_once.remove(&id) {
                return Err(LoadError::Http {
                    url: id,
                    message: "stubbed transport failure".to_owned(),
                });
            }
        }
        self.bodies
            .get(&id)
            .cloned()
            .ok_or(LoadError::Status { url: id, status: 404 })
    }
}
