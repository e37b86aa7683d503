//! Fetching and decoding JSON resources from URLs or local files.
//!
//! [`ResourceFetcher`] is the seam between the engine and the outside world:
//! [`HttpFetcher`] serves `http(s)://` identifiers with `reqwest` and every
//! other identifier from disk, while tests substitute
//! [`StubFetcher`](crate::test_support::StubFetcher).
//!
//! Network timeouts belong here, never to the cache.

use std::convert;
use std::io;
use std::time::Duration;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use healthmap_fs::{read_utf8_to_string, resolve_under};
use log::warn;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::ResourceSource;

/// Default user agent for remote requests.
pub const DEFAULT_USER_AGENT: &str = "healthmap-loader/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while loading a resource.
#[derive(Debug, Error)]
pub enum LoadError {
    /// An `http(s)://` identifier was not a valid URL.
    #[error("invalid resource URL '{source_id}': {source}")]
    InvalidUrl {
        /// The rejected identifier.
        source_id: String,
        /// Source error from `url`.
        #[source]
        source: url::ParseError,
    },
    /// The request failed before a response arrived.
    #[error("request to {url} failed: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// Description of the transport failure.
        message: String,
    },
    /// The server answered with an error status.
    #[error("request to {url} returned status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// A local resource could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Resolved file path.
        path: Utf8PathBuf,
        /// Source error from the filesystem.
        #[source]
        source: io::Error,
    },
    /// The resource body was not the expected JSON.
    #[error("failed to decode {source_id}: {source}")]
    Parse {
        /// Identifier of the resource.
        source_id: String,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

/// Error returned when the HTTP client cannot be constructed.
#[derive(Debug, Error)]
#[error("failed to build HTTP client: {source}")]
pub struct LoaderBuildError {
    /// Source error from `reqwest`.
    #[source]
    pub source: reqwest::Error,
}

/// Configuration for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Request timeout for remote resources.
    pub timeout: Duration,
    /// User agent sent with remote requests.
    pub user_agent: String,
    /// Directory that local identifiers are resolved against.
    pub base_dir: Utf8PathBuf,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            base_dir: Utf8PathBuf::from("."),
        }
    }
}

impl LoaderConfig {
    /// Create a configuration resolving local identifiers under `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the base directory for local identifiers.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<Utf8PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }
}

/// Retrieves the raw text of a resource.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch the body of `source`.
    async fn fetch(&self, source: &ResourceSource) -> Result<String, LoadError>;
}

/// Fetcher for remote URLs and local files.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: LoaderConfig,
}

impl HttpFetcher {
    /// Build a fetcher with default configuration.
    ///
    /// # Errors
    /// Returns [`LoaderBuildError`] when the HTTP client cannot be built.
    pub fn new() -> Result<Self, LoaderBuildError> {
        Self::with_config(LoaderConfig::default())
    }

    /// Build a fetcher with explicit configuration.
    ///
    /// # Errors
    /// Returns [`LoaderBuildError`] when the HTTP client cannot be built.
    pub fn with_config(config: LoaderConfig) -> Result<Self, LoaderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|source| LoaderBuildError { source })?;
        Ok(Self { client, config })
    }

    /// The configuration this fetcher was built with.
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    async fn fetch_remote(&self, url: &Url) -> Result<String, LoadError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))
    }

    async fn read_local(&self, path: &Utf8Path) -> Result<String, LoadError> {
        let resolved = resolve_under(&self.config.base_dir, path.as_str());
        let target = resolved.clone();
        tokio::task::spawn_blocking(move || read_utf8_to_string(&target))
            .await
            .map_err(io::Error::other)
            .and_then(convert::identity)
            .map_err(|source| LoadError::Io {
                path: resolved,
                source,
            })
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> LoadError {
        if error.is_timeout() {
            return LoadError::Timeout {
                url: url.to_string(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            };
        }
        LoadError::Http {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, source: &ResourceSource) -> Result<String, LoadError> {
        match source {
            ResourceSource::Remote(url) => self.fetch_remote(url).await,
            ResourceSource::Local(path) => self.read_local(path).await,
        }
    }
}

/// Fetches resources by identifier and decodes them from JSON.
#[derive(Debug, Clone)]
pub struct JsonLoader<F = HttpFetcher> {
    fetcher: F,
}

impl<F: ResourceFetcher> JsonLoader<F> {
    /// Wrap a fetcher.
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Borrow the underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch `source_id` and decode it as `T`.
    ///
    /// # Errors
    /// Returns [`LoadError`] when the identifier is invalid, the fetch fails
    /// or the body does not decode.
    pub async fn load<T: DeserializeOwned>(&self, source_id: &str) -> Result<T, LoadError> {
        let source = ResourceSource::parse(source_id)?;
        let body = self.fetcher.fetch(&source).await.inspect_err(|err| {
            warn!("failed to load {source_id}: {err}");
        })?;
        serde_json::from_str(&body).map_err(|source| {
            warn!("failed to decode {source_id}: {source}");
            LoadError::Parse {
                source_id: source_id.to_owned(),
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubFetcher, block_on_for_tests};
    use rstest::rstest;
    use std::future::{Future, poll_fn};
    use std::pin::pin;
    use std::task::Poll;
    use tempfile::TempDir;

    #[rstest]
    fn config_builder_overrides_defaults() {
        let config = LoaderConfig::new("public")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("healthmap-test/1.0");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "healthmap-test/1.0");
        assert_eq!(config.base_dir, Utf8PathBuf::from("public"));
        assert_eq!(LoaderConfig::default().timeout, Duration::from_secs(30));
    }

    #[rstest]
    fn reads_local_files_under_base_dir() {
        let dir = TempDir::new().expect("temp dir");
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 dir");
        std::fs::create_dir(base.join("geojson")).expect("create geojson dir");
        std::fs::write(base.join("geojson/uk.json"), r#"{"features": []}"#).expect("write");

        let fetcher = HttpFetcher::with_config(LoaderConfig::new(base)).expect("fetcher");
        let loader = JsonLoader::new(fetcher);
        let value: serde_json::Value =
            block_on_for_tests(loader.load("/geojson/uk.json")).expect("load local file");
        assert_eq!(value, serde_json::json!({"features": []}));
    }

    #[rstest]
    fn local_reads_suspend_the_fetch() {
        let dir = TempDir::new().expect("temp dir");
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 dir");
        std::fs::write(base.join("states.json"), "[]").expect("write");
        let fetcher = HttpFetcher::with_config(LoaderConfig::new(base)).expect("fetcher");
        let source = ResourceSource::parse("states.json").expect("local source");

        let body = block_on_for_tests(async {
            let mut fetch = pin!(fetcher.fetch(&source));
            let first = poll_fn(|cx| Poll::Ready(fetch.as_mut().poll(cx))).await;
            assert!(first.is_pending(), "local read completed on the executor thread");
            fetch.await
        })
        .expect("read local file");
        assert_eq!(body, "[]");
    }

    #[rstest]
    fn missing_local_file_is_an_io_error() {
        let dir = TempDir::new().expect("temp dir");
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 dir");
        let fetcher = HttpFetcher::with_config(LoaderConfig::new(base)).expect("fetcher");
        let err = block_on_for_tests(JsonLoader::new(fetcher).load::<serde_json::Value>("absent.json"))
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[rstest]
    fn undecodable_body_is_a_parse_error() {
        let fetcher = StubFetcher::new().with_body("bad.json", "{not json");
        let err = block_on_for_tests(JsonLoader::new(fetcher).load::<serde_json::Value>("bad.json"))
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse { source_id, .. } if source_id == "bad.json"));
    }

    #[rstest]
    fn invalid_url_fails_before_fetching() {
        let fetcher = StubFetcher::new();
        let loader = JsonLoader::new(fetcher);
        let err = block_on_for_tests(loader.load::<serde_json::Value>("https://")).unwrap_err();
        assert!(matches!(err, LoadError::InvalidUrl { .. }));
        assert_eq!(loader.fetcher().total_calls(), 0);
    }
}
