//! Classification of resource identifiers into remote URLs and local paths.

use camino::Utf8PathBuf;
use url::Url;

use crate::LoadError;

/// Where a resource identifier points.
///
/// # Examples
/// ```
/// use healthmap_data::ResourceSource;
///
/// let remote = ResourceSource::parse("https://example.org/geo/states.json")?;
/// assert!(matches!(remote, ResourceSource::Remote(_)));
/// let local = ResourceSource::parse("/geojson/us-states.json")?;
/// assert_eq!(local.to_string(), "/geojson/us-states.json");
/// # Ok::<(), healthmap_data::LoadError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSource {
    /// An `http://` or `https://` URL.
    Remote(Url),
    /// A path resolved against the loader's base directory.
    Local(Utf8PathBuf),
}

impl ResourceSource {
    /// Classify `source_id`.
    ///
    /// # Errors
    /// Returns [`LoadError::InvalidUrl`] when an `http(s)://` identifier does
    /// not parse as a URL.
    pub fn parse(source_id: &str) -> Result<Self, LoadError> {
        let trimmed = source_id.trim();
        if is_remote(trimmed) {
            return Url::parse(trimmed)
                .map(Self::Remote)
                .map_err(|source| LoadError::InvalidUrl {
                    source_id: source_id.to_owned(),
                    source,
                });
        }
        Ok(Self::Local(Utf8PathBuf::from(trimmed)))
    }
}

fn is_remote(source_id: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        source_id
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

impl std::fmt::Display for ResourceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(url) => f.write_str(url.as_str()),
            Self::Local(path) => f.write_str(path.as_str()),
        }
    }
}
