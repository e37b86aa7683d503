//! Static region dataset keyed by country.

use std::collections::BTreeMap;
use std::fmt;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use healthmap_core::{EntitySet, EntitySetError, RegionRecord};
use healthmap_fs::read_utf8_to_string;
use log::debug;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use thiserror::Error;

/// Errors raised while loading or querying a [`Dataset`].
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("failed to read dataset {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: Utf8PathBuf,
        /// Source error from the filesystem.
        #[source]
        source: io::Error,
    },
    /// The dataset was not `{country: {key: record}}` JSON.
    #[error("failed to parse dataset: {source}")]
    Parse {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A country's records could not form an entity set.
    #[error("invalid regions for {country}: {source}")]
    InvalidEntities {
        /// Country whose records were rejected.
        country: String,
        /// Underlying validation error.
        #[source]
        source: EntitySetError,
    },
    /// The requested country is not in the dataset.
    #[error("dataset has no regions for country '{country}'")]
    UnknownCountry {
        /// The requested country.
        country: String,
    },
}

/// Entity sets for every country in a dataset, ordered by country name.
///
/// # Examples
/// ```
/// use healthmap_data::Dataset;
///
/// let dataset = Dataset::from_json(
///     r#"{"India": {"Goa": {"name": "Goa", "hospitals": 250, "doctors": 3500,
///         "climate": "Tropical", "healthAlerts": [], "healthcareIndex": 72,
///         "lat": 15.3, "lng": 74.12}}}"#,
/// )?;
/// assert_eq!(dataset.country("India")?.len(), 1);
/// assert!(dataset.country("Peru").is_err());
/// # Ok::<(), healthmap_data::DatasetError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    countries: BTreeMap<String, EntitySet>,
}

impl Dataset {
    /// Parse a dataset document.
    ///
    /// # Errors
    /// Returns [`DatasetError::Parse`] for malformed JSON and
    /// [`DatasetError::InvalidEntities`] when a country's records are invalid.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let raw: BTreeMap<String, DocumentRegions> =
            serde_json::from_str(json).map_err(|source| DatasetError::Parse { source })?;
        let countries = raw
            .into_iter()
            .map(|(country, DocumentRegions(records))| {
                EntitySet::from_records(records)
                    .map(|entities| (country.clone(), entities))
                    .map_err(|source| DatasetError::InvalidEntities { country, source })
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(Self { countries })
    }

    /// Read and parse a dataset file.
    ///
    /// # Errors
    /// Returns [`DatasetError::Read`] when the file cannot be read, and the
    /// errors of [`Dataset::from_json`] otherwise.
    pub fn load(path: &Utf8Path) -> Result<Self, DatasetError> {
        let json = read_utf8_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json(&json)?;
        debug!("loaded {} countries from {path}", dataset.countries.len());
        Ok(dataset)
    }

    /// Entity set for `country`.
    ///
    /// # Errors
    /// Returns [`DatasetError::UnknownCountry`] when the country is absent.
    pub fn country(&self, country: &str) -> Result<&EntitySet, DatasetError> {
        self.countries
            .get(country)
            .ok_or_else(|| DatasetError::UnknownCountry {
                country: country.to_owned(),
            })
    }

    /// Country names in order.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }
}

/// A country's regions in the order the document lists them.
struct DocumentRegions(Vec<(String, RegionRecord)>);

impl<'de> Deserialize<'de> for DocumentRegions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RegionsVisitor;

        impl<'de> Visitor<'de> for RegionsVisitor {
            type Value = DocumentRegions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of region key to region record")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut records = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, RegionRecord>()? {
                    records.push(entry);
                }
                Ok(DocumentRegions(records))
            }
        }

        deserializer.deserialize_map(RegionsVisitor)
    }
}
