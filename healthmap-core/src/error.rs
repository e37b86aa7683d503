//! Error types shared by the core engine.

use thiserror::Error;

use crate::MetricKind;

/// A categorical metric was supplied where a numeric one is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("metric `{metric}` is categorical and has no numeric value")]
pub struct InvalidMetricError {
    /// The offending metric.
    pub metric: MetricKind,
}

/// A metric name did not match any known [`MetricKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric '{raw}'")]
pub struct ParseMetricError {
    /// The rejected input.
    pub raw: String,
}

/// Errors returned by [`EntitySet::new`](crate::EntitySet::new).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntitySetError {
    /// Two entities share the same dataset key.
    #[error("entity key '{key}' appears more than once")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
}

/// Errors returned when looking up a country's map configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountryConfigError {
    /// No configuration is shipped for the requested country.
    #[error("no map configuration for country '{country}'")]
    Unknown {
        /// The requested country name.
        country: String,
    },
}
