//! Error types emitted by the health map CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use healthmap_core::{CountryConfigError, InvalidMetricError, ParseMetricError};
use healthmap_data::{DatasetError, LoadError, LoaderBuildError};
use thiserror::Error;

/// Errors emitted by the health map CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Flag name of the offending option.
        field: &'static str,
        /// The path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name of the offending option.
        field: &'static str,
        /// The path that was checked.
        path: Utf8PathBuf,
        /// Source error from the filesystem.
        #[source]
        source: std::io::Error,
    },
    /// A metric name was not recognised.
    #[error(transparent)]
    UnknownMetric(#[from] ParseMetricError),
    /// No metric names were supplied.
    #[error("no metrics given (pass a comma-separated list to --{field})")]
    EmptyMetricList {
        /// Flag name of the metric list.
        field: &'static str,
    },
    /// The dataset could not be loaded or lacks the country.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    /// The country has no map configuration.
    #[error(transparent)]
    Country(#[from] CountryConfigError),
    /// A categorical metric was requested for colouring.
    #[error(transparent)]
    InvalidMetric(#[from] InvalidMetricError),
    /// Constructing the resource loader failed.
    #[error(transparent)]
    BuildLoader(#[from] LoaderBuildError),
    /// Building the async runtime for resource loading failed.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Loading a boundary collection failed.
    #[error("failed to load boundaries: {0}")]
    LoadBoundaries(#[source] LoadError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
