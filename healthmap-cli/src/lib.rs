//! Command-line interface for inspecting the health map engine offline.
//!
//! Each subcommand loads a region dataset, runs one engine operation for a
//! country and prints the result as JSON on standard output.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use healthmap_core::EntitySet;
use healthmap_data::Dataset;
use log::debug;
use serde::Serialize;

mod error;
mod rank;
mod resolve;
mod styles;

pub use error::CliError;

use rank::RankArgs;
use resolve::ResolveArgs;
use styles::StylesArgs;

const ARG_DATASET: &str = "dataset";
const ARG_COUNTRY: &str = "country";
const ARG_METRICS: &str = "metrics";
const ARG_METRIC: &str = "metric";
const ARG_TOP_K: &str = "top-k";
const ARG_BOUNDARIES: &str = "boundaries";
const ARG_BASE_DIR: &str = "base-dir";
const ENV_RANK_DATASET: &str = "HEALTHMAP_CMDS_RANK_DATASET";
const ENV_RANK_COUNTRY: &str = "HEALTHMAP_CMDS_RANK_COUNTRY";
const ENV_RANK_METRICS: &str = "HEALTHMAP_CMDS_RANK_METRICS";
const ENV_STYLES_DATASET: &str = "HEALTHMAP_CMDS_STYLES_DATASET";
const ENV_STYLES_COUNTRY: &str = "HEALTHMAP_CMDS_STYLES_COUNTRY";
const ENV_STYLES_METRIC: &str = "HEALTHMAP_CMDS_STYLES_METRIC";
const ENV_RESOLVE_DATASET: &str = "HEALTHMAP_CMDS_RESOLVE_DATASET";
const ENV_RESOLVE_COUNTRY: &str = "HEALTHMAP_CMDS_RESOLVE_COUNTRY";

/// Run the health map CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, inputs or the
/// requested engine operation fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Rank(args) => rank::run_rank(args, &mut stdout),
        Command::Styles(args) => styles::run_styles(args, &mut stdout),
        Command::Resolve(args) => resolve::run_resolve(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "healthmap",
    about = "Offline inspection of regional health severity data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank a country's regions by a composite of metric scores.
    Rank(RankArgs),
    /// Compute the fill colour of every region for one metric.
    Styles(StylesArgs),
    /// Match boundary features to a country's regions.
    Resolve(ResolveArgs),
}

/// Reject a path that is missing or not a regular file.
fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match healthmap_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load the dataset at `path` and take the entities of `country`.
fn load_country(path: &Utf8Path, country: &str) -> Result<EntitySet, CliError> {
    require_existing(path, ARG_DATASET)?;
    let dataset = Dataset::load(path)?;
    let entities = dataset.country(country)?.clone();
    debug!("loaded {} regions for {country}", entities.len());
    Ok(entities)
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, payload: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(payload).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(rendered.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
