//! Rank command implementation for the health map CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use healthmap_core::MetricKind;
use healthmap_scorer::{DEFAULT_TOP_K, RankedRow, rank};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_COUNTRY, ARG_DATASET, ARG_METRICS, ARG_TOP_K, CliError, ENV_RANK_COUNTRY,
    ENV_RANK_DATASET, ENV_RANK_METRICS, load_country, write_json,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank a country's regions by the sum of their normalised \
                 scores on the requested metrics. Categorical metrics are \
                 ignored. Values can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Rank regions by a composite of metric scores"
)]
#[ortho_config(prefix = "HEALTHMAP")]
pub(crate) struct RankArgs {
    /// Path to the region dataset JSON.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Country whose regions are ranked.
    #[arg(long = ARG_COUNTRY, value_name = "name")]
    #[serde(default)]
    pub(crate) country: Option<String>,
    /// Comma-separated metric names (e.g. "hospitals,doctors").
    #[arg(long = ARG_METRICS, value_name = "list")]
    #[serde(default)]
    pub(crate) metrics: Option<String>,
    /// Maximum number of rows to print.
    #[arg(long = ARG_TOP_K, value_name = "n")]
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
}

impl RankArgs {
    fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) country: String,
    pub(crate) metrics: Vec<MetricKind>,
    pub(crate) top_k: usize,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_RANK_DATASET,
        })?;
        let country = args.country.ok_or(CliError::MissingArgument {
            field: ARG_COUNTRY,
            env: ENV_RANK_COUNTRY,
        })?;
        let raw_metrics = args.metrics.ok_or(CliError::MissingArgument {
            field: ARG_METRICS,
            env: ENV_RANK_METRICS,
        })?;
        Ok(Self {
            dataset,
            country,
            metrics: parse_metric_list(&raw_metrics)?,
            top_k: args.top_k.unwrap_or(DEFAULT_TOP_K),
        })
    }
}

/// Parse a comma-separated metric list, skipping blank entries.
pub(crate) fn parse_metric_list(raw: &str) -> Result<Vec<MetricKind>, CliError> {
    let metrics = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse)
        .collect::<Result<Vec<MetricKind>, _>>()?;
    if metrics.is_empty() {
        return Err(CliError::EmptyMetricList { field: ARG_METRICS });
    }
    Ok(metrics)
}

pub(crate) fn run_rank(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_rank(&config, writer)
}

pub(crate) fn execute_rank(config: &RankConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let rows = ranked_rows(config)?;
    write_json(writer, &rows)
}

pub(crate) fn ranked_rows(config: &RankConfig) -> Result<Vec<RankedRow>, CliError> {
    let entities = load_country(&config.dataset, &config.country)?;
    Ok(rank(entities.as_slice(), &config.metrics, config.top_k))
}
