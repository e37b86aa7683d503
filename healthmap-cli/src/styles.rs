//! Styles command implementation for the health map CLI.

use std::collections::BTreeMap;
use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use healthmap_core::{Gradient, MetricKind, legend_gradient};
use healthmap_scorer::{RegionStyle, compute_styles};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_COUNTRY, ARG_DATASET, ARG_METRIC, CliError, ENV_STYLES_COUNTRY, ENV_STYLES_DATASET,
    ENV_STYLES_METRIC, load_country, write_json,
};

/// CLI arguments for the `styles` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Colour every region of a country by its severity on one \
                 numeric metric and print the fills with the legend \
                 gradient.",
    about = "Compute region fills for one metric"
)]
#[ortho_config(prefix = "HEALTHMAP")]
pub(crate) struct StylesArgs {
    /// Path to the region dataset JSON.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Country whose regions are coloured.
    #[arg(long = ARG_COUNTRY, value_name = "name")]
    #[serde(default)]
    pub(crate) country: Option<String>,
    /// Metric to colour by (e.g. "alerts").
    #[arg(long = ARG_METRIC, value_name = "name")]
    #[serde(default)]
    pub(crate) metric: Option<String>,
}

impl StylesArgs {
    fn into_config(self) -> Result<StylesConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StylesConfig::try_from(merged)
    }
}

/// Resolved `styles` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StylesConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) country: String,
    pub(crate) metric: MetricKind,
}

impl TryFrom<StylesArgs> for StylesConfig {
    type Error = CliError;

    fn try_from(args: StylesArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_STYLES_DATASET,
        })?;
        let country = args.country.ok_or(CliError::MissingArgument {
            field: ARG_COUNTRY,
            env: ENV_STYLES_COUNTRY,
        })?;
        let metric = args
            .metric
            .ok_or(CliError::MissingArgument {
                field: ARG_METRIC,
                env: ENV_STYLES_METRIC,
            })?
            .parse::<MetricKind>()?;
        Ok(Self {
            dataset,
            country,
            metric,
        })
    }
}

/// Printed result of the `styles` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct StylesReport {
    pub(crate) metric: MetricKind,
    pub(crate) label: &'static str,
    pub(crate) legend: Legend,
    pub(crate) styles: BTreeMap<String, RegionStyle>,
}

/// Legend gradient with its CSS rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Legend {
    #[serde(flatten)]
    pub(crate) gradient: Gradient,
    pub(crate) css: String,
}

impl From<Gradient> for Legend {
    fn from(gradient: Gradient) -> Self {
        Self {
            css: gradient.to_string(),
            gradient,
        }
    }
}

pub(crate) fn run_styles(args: StylesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_styles(&config, writer)
}

pub(crate) fn execute_styles(
    config: &StylesConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = styles_report(config)?;
    write_json(writer, &report)
}

pub(crate) fn styles_report(config: &StylesConfig) -> Result<StylesReport, CliError> {
    let entities = load_country(&config.dataset, &config.country)?;
    let styles = compute_styles(entities.as_slice(), config.metric)?;
    Ok(StylesReport {
        metric: config.metric,
        label: config.metric.label(),
        legend: legend_gradient(config.metric).into(),
        styles,
    })
}
