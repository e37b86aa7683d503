//! Resolve command implementation for the health map CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use healthmap_core::CountryMapConfig;
use healthmap_data::{
    EntityNameResolver, FeatureMatch, HttpFetcher, LoaderConfig, ResourceFetcher, ResourceStore,
    match_features,
};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_BASE_DIR, ARG_BOUNDARIES, ARG_COUNTRY, ARG_DATASET, CliError, ENV_RESOLVE_COUNTRY,
    ENV_RESOLVE_DATASET, load_country, write_json,
};

/// CLI arguments for the `resolve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load a boundary feature collection and report which \
                 features match a region of the country, including names \
                 reconciled through the alias table. The boundary source \
                 defaults to the country's map configuration and may be a \
                 local path or an http(s) URL.",
    about = "Match boundary features to regions"
)]
#[ortho_config(prefix = "HEALTHMAP")]
pub(crate) struct ResolveArgs {
    /// Path to the region dataset JSON.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Country whose regions are matched.
    #[arg(long = ARG_COUNTRY, value_name = "name")]
    #[serde(default)]
    pub(crate) country: Option<String>,
    /// Override the boundary collection source (path or URL).
    #[arg(long = ARG_BOUNDARIES, value_name = "source")]
    #[serde(default)]
    pub(crate) boundaries: Option<String>,
    /// Directory that local boundary sources are resolved against.
    #[arg(long = ARG_BASE_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) base_dir: Option<Utf8PathBuf>,
}

impl ResolveArgs {
    fn into_config(self) -> Result<ResolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ResolveConfig::try_from(merged)
    }
}

/// Resolved `resolve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolveConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) country: String,
    pub(crate) boundaries: String,
    pub(crate) name_property: &'static str,
    pub(crate) base_dir: Utf8PathBuf,
}

impl TryFrom<ResolveArgs> for ResolveConfig {
    type Error = CliError;

    fn try_from(args: ResolveArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_RESOLVE_DATASET,
        })?;
        let country = args.country.ok_or(CliError::MissingArgument {
            field: ARG_COUNTRY,
            env: ENV_RESOLVE_COUNTRY,
        })?;
        let map = CountryMapConfig::for_country(&country)?;
        let boundaries = args
            .boundaries
            .unwrap_or_else(|| map.boundary_source.to_owned());
        Ok(Self {
            dataset,
            country,
            boundaries,
            name_property: map.name_property,
            base_dir: args.base_dir.unwrap_or_else(|| Utf8PathBuf::from(".")),
        })
    }
}

/// Printed result of the `resolve` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MatchReport {
    pub(crate) country: String,
    pub(crate) boundaries: String,
    pub(crate) name_property: &'static str,
    pub(crate) matched: usize,
    pub(crate) unmatched: usize,
    pub(crate) features: Vec<FeatureMatch>,
}

pub(crate) fn run_resolve(args: ResolveArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let fetcher = HttpFetcher::with_config(LoaderConfig::new(config.base_dir.clone()))?;
    let store = ResourceStore::new(fetcher);
    let report = match_report(&config, &store)?;
    write_json(writer, &report)
}

pub(crate) fn match_report<F: ResourceFetcher>(
    config: &ResolveConfig,
    store: &ResourceStore<F>,
) -> Result<MatchReport, CliError> {
    let entities = load_country(&config.dataset, &config.country)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let collection = runtime
        .block_on(store.boundaries(&config.boundaries))
        .map_err(CliError::LoadBoundaries)?;

    let resolver = EntityNameResolver::new(entities.as_slice());
    let features = match_features(&collection, config.name_property, &resolver);
    let matched = features.iter().filter(|m| m.is_matched()).count();
    info!(
        "matched {matched} of {} boundary features for {}",
        features.len(),
        config.country
    );
    Ok(MatchReport {
        country: config.country.clone(),
        boundaries: config.boundaries.clone(),
        name_property: config.name_property,
        matched,
        unmatched: features.len().saturating_sub(matched),
        features,
    })
}
