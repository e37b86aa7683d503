//! Focused unit tests covering rank and styles configuration and output.

use super::helpers::Workspace;
use super::*;
use crate::rank::{RankConfig, execute_rank, parse_metric_list, ranked_rows};
use crate::styles::{StylesConfig, styles_report};
use camino::Utf8PathBuf;
use healthmap_core::MetricKind;
use rstest::{fixture, rstest};

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

fn rank_config(workspace: &Workspace, metrics: &str, top_k: usize) -> RankConfig {
    RankConfig {
        dataset: workspace.dataset(),
        country: "United Kingdom".to_owned(),
        metrics: parse_metric_list(metrics).expect("valid metric list"),
        top_k,
    }
}

#[rstest]
#[case(None, Some("UK"), Some("hospitals"), ARG_DATASET, ENV_RANK_DATASET)]
#[case(Some("regions.json"), None, Some("hospitals"), ARG_COUNTRY, ENV_RANK_COUNTRY)]
#[case(Some("regions.json"), Some("UK"), None, ARG_METRICS, ENV_RANK_METRICS)]
fn converting_rank_without_required_fields_errors(
    #[case] dataset: Option<&str>,
    #[case] country: Option<&str>,
    #[case] metrics: Option<&str>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = RankArgs {
        dataset: dataset.map(Utf8PathBuf::from),
        country: country.map(str::to_owned),
        metrics: metrics.map(str::to_owned),
        ..RankArgs::default()
    };
    let err = RankConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument { field: missing, env } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn rank_config_defaults_top_k() {
    let args = RankArgs {
        dataset: Some(Utf8PathBuf::from("regions.json")),
        country: Some("India".to_owned()),
        metrics: Some("hospitals, alerts".to_owned()),
        top_k: None,
    };
    let config = RankConfig::try_from(args).expect("config should build");
    assert_eq!(config.top_k, 10);
    assert_eq!(
        config.metrics,
        [MetricKind::FacilityCountA, MetricKind::DerivedAlertCount]
    );
}

#[rstest]
#[case("hospitals,doctors", &[MetricKind::FacilityCountA, MetricKind::FacilityCountB])]
#[case("HealthcareIndex,,climate", &[MetricKind::CompositeIndex, MetricKind::Categorical])]
fn metric_lists_parse(#[case] raw: &str, #[case] expected: &[MetricKind]) {
    let parsed = parse_metric_list(raw).expect("valid list");
    assert_eq!(parsed, expected);
}

#[rstest]
fn metric_lists_reject_unknown_and_empty_input() {
    assert!(matches!(
        parse_metric_list("hospitals,beds"),
        Err(CliError::UnknownMetric(err)) if err.raw == "beds"
    ));
    assert!(matches!(
        parse_metric_list(" , "),
        Err(CliError::EmptyMetricList { .. })
    ));
}

#[rstest]
fn ranks_regions_by_composite_score(workspace: Workspace) {
    let rows = ranked_rows(&rank_config(&workspace, "hospitals,doctors", 2)).expect("rank");
    let keys: Vec<_> = rows.iter().map(|row| row.key.as_str()).collect();
    assert_eq!(keys, ["England", "Scotland"]);
    assert_eq!(rows.first().map(|row| row.composite_score), Some(200));
}

#[rstest]
fn rank_output_is_json(workspace: Workspace) {
    let mut output = Vec::new();
    execute_rank(&rank_config(&workspace, "alerts", 1), &mut output).expect("rank output");
    let value: serde_json::Value = serde_json::from_slice(&output).expect("json output");
    assert_eq!(value.pointer("/0/key"), Some(&serde_json::json!("Wales")));
    assert_eq!(
        value.pointer("/0/metricDetails/alerts/rawValue"),
        Some(&serde_json::json!(2.0))
    );
}

#[rstest]
fn missing_dataset_is_reported(workspace: Workspace) {
    let config = RankConfig {
        dataset: workspace.root().join("absent.json"),
        ..rank_config(&workspace, "hospitals", 3)
    };
    match ranked_rows(&config) {
        Err(CliError::MissingSourceFile { field, .. }) => assert_eq!(field, ARG_DATASET),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn unknown_country_is_reported(workspace: Workspace) {
    let config = RankConfig {
        country: "France".to_owned(),
        ..rank_config(&workspace, "hospitals", 3)
    };
    assert!(matches!(ranked_rows(&config), Err(CliError::Dataset(_))));
}

#[rstest]
fn styles_colour_alerts_from_light_to_dark(workspace: Workspace) {
    let config = StylesConfig {
        dataset: workspace.dataset(),
        country: "United Kingdom".to_owned(),
        metric: MetricKind::DerivedAlertCount,
    };
    let report = styles_report(&config).expect("styles");
    let lightness = |key: &str| report.styles.get(key).map(|style| style.fill.lightness);
    assert_eq!(lightness("England"), Some(85.0));
    assert_eq!(lightness("Scotland"), Some(60.0));
    assert_eq!(lightness("Wales"), Some(35.0));
    assert_eq!(report.label, "Health Alerts");
    assert_eq!(
        report.legend.css,
        "linear-gradient(to right, hsl(0,65%,85%), hsl(0,65%,35%))"
    );
}

#[rstest]
fn styles_reject_climate(workspace: Workspace) {
    let config = StylesConfig {
        dataset: workspace.dataset(),
        country: "United Kingdom".to_owned(),
        metric: MetricKind::Categorical,
    };
    match styles_report(&config) {
        Err(CliError::InvalidMetric(err)) => assert_eq!(err.metric, MetricKind::Categorical),
        other => panic!("expected InvalidMetric, found {other:?}"),
    }
}
