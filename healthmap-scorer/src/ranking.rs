//! Composite ranking of entities across several metrics.

use std::collections::BTreeMap;

use healthmap_core::{Entity, MetricKind, MetricRange, NormalizedScore, metric_range};
use log::debug;
use serde::Serialize;

/// Number of rows returned when the caller does not choose a limit.
pub const DEFAULT_TOP_K: usize = 10;

/// Normalised and raw value of one metric for one ranked entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDetail {
    /// Score in `0..=100` relative to the ranked entity set.
    #[serde(rename = "normalizedScore")]
    pub normalized: NormalizedScore,
    /// Raw value for tooltip display.
    #[serde(rename = "rawValue")]
    pub raw: f64,
}

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRow {
    /// Dataset key of the entity.
    pub key: String,
    /// Human-readable name of the entity.
    pub display_name: String,
    /// Sum of the normalised scores of every ranked metric.
    pub composite_score: u32,
    /// Per-metric detail, keyed by metric.
    #[serde(rename = "metricDetails")]
    pub metrics: BTreeMap<MetricKind, MetricDetail>,
}

/// Rank `entities` by the sum of their normalised `metrics`.
///
/// Categorical and repeated metrics are ignored. Rows are ordered by
/// composite score descending, then by key ascending, and at most `top_k`
/// rows are returned. An empty entity set or a metric list with no numeric
/// metric yields an empty list.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use healthmap_core::{Entity, MetricKind, RegionMetrics};
/// use healthmap_scorer::{DEFAULT_TOP_K, rank};
///
/// let region = |key: &str, index: f64, hospitals: u32| {
///     let metrics = RegionMetrics {
///         composite_index: index,
///         facility_count_a: hospitals,
///         ..RegionMetrics::default()
///     };
///     Entity::new(key, key, metrics, Coord { x: 0.0, y: 0.0 })
/// };
/// let entities = [region("A", 40.0, 300), region("B", 80.0, 100), region("C", 60.0, 200)];
/// let metrics = [MetricKind::CompositeIndex, MetricKind::FacilityCountA];
///
/// let rows = rank(&entities, &metrics, DEFAULT_TOP_K);
/// let order: Vec<_> = rows.iter().map(|row| (row.key.as_str(), row.composite_score)).collect();
/// assert_eq!(order, [("A", 100), ("B", 100), ("C", 100)]);
/// ```
#[must_use]
pub fn rank(entities: &[Entity], metrics: &[MetricKind], top_k: usize) -> Vec<RankedRow> {
    let selected = numeric_metrics(metrics);
    if selected.is_empty() || entities.is_empty() {
        debug!(
            "ranking skipped: {} entities, {} numeric metrics",
            entities.len(),
            selected.len()
        );
        return Vec::new();
    }

    let ranges: Vec<(MetricKind, MetricRange)> = selected
        .into_iter()
        .filter_map(|metric| {
            metric_range(entities, metric)
                .ok()
                .flatten()
                .map(|range| (metric, range))
        })
        .collect();

    let mut rows: Vec<RankedRow> = entities
        .iter()
        .map(|entity| ranked_row(entity, &ranges))
        .collect();
    rows.sort_by(|a, b| {
        b.composite_score
            .cmp(&a.composite_score)
            .then_with(|| a.key.cmp(&b.key))
    });
    rows.truncate(top_k);
    rows
}

fn ranked_row(entity: &Entity, ranges: &[(MetricKind, MetricRange)]) -> RankedRow {
    let metrics: BTreeMap<MetricKind, MetricDetail> = ranges
        .iter()
        .filter_map(|&(metric, range)| {
            entity.numeric(metric).map(|raw| {
                let detail = MetricDetail {
                    normalized: range.score(raw),
                    raw,
                };
                (metric, detail)
            })
        })
        .collect();
    let composite_score = metrics
        .values()
        .map(|detail| u32::from(detail.normalized.get()))
        .sum();
    RankedRow {
        key: entity.key.clone(),
        display_name: entity.display_name.clone(),
        composite_score,
        metrics,
    }
}

/// Keep the numeric metrics of `metrics`, first occurrence only.
fn numeric_metrics(metrics: &[MetricKind]) -> Vec<MetricKind> {
    let mut selected = Vec::with_capacity(metrics.len());
    for &metric in metrics {
        if !metric.is_numeric() {
            debug!("metric {metric} is categorical; excluded from ranking");
        } else if !selected.contains(&metric) {
            selected.push(metric);
        }
    }
    selected
}
