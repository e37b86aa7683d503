//! Map styles derived from one metric over an entity set.
//!
//! [`compute_styles`] is a pure function; the rendering layer diffs its
//! output against what is on screen and applies the changes.

use std::collections::BTreeMap;

use healthmap_core::{
    Entity, HslColor, InvalidMetricError, MetricKind, SeverityRatio, color_for, severity_ratios,
};
use log::debug;
use serde::Serialize;

/// Fill applied to a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionStyle {
    /// Fill colour.
    pub fill: HslColor,
    /// Severity ratio the fill was derived from; `None` for unmatched
    /// boundary features.
    pub severity: Option<SeverityRatio>,
}

impl RegionStyle {
    /// Neutral grey used for boundary features with no matching entity.
    pub const NEUTRAL_FILL: HslColor = HslColor::new(0, 0, 85.0);

    /// Style for a boundary feature that resolved to no entity.
    ///
    /// # Examples
    /// ```
    /// use healthmap_scorer::RegionStyle;
    ///
    /// let style = RegionStyle::unmatched();
    /// assert!(style.severity.is_none());
    /// assert_eq!(style.fill.to_string(), "hsl(0, 0%, 85%)");
    /// ```
    #[must_use]
    pub const fn unmatched() -> Self {
        Self {
            fill: Self::NEUTRAL_FILL,
            severity: None,
        }
    }

    /// Style for a region with a known severity on `metric`'s scale.
    #[must_use]
    pub fn for_ratio(ratio: SeverityRatio, metric: MetricKind) -> Self {
        Self {
            fill: color_for(ratio.get(), metric),
            severity: Some(ratio),
        }
    }
}

/// Style every entity by its severity on `metric`, keyed by entity key.
///
/// # Errors
/// Returns [`InvalidMetricError`] when `metric` is categorical.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use healthmap_core::{Entity, MetricKind, RegionMetrics};
/// use healthmap_scorer::compute_styles;
///
/// let region = |key: &str, alerts: usize| {
///     let metrics = RegionMetrics { alerts: vec!["Heatwave".into(); alerts], ..RegionMetrics::default() };
///     Entity::new(key, key, metrics, Coord { x: 0.0, y: 0.0 })
/// };
/// let styles = compute_styles(&[region("A", 0), region("B", 2)], MetricKind::DerivedAlertCount)?;
/// assert_eq!(styles["A"].fill.to_string(), "hsl(0, 65%, 85%)");
/// assert_eq!(styles["B"].fill.to_string(), "hsl(0, 65%, 35%)");
/// # Ok::<(), healthmap_core::InvalidMetricError>(())
/// ```
pub fn compute_styles(
    entities: &[Entity],
    metric: MetricKind,
) -> Result<BTreeMap<String, RegionStyle>, InvalidMetricError> {
    let ratios = severity_ratios(entities, metric)?;
    debug!("styled {} regions by {metric}", ratios.len());
    Ok(ratios
        .into_iter()
        .map(|(key, ratio)| (key, RegionStyle::for_ratio(ratio, metric)))
        .collect())
}
