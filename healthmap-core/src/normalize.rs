//! Min–max normalisation of one metric over an active entity set.
//!
//! Ranges are computed over exactly the entities passed to each call and are
//! never cached, so two different entity sets never share a range.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Entity, InvalidMetricError, MetricKind};

/// A normalised score in `0..=100`.
///
/// # Examples
/// ```
/// use healthmap_core::NormalizedScore;
///
/// assert_eq!(NormalizedScore::MIDPOINT.get(), 50);
/// assert_eq!(NormalizedScore::new(250), NormalizedScore::MAX);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NormalizedScore(u8);

impl NormalizedScore {
    /// The lowest score.
    pub const MIN: Self = Self(0);
    /// Neutral score assigned when every entity shares the same raw value.
    pub const MIDPOINT: Self = Self(50);
    /// The highest score.
    pub const MAX: Self = Self(100);

    /// Construct a score, saturating at [`NormalizedScore::MAX`].
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Return the score as an integer.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Return the score as a fraction of [`NormalizedScore::MAX`].
    #[must_use]
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl std::fmt::Display for NormalizedScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Observed minimum and maximum of a metric across an entity set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRange {
    /// Smallest raw value.
    pub min: f64,
    /// Largest raw value.
    pub max: f64,
}

impl MetricRange {
    /// Report whether every entity shares the same value.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }

    /// Map a raw value onto `0..=100`.
    ///
    /// Degenerate ranges map every value to [`NormalizedScore::MIDPOINT`].
    ///
    /// # Examples
    /// ```
    /// use healthmap_core::{MetricRange, NormalizedScore};
    ///
    /// let range = MetricRange { min: 10.0, max: 30.0 };
    /// assert_eq!(range.score(20.0).get(), 50);
    /// let flat = MetricRange { min: 7.0, max: 7.0 };
    /// assert_eq!(flat.score(7.0), NormalizedScore::MIDPOINT);
    /// ```
    #[must_use]
    pub fn score(&self, value: f64) -> NormalizedScore {
        if self.is_degenerate() {
            return NormalizedScore::MIDPOINT;
        }
        let scaled = ((value - self.min) / (self.max - self.min)) * 100.0;
        if !scaled.is_finite() {
            return NormalizedScore::MIDPOINT;
        }
        NormalizedScore::new(scaled.round().clamp(0.0, 100.0) as u8)
    }
}

/// Compute the range of `metric` over `entities`.
///
/// Returns `Ok(None)` for an empty entity set.
///
/// # Errors
/// Returns [`InvalidMetricError`] when `metric` is categorical.
pub fn metric_range(
    entities: &[Entity],
    metric: MetricKind,
) -> Result<Option<MetricRange>, InvalidMetricError> {
    if !metric.is_numeric() {
        return Err(InvalidMetricError { metric });
    }
    let range = entities
        .iter()
        .filter_map(|entity| entity.numeric(metric))
        .fold(None, |acc: Option<MetricRange>, value| {
            Some(acc.map_or(
                MetricRange {
                    min: value,
                    max: value,
                },
                |range| MetricRange {
                    min: range.min.min(value),
                    max: range.max.max(value),
                },
            ))
        });
    Ok(range)
}

/// Normalise `metric` over `entities`, keyed by entity key.
///
/// `score = round((value - min) / (max - min) * 100)`; when `min == max`
/// every score is `50`. An empty entity set yields an empty map.
///
/// # Errors
/// Returns [`InvalidMetricError`] when `metric` is categorical.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use healthmap_core::{Entity, MetricKind, RegionMetrics, normalize};
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let with_hospitals = |n| RegionMetrics { facility_count_a: n, ..RegionMetrics::default() };
/// let entities = [
///     Entity::new("A", "A", with_hospitals(10), origin),
///     Entity::new("B", "B", with_hospitals(30), origin),
///     Entity::new("C", "C", with_hospitals(20), origin),
/// ];
/// let scores = normalize(&entities, MetricKind::FacilityCountA)?;
/// let as_ints: Vec<_> = scores.values().map(|s| s.get()).collect();
/// assert_eq!(as_ints, [0, 100, 50]);
/// assert!(normalize(&entities, MetricKind::Categorical).is_err());
/// # Ok::<(), healthmap_core::InvalidMetricError>(())
/// ```
pub fn normalize(
    entities: &[Entity],
    metric: MetricKind,
) -> Result<BTreeMap<String, NormalizedScore>, InvalidMetricError> {
    let Some(range) = metric_range(entities, metric)? else {
        debug!("normalising {metric} over an empty entity set");
        return Ok(BTreeMap::new());
    };
    Ok(entities
        .iter()
        .filter_map(|entity| {
            entity
                .numeric(metric)
                .map(|value| (entity.key.clone(), range.score(value)))
        })
        .collect())
}
