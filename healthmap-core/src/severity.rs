//! Polarity-adjusted severity ratios.
//!
//! A severity ratio is the sole input to colour derivation: `0.0` is the
//! least concerning value in the active entity set and `1.0` the most.
//! Inversion for `higher-is-better` metrics happens here, never in the
//! colour mapper.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Entity, InvalidMetricError, MetricKind, NormalizedScore, SeverityDirection, normalize};

/// A severity ratio clamped into `0.0..=1.0`.
///
/// # Examples
/// ```
/// use healthmap_core::SeverityRatio;
///
/// assert_eq!(SeverityRatio::new(1.000_000_1).get(), 1.0);
/// assert_eq!(SeverityRatio::new(-0.2).get(), 0.0);
/// assert_eq!(SeverityRatio::new(f64::NAN).get(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeverityRatio(f64);

impl SeverityRatio {
    /// The least severe ratio.
    pub const LEAST_SEVERE: Self = Self(0.0);
    /// The most severe ratio.
    pub const MOST_SEVERE: Self = Self(1.0);

    /// Clamp `raw` into `0.0..=1.0`. `NaN` maps to `0.0`.
    #[must_use]
    pub fn new(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::LEAST_SEVERE;
        }
        Self(raw.clamp(0.0, 1.0))
    }

    /// Return the ratio as a float.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl SeverityDirection {
    /// Convert a normalised score into a severity ratio.
    ///
    /// # Examples
    /// ```
    /// use healthmap_core::{NormalizedScore, SeverityDirection};
    ///
    /// let score = NormalizedScore::new(25);
    /// assert_eq!(SeverityDirection::HigherIsWorse.ratio(score).get(), 0.25);
    /// assert_eq!(SeverityDirection::HigherIsBetter.ratio(score).get(), 0.75);
    /// ```
    #[must_use]
    pub fn ratio(self, score: NormalizedScore) -> SeverityRatio {
        let fraction = score.fraction();
        match self {
            Self::HigherIsWorse => SeverityRatio::new(fraction),
            Self::HigherIsBetter => SeverityRatio::new(1.0 - fraction),
        }
    }
}

/// Convert a normalised score of `metric` into a severity ratio.
///
/// # Errors
/// Returns [`InvalidMetricError`] when `metric` is categorical.
pub fn severity_ratio(
    metric: MetricKind,
    score: NormalizedScore,
) -> Result<SeverityRatio, InvalidMetricError> {
    metric
        .direction()
        .map(|direction| direction.ratio(score))
        .ok_or(InvalidMetricError { metric })
}

/// Normalise `metric` over `entities` and convert every score into a
/// severity ratio, keyed by entity key.
///
/// # Errors
/// Returns [`InvalidMetricError`] when `metric` is categorical.
pub fn severity_ratios(
    entities: &[Entity],
    metric: MetricKind,
) -> Result<BTreeMap<String, SeverityRatio>, InvalidMetricError> {
    let direction = metric.direction().ok_or(InvalidMetricError { metric })?;
    Ok(normalize(entities, metric)?
        .into_iter()
        .map(|(key, score)| (key, direction.ratio(score)))
        .collect())
}
