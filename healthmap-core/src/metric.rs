//! Metric kinds and their fixed per-metric semantics.
//!
//! [`MetricKind`] is a closed set. Every table keyed by it (polarity, colour
//! scale, labels) is an exhaustive `match`, so adding a metric is a single
//! compile-checked change.
//!
//! # Examples
//! ```
//! use healthmap_core::{MetricKind, SeverityDirection};
//!
//! assert_eq!(MetricKind::DerivedAlertCount.as_str(), "alerts");
//! assert_eq!(
//!     MetricKind::CompositeIndex.direction(),
//!     Some(SeverityDirection::HigherIsBetter),
//! );
//! assert!(MetricKind::Categorical.direction().is_none());
//! ```

use serde::{Deserialize, Serialize};

use crate::{HslColor, ParseMetricError};

/// The metrics tracked for every region.
///
/// Serialised using the dataset spellings (`healthcareIndex`, `hospitals`,
/// `doctors`, `alerts`, `climate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKind {
    /// Overall healthcare index in `0..=100`; higher is better.
    #[serde(rename = "healthcareIndex")]
    CompositeIndex,
    /// Hospital count; higher means more capacity.
    #[serde(rename = "hospitals")]
    FacilityCountA,
    /// Doctor count; higher means more capacity.
    #[serde(rename = "doctors")]
    FacilityCountB,
    /// Number of active health alerts; higher is more severe.
    #[serde(rename = "alerts")]
    DerivedAlertCount,
    /// Free-text climate description. Never part of numeric computation.
    #[serde(rename = "climate")]
    Categorical,
}

/// Whether a larger raw value is a better or a worse outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityDirection {
    /// Larger values are more concerning.
    HigherIsWorse,
    /// Larger values are less concerning.
    HigherIsBetter,
}

/// Hue and saturation of a metric's colour scale. Lightness is always
/// derived from a severity ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorScaleConfig {
    /// Hue in degrees, `0..360`.
    pub hue: u16,
    /// Saturation percentage, `0..=100`.
    pub saturation: u8,
}

impl MetricKind {
    /// Every metric in display order.
    pub const ALL: [Self; 5] = [
        Self::CompositeIndex,
        Self::FacilityCountA,
        Self::FacilityCountB,
        Self::Categorical,
        Self::DerivedAlertCount,
    ];

    /// Return the dataset spelling of the metric.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CompositeIndex => "healthcareIndex",
            Self::FacilityCountA => "hospitals",
            Self::FacilityCountB => "doctors",
            Self::DerivedAlertCount => "alerts",
            Self::Categorical => "climate",
        }
    }

    /// Human-readable label used by legends and chart series.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CompositeIndex => "Healthcare Index",
            Self::FacilityCountA => "Hospitals",
            Self::FacilityCountB => "Doctors",
            Self::DerivedAlertCount => "Health Alerts",
            Self::Categorical => "Climate",
        }
    }

    /// Report whether the metric carries a number.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.direction().is_some()
    }

    /// Polarity of the metric, or `None` for the categorical metric.
    #[must_use]
    pub const fn direction(self) -> Option<SeverityDirection> {
        match self {
            Self::DerivedAlertCount => Some(SeverityDirection::HigherIsWorse),
            Self::CompositeIndex | Self::FacilityCountA | Self::FacilityCountB => {
                Some(SeverityDirection::HigherIsBetter)
            }
            Self::Categorical => None,
        }
    }

    /// Hue and saturation of the metric's map colour scale.
    #[must_use]
    pub const fn color_scale(self) -> ColorScaleConfig {
        let (hue, saturation) = match self {
            Self::CompositeIndex => (168, 60),
            Self::FacilityCountA => (200, 70),
            Self::FacilityCountB => (280, 60),
            Self::DerivedAlertCount => (0, 65),
            Self::Categorical => (45, 80),
        };
        ColorScaleConfig { hue, saturation }
    }

    /// Fixed colour of the metric's series in comparison charts.
    #[must_use]
    pub const fn series_color(self) -> HslColor {
        let ColorScaleConfig { hue, saturation } = self.color_scale();
        let lightness = match self {
            Self::CompositeIndex => 38.0,
            Self::FacilityCountA | Self::DerivedAlertCount => 50.0,
            Self::FacilityCountB | Self::Categorical => 55.0,
        };
        HslColor::new(hue, saturation, lightness)
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MetricKind {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseMetricError { raw: s.to_owned() })
    }
}
