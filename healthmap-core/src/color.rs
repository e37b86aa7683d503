//! Severity ratio to perceptual colour mapping.
//!
//! Each metric has a fixed hue and saturation; lightness falls linearly from
//! 85% (least severe) to 35% (most severe). Ratios arrive already adjusted
//! for metric polarity, so `1.0` always renders darkest.

use serde::{Deserialize, Serialize};

use crate::{MetricKind, SeverityRatio};

/// Lightness of the least severe colour, in percent.
pub const MAX_LIGHTNESS: f64 = 85.0;
/// Lightness of the most severe colour, in percent.
pub const MIN_LIGHTNESS: f64 = 35.0;

/// A colour in HSL space, rendered as a CSS `hsl()` string.
///
/// # Examples
/// ```
/// use healthmap_core::HslColor;
///
/// assert_eq!(HslColor::new(168, 60, 57.5).to_string(), "hsl(168, 60%, 57.5%)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HslColor {
    /// Hue in degrees.
    pub hue: u16,
    /// Saturation percentage.
    pub saturation: u8,
    /// Lightness percentage.
    pub lightness: f64,
}

impl HslColor {
    /// Construct a colour.
    #[must_use]
    pub const fn new(hue: u16, saturation: u8, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Render without spaces, as used inside gradient stops.
    #[must_use]
    pub fn to_compact_string(&self) -> String {
        format!("hsl({},{}%,{}%)", self.hue, self.saturation, self.lightness)
    }
}

impl std::fmt::Display for HslColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Two-stop legend gradient from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    /// Colour at ratio `0.0`.
    pub start: HslColor,
    /// Colour at ratio `1.0`.
    pub end: HslColor,
}

impl std::fmt::Display for Gradient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "linear-gradient(to right, {}, {})",
            self.start.to_compact_string(),
            self.end.to_compact_string()
        )
    }
}

/// Lightness for a severity ratio: `85 - ratio * 50`, clamped to `35..=85`.
///
/// Out-of-range ratios are clamped rather than rejected.
///
/// # Examples
/// ```
/// use healthmap_core::lightness_for;
///
/// assert_eq!(lightness_for(0.0), 85.0);
/// assert_eq!(lightness_for(0.5), 60.0);
/// assert_eq!(lightness_for(1.7), 35.0);
/// ```
#[must_use]
pub fn lightness_for(ratio: f64) -> f64 {
    let ratio = SeverityRatio::new(ratio).get();
    (MAX_LIGHTNESS - ratio * (MAX_LIGHTNESS - MIN_LIGHTNESS)).clamp(MIN_LIGHTNESS, MAX_LIGHTNESS)
}

/// Colour for a severity ratio on `metric`'s scale.
///
/// # Examples
/// ```
/// use healthmap_core::{MetricKind, color_for};
///
/// let colour = color_for(1.0, MetricKind::DerivedAlertCount);
/// assert_eq!(colour.to_string(), "hsl(0, 65%, 35%)");
/// ```
#[must_use]
pub fn color_for(ratio: f64, metric: MetricKind) -> HslColor {
    let scale = metric.color_scale();
    HslColor::new(scale.hue, scale.saturation, lightness_for(ratio))
}

/// Legend gradient for `metric`: lightness 85% at ratio 0, 35% at ratio 1.
///
/// # Examples
/// ```
/// use healthmap_core::{MetricKind, legend_gradient};
///
/// assert_eq!(
///     legend_gradient(MetricKind::CompositeIndex).to_string(),
///     "linear-gradient(to right, hsl(168,60%,85%), hsl(168,60%,35%))",
/// );
/// ```
#[must_use]
pub fn legend_gradient(metric: MetricKind) -> Gradient {
    Gradient {
        start: color_for(SeverityRatio::LEAST_SEVERE.get(), metric),
        end: color_for(SeverityRatio::MOST_SEVERE.get(), metric),
    }
}
