//! Banding of the composite healthcare index into display tiers.

use serde::{Deserialize, Serialize};

use crate::HslColor;

/// Qualitative tier of a region's healthcare index.
///
/// # Examples
/// ```
/// use healthmap_core::HealthcareTier;
///
/// assert_eq!(HealthcareTier::from_index(80.0), HealthcareTier::Excellent);
/// assert_eq!(HealthcareTier::from_index(59.9).label(), "Moderate");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthcareTier {
    /// Index below 40.
    Poor,
    /// Index in `40..60`.
    Moderate,
    /// Index in `60..80`.
    Good,
    /// Index of 80 or above.
    Excellent,
}

impl HealthcareTier {
    /// Band a healthcare index. `NaN` is treated as [`HealthcareTier::Poor`].
    #[must_use]
    pub fn from_index(index: f64) -> Self {
        if index >= 80.0 {
            Self::Excellent
        } else if index >= 60.0 {
            Self::Good
        } else if index >= 40.0 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    /// Lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Moderate => "moderate",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Moderate => "Moderate",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }

    /// Badge colour for the tier.
    #[must_use]
    pub const fn fill_color(self) -> HslColor {
        match self {
            Self::Poor => HslColor::new(0, 65, 50.0),
            Self::Moderate => HslColor::new(45, 80, 55.0),
            Self::Good => HslColor::new(142, 60, 45.0),
            Self::Excellent => HslColor::new(168, 70, 40.0),
        }
    }
}

impl std::fmt::Display for HealthcareTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
