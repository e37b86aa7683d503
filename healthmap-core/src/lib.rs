//! Core domain types for the healthmap severity engine.
//!
//! The crate turns per-region health metrics into the values a map or chart
//! needs: min–max normalised scores, polarity-adjusted severity ratios and
//! perceptual colours. Every operation is synchronous and pure; the same
//! inputs always produce the same outputs.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use healthmap_core::{
//!     Entity, MetricKind, RegionMetrics, color_for, normalize, severity_ratio,
//! };
//!
//! let metrics = |hospitals| RegionMetrics { facility_count_a: hospitals, ..RegionMetrics::default() };
//! let entities = vec![
//!     Entity::new("A", "Alpha", metrics(10), Coord { x: 0.0, y: 0.0 }),
//!     Entity::new("B", "Beta", metrics(30), Coord { x: 1.0, y: 1.0 }),
//! ];
//!
//! let scores = normalize(&entities, MetricKind::FacilityCountA)?;
//! let ratio = severity_ratio(MetricKind::FacilityCountA, scores["A"])?;
//! assert_eq!(color_for(ratio.get(), MetricKind::FacilityCountA).to_string(), "hsl(200, 70%, 35%)");
//! # Ok::<(), healthmap_core::InvalidMetricError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod color;
pub mod country;
pub mod entity;
mod error;
pub mod metric;
pub mod normalize;
pub mod severity;
pub mod tier;

pub use color::{Gradient, HslColor, color_for, legend_gradient, lightness_for};
pub use country::{CountryMapConfig, DEFAULT_COUNTRY, detect_country};
pub use entity::{Entity, EntitySet, MetricValue, RegionMetrics, RegionRecord};
pub use error::{CountryConfigError, EntitySetError, InvalidMetricError, ParseMetricError};
pub use metric::{ColorScaleConfig, MetricKind, SeverityDirection};
pub use normalize::{MetricRange, NormalizedScore, metric_range, normalize};
pub use severity::{SeverityRatio, severity_ratio, severity_ratios};
pub use tier::HealthcareTier;
