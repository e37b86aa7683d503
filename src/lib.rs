//! Facade crate for the healthmap severity engine.
//!
//! This crate re-exports the core domain types and exposes ranking, styling
//! and resource loading behind feature flags.

#![forbid(unsafe_code)]

pub use healthmap_core::{
    ColorScaleConfig, CountryMapConfig, Entity, EntitySet, Gradient, HealthcareTier, HslColor,
    InvalidMetricError, MetricKind, MetricRange, NormalizedScore, RegionMetrics, RegionRecord,
    SeverityDirection, SeverityRatio, color_for, detect_country, legend_gradient, normalize,
    severity_ratio, severity_ratios,
};

#[cfg(feature = "scorer")]
pub use healthmap_scorer::{RankedRow, RegionStyle, compute_styles, rank};

#[cfg(feature = "data")]
pub use healthmap_data::{
    AliasTable, BoundaryCollection, Breakdown, Dataset, EntityNameResolver, JsonLoader,
    LoadError, ResourceCache, ResourceStore,
};
