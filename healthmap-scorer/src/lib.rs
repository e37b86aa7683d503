//! Multi-metric ranking and map styling for the healthmap engine.
//!
//! The crate builds on the normalisation and colour primitives of
//! [`healthmap_core`]:
//! - [`rank`] sums per-metric normalised scores into a composite score,
//!   sorts deterministically and truncates to the requested number of rows.
//! - [`compute_styles`] turns one metric into a key → fill map for a
//!   rendering layer to diff and apply.
//!
//! Both functions are synchronous and pure.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod ranking;
mod styles;

pub use ranking::{DEFAULT_TOP_K, MetricDetail, RankedRow, rank};
pub use styles::{RegionStyle, compute_styles};
