//! Per-country map configuration and coordinate-based country detection.
//!
//! # Examples
//! ```
//! use geo::Coord;
//! use healthmap_core::{CountryMapConfig, detect_country};
//!
//! let country = detect_country(Coord { x: 77.2, y: 28.6 });
//! assert_eq!(country, "India");
//! let config = CountryMapConfig::for_country(country)?;
//! assert_eq!(config.name_property, "st_nm");
//! # Ok::<(), healthmap_core::CountryConfigError>(())
//! ```

use geo::{Coord, Rect};
use serde::Serialize;

use crate::CountryConfigError;

/// Country used when a location matches no configured bounding box.
pub const DEFAULT_COUNTRY: &str = "United States";

/// How to render one country's map and where its boundaries live.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountryMapConfig {
    /// Country name, matching the dataset's top-level key.
    pub name: &'static str,
    /// Initial map centre.
    pub center: Coord<f64>,
    /// Initial zoom level.
    pub zoom: u8,
    /// Source identifier of the boundary feature collection.
    pub boundary_source: &'static str,
    /// Feature property holding the region name.
    pub name_property: &'static str,
}

const COUNTRIES: [CountryMapConfig; 3] = [
    CountryMapConfig {
        name: "United States",
        center: Coord { x: -98.58, y: 39.83 },
        zoom: 4,
        boundary_source: "/geojson/us-states.json",
        name_property: "name",
    },
    CountryMapConfig {
        name: "India",
        center: Coord { x: 78.96, y: 20.59 },
        zoom: 5,
        boundary_source: "/geojson/india-states.json",
        name_property: "st_nm",
    },
    CountryMapConfig {
        name: "United Kingdom",
        center: Coord { x: -2.0, y: 54.0 },
        zoom: 6,
        boundary_source: "/geojson/uk-countries.json",
        name_property: "NAME",
    },
];

impl CountryMapConfig {
    /// Every shipped configuration.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &COUNTRIES
    }

    /// Look up the configuration for `country`.
    ///
    /// # Errors
    /// Returns [`CountryConfigError::Unknown`] when no configuration exists.
    pub fn for_country(country: &str) -> Result<&'static Self, CountryConfigError> {
        COUNTRIES
            .iter()
            .find(|config| config.name == country)
            .ok_or_else(|| CountryConfigError::Unknown {
                country: country.to_owned(),
            })
    }
}

/// Bounding boxes in `x = longitude`, `y = latitude` order.
fn bounds() -> [(&'static str, Rect<f64>); 3] {
    [
        (
            "United States",
            Rect::new(Coord { x: -125.0, y: 24.0 }, Coord { x: -66.0, y: 50.0 }),
        ),
        (
            "India",
            Rect::new(Coord { x: 68.0, y: 6.0 }, Coord { x: 97.0, y: 36.0 }),
        ),
        (
            "United Kingdom",
            Rect::new(Coord { x: -11.0, y: 49.0 }, Coord { x: 2.0, y: 61.0 }),
        ),
    ]
}

fn strictly_inside(rect: &Rect<f64>, point: Coord<f64>) -> bool {
    let (min, max) = (rect.min(), rect.max());
    point.x > min.x && point.x < max.x && point.y > min.y && point.y < max.y
}

/// Pick the configured country whose bounding box strictly contains `point`.
///
/// Points on a box edge or outside every box fall back to
/// [`DEFAULT_COUNTRY`].
#[must_use]
pub fn detect_country(point: Coord<f64>) -> &'static str {
    bounds()
        .into_iter()
        .find(|(_, rect)| strictly_inside(rect, point))
        .map_or(DEFAULT_COUNTRY, |(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Coord { x: -0.13, y: 51.5 }, "United Kingdom")]
    #[case(Coord { x: 72.88, y: 19.08 }, "India")]
    #[case(Coord { x: -118.24, y: 34.05 }, "United States")]
    #[case(Coord { x: 2.35, y: 48.86 }, DEFAULT_COUNTRY)]
    #[case(Coord { x: 68.0, y: 20.0 }, DEFAULT_COUNTRY)]
    fn detects_country_from_coordinates(#[case] point: Coord<f64>, #[case] expected: &str) {
        assert_eq!(detect_country(point), expected);
    }

    #[rstest]
    #[case("United States", "name", 4)]
    #[case("India", "st_nm", 5)]
    #[case("United Kingdom", "NAME", 6)]
    fn configs_carry_name_property(
        #[case] country: &str,
        #[case] property: &str,
        #[case] zoom: u8,
    ) {
        let config = CountryMapConfig::for_country(country).unwrap();
        assert_eq!(config.name_property, property);
        assert_eq!(config.zoom, zoom);
    }

    #[rstest]
    #[case("United States", Coord { x: -98.58, y: 39.83 })]
    #[case("India", Coord { x: 78.96, y: 20.59 })]
    #[case("United Kingdom", Coord { x: -2.0, y: 54.0 })]
    fn configs_centre_on_the_country(#[case] country: &str, #[case] centre: Coord<f64>) {
        let config = CountryMapConfig::for_country(country).unwrap();
        assert_eq!(config.center, centre);
    }

    #[test]
    fn unknown_country_is_an_error() {
        let err = CountryMapConfig::for_country("Atlantis").unwrap_err();
        assert_eq!(
            err,
            CountryConfigError::Unknown {
                country: "Atlantis".into()
            }
        );
    }

    #[test]
    fn every_detectable_country_has_a_config() {
        for (name, _) in bounds() {
            assert!(CountryMapConfig::for_country(name).is_ok());
        }
    }
}
