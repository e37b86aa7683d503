//! Regions and the entity sets the engine computes over.
//!
//! An [`Entity`] is one region of a country with its typed metrics. An
//! [`EntitySet`] is the immutable, key-unique collection of all regions of
//! one country for the duration of a view session.

use std::collections::HashSet;

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::{EntitySetError, MetricKind};

/// Raw region record as stored in the static dataset.
///
/// # Examples
/// ```
/// use healthmap_core::RegionRecord;
///
/// let record: RegionRecord = serde_json::from_str(
///     r#"{"name":"Goa","hospitals":250,"doctors":3500,"climate":"Tropical monsoon",
///         "healthAlerts":[],"healthcareIndex":72,"lat":15.3,"lng":74.12}"#,
/// )?;
/// assert_eq!(record.hospitals, 250);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    /// Display name of the region.
    pub name: String,
    /// Number of hospitals.
    pub hospitals: u32,
    /// Number of doctors.
    pub doctors: u32,
    /// Free-text climate description.
    pub climate: String,
    /// Active health alerts.
    #[serde(default)]
    pub health_alerts: Vec<String>,
    /// Overall healthcare index in `0..=100`.
    pub healthcare_index: f64,
    /// Latitude of the marker position.
    pub lat: f64,
    /// Longitude of the marker position.
    pub lng: f64,
}

/// Typed metric values of one region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionMetrics {
    /// Overall healthcare index in `0..=100`; higher is better.
    pub composite_index: f64,
    /// Hospital count.
    pub facility_count_a: u32,
    /// Doctor count.
    pub facility_count_b: u32,
    /// Free-text climate description.
    pub climate: String,
    /// Active health alerts; their count is the alert metric.
    pub alerts: Vec<String>,
}

/// The value of one metric for one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue<'a> {
    /// A numeric metric.
    Numeric(f64),
    /// The categorical metric.
    Categorical(&'a str),
}

/// One region with its metrics.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`; the engine
/// passes them through for marker placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Dataset key, unique within its entity set.
    pub key: String,
    /// Human-readable name. May differ from boundary-geometry labels.
    pub display_name: String,
    /// Typed metric values.
    pub metrics: RegionMetrics,
    /// Marker position.
    pub location: Coord<f64>,
}

impl Entity {
    /// Construct an entity.
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        metrics: RegionMetrics,
        location: Coord<f64>,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            metrics,
            location,
        }
    }

    /// Convert a dataset record stored under `key`.
    ///
    /// # Examples
    /// ```
    /// use healthmap_core::{Entity, MetricKind, RegionRecord};
    ///
    /// let record = RegionRecord {
    ///     name: "Kerala".into(),
    ///     hospitals: 3200,
    ///     doctors: 55000,
    ///     climate: "Tropical".into(),
    ///     health_alerts: vec!["Flood preparedness".into()],
    ///     healthcare_index: 85.0,
    ///     lat: 10.85,
    ///     lng: 76.27,
    /// };
    /// let entity = Entity::from_record("Kerala", record);
    /// assert_eq!(entity.numeric(MetricKind::DerivedAlertCount), Some(1.0));
    /// assert_eq!(entity.location.x, 76.27);
    /// ```
    pub fn from_record(key: impl Into<String>, record: RegionRecord) -> Self {
        let RegionRecord {
            name,
            hospitals,
            doctors,
            climate,
            health_alerts,
            healthcare_index,
            lat,
            lng,
        } = record;
        Self::new(
            key,
            name,
            RegionMetrics {
                composite_index: healthcare_index,
                facility_count_a: hospitals,
                facility_count_b: doctors,
                climate,
                alerts: health_alerts,
            },
            Coord { x: lng, y: lat },
        )
    }

    /// Return the value of `metric` for this entity.
    #[must_use]
    pub fn value(&self, metric: MetricKind) -> MetricValue<'_> {
        match metric {
            MetricKind::CompositeIndex => MetricValue::Numeric(self.metrics.composite_index),
            MetricKind::FacilityCountA => {
                MetricValue::Numeric(f64::from(self.metrics.facility_count_a))
            }
            MetricKind::FacilityCountB => {
                MetricValue::Numeric(f64::from(self.metrics.facility_count_b))
            }
            MetricKind::DerivedAlertCount => MetricValue::Numeric(f64::from(self.alert_count())),
            MetricKind::Categorical => MetricValue::Categorical(&self.metrics.climate),
        }
    }

    /// Return the numeric value of `metric`, or `None` when it is categorical.
    #[must_use]
    pub fn numeric(&self, metric: MetricKind) -> Option<f64> {
        match self.value(metric) {
            MetricValue::Numeric(value) => Some(value),
            MetricValue::Categorical(_) => None,
        }
    }

    /// Number of active health alerts.
    #[must_use]
    pub fn alert_count(&self) -> u32 {
        u32::try_from(self.metrics.alerts.len()).unwrap_or(u32::MAX)
    }
}

/// All regions of one country, with unique keys.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use healthmap_core::{Entity, EntitySet, EntitySetError, RegionMetrics};
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let duplicate = EntitySet::new(vec![
///     Entity::new("A", "Alpha", RegionMetrics::default(), origin),
///     Entity::new("A", "Again", RegionMetrics::default(), origin),
/// ]);
/// assert!(matches!(duplicate, Err(EntitySetError::DuplicateKey { .. })));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntitySet {
    entities: Vec<Entity>,
}

impl EntitySet {
    /// Validate key uniqueness and construct the set.
    ///
    /// # Errors
    /// Returns [`EntitySetError::DuplicateKey`] when two entities share a key.
    pub fn new(entities: Vec<Entity>) -> Result<Self, EntitySetError> {
        if let Some(key) = first_duplicate_key(&entities) {
            return Err(EntitySetError::DuplicateKey { key });
        }
        Ok(Self { entities })
    }

    /// Build a set from `(key, record)` pairs, preserving their order.
    ///
    /// # Errors
    /// Returns [`EntitySetError::DuplicateKey`] when a key repeats.
    pub fn from_records<I, K>(records: I) -> Result<Self, EntitySetError>
    where
        I: IntoIterator<Item = (K, RegionRecord)>,
        K: Into<String>,
    {
        Self::new(
            records
                .into_iter()
                .map(|(key, record)| Entity::from_record(key, record))
                .collect(),
        )
    }

    /// Look up an entity by dataset key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.key == key)
    }

    /// Borrow the entities as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate over the entities in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    /// Number of entities in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Report whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

fn first_duplicate_key(entities: &[Entity]) -> Option<String> {
    let mut seen = HashSet::with_capacity(entities.len());
    entities
        .iter()
        .find(|e| !seen.insert(e.key.as_str()))
        .map(|e| e.key.clone())
}

impl AsRef<[Entity]> for EntitySet {
    fn as_ref(&self) -> &[Entity] {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a EntitySet {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
