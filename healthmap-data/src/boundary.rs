//! Boundary feature collections and their matching against entities.
//!
//! Geometry is carried through untouched; only the property bag is read.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::EntityNameResolver;

/// A GeoJSON `FeatureCollection`.
///
/// # Examples
/// ```
/// use healthmap_data::BoundaryCollection;
///
/// let collection: BoundaryCollection = serde_json::from_str(
///     r#"{"type":"FeatureCollection","features":[
///         {"type":"Feature","properties":{"st_nm":"Kerala"},"geometry":null}
///     ]}"#,
/// )?;
/// assert_eq!(collection.features[0].name("st_nm"), Some("Kerala"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCollection {
    /// Features in document order.
    #[serde(default)]
    pub features: Vec<BoundaryFeature>,
}

/// One boundary polygon with its properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryFeature {
    /// Property bag; absent or `null` properties read as empty.
    #[serde(default, deserialize_with = "properties_or_empty")]
    pub properties: Map<String, Value>,
    /// Opaque geometry object.
    #[serde(default)]
    pub geometry: Value,
}

fn properties_or_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Map<String, Value>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl BoundaryFeature {
    /// Read the region name stored under `name_property`.
    ///
    /// Returns `None` when the property is missing or not a string.
    #[must_use]
    pub fn name(&self, name_property: &str) -> Option<&str> {
        self.properties.get(name_property).and_then(Value::as_str)
    }
}

/// Outcome of matching one boundary feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureMatch {
    /// Position of the feature in its collection.
    pub index: usize,
    /// Name read from the feature, if any.
    pub feature_name: Option<String>,
    /// Key of the resolved entity, or `None` for an unmatched feature.
    pub entity_key: Option<String>,
}

impl FeatureMatch {
    /// Report whether the feature resolved to an entity.
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.entity_key.is_some()
    }
}

/// Match every feature of `collection` against the resolver's entities.
///
/// Unnamed and unresolved features are reported as unmatched so the caller
/// can render them in a neutral style.
#[must_use]
pub fn match_features(
    collection: &BoundaryCollection,
    name_property: &str,
    resolver: &EntityNameResolver<'_>,
) -> Vec<FeatureMatch> {
    collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let feature_name = feature.name(name_property);
            let entity_key = match feature_name {
                Some(name) => resolver.resolve(name).map(|entity| entity.key.clone()),
                None => {
                    warn!("boundary feature {index} has no '{name_property}' property");
                    None
                }
            };
            if let (Some(name), None) = (feature_name, entity_key.as_ref()) {
                warn!("boundary feature '{name}' matches no entity");
            }
            FeatureMatch {
                index,
                feature_name: feature_name.map(str::to_owned),
                entity_key,
            }
        })
        .collect()
}
