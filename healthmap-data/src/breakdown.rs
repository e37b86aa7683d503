//! Per-entity sub-category breakdowns shown in detail panels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Entity display name → sub-category → count.
///
/// The engine passes breakdowns through without interpreting categories.
///
/// # Examples
/// ```
/// use healthmap_data::Breakdown;
///
/// let breakdown: Breakdown = serde_json::from_str(
///     r#"{"Kerala": {"Cardiology": 120, "Oncology": 45}}"#,
/// )?;
/// assert_eq!(breakdown.total_for("Kerala"), Some(165));
/// assert!(breakdown.for_entity("Goa").is_none());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakdown {
    entries: BTreeMap<String, BTreeMap<String, u64>>,
}

impl Breakdown {
    /// Wrap an existing mapping.
    #[must_use]
    pub fn new(entries: BTreeMap<String, BTreeMap<String, u64>>) -> Self {
        Self { entries }
    }

    /// Sub-category counts for one entity, by display name.
    #[must_use]
    pub fn for_entity(&self, display_name: &str) -> Option<&BTreeMap<String, u64>> {
        self.entries.get(display_name)
    }

    /// Sum of an entity's sub-category counts, saturating on overflow.
    #[must_use]
    pub fn total_for(&self, display_name: &str) -> Option<u64> {
        self.for_entity(display_name)
            .map(|categories| categories.values().fold(0_u64, |acc, n| acc.saturating_add(*n)))
    }

    /// Number of entities with a breakdown.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether no entity has a breakdown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
