//! Resolve boundary-feature names to entities.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use healthmap_core::Entity;
use log::debug;

use crate::AliasTable;
use crate::alias::normalise;

/// Case-insensitive lookup from boundary-feature names to entities.
///
/// The lowercase display-name table is built once per entity set. When two
/// entities share a display name ignoring case, the first one wins.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use healthmap_core::{Entity, RegionMetrics};
/// use healthmap_data::EntityNameResolver;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let entities = [
///     Entity::new("Odisha", "Odisha", RegionMetrics::default(), origin),
///     Entity::new("Kerala", "Kerala", RegionMetrics::default(), origin),
/// ];
/// let resolver = EntityNameResolver::new(&entities);
/// assert_eq!(resolver.resolve("KERALA").map(|e| e.key.as_str()), Some("Kerala"));
/// assert_eq!(resolver.resolve("Orissa").map(|e| e.key.as_str()), Some("Odisha"));
/// assert!(resolver.resolve("Atlantis").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct EntityNameResolver<'a> {
    by_name: HashMap<String, &'a Entity>,
    aliases: &'a AliasTable,
}

impl<'a> EntityNameResolver<'a> {
    /// Build a resolver over `entities` using the built-in alias table.
    #[must_use]
    pub fn new(entities: &'a [Entity]) -> Self {
        Self::with_aliases(entities, AliasTable::builtin())
    }

    /// Build a resolver over `entities` using a caller-supplied alias table.
    #[must_use]
    pub fn with_aliases(entities: &'a [Entity], aliases: &'a AliasTable) -> Self {
        let mut by_name = HashMap::with_capacity(entities.len());
        for entity in entities {
            match by_name.entry(normalise(&entity.display_name)) {
                Entry::Vacant(slot) => {
                    slot.insert(entity);
                }
                Entry::Occupied(existing) => {
                    debug!(
                        "display name '{}' of '{}' already resolves to '{}'",
                        entity.display_name,
                        entity.key,
                        existing.get().key
                    );
                }
            }
        }
        Self { by_name, aliases }
    }

    /// Resolve a boundary-feature name.
    ///
    /// The alias table is consulted first; when the alias target is not in
    /// the entity set the name itself is looked up. Returns `None` when
    /// nothing matches.
    #[must_use]
    pub fn resolve(&self, feature_name: &str) -> Option<&'a Entity> {
        let aliased = self
            .aliases
            .canonical(feature_name)
            .and_then(|canonical| self.by_name.get(canonical));
        aliased
            .or_else(|| self.by_name.get(&normalise(feature_name)))
            .copied()
    }

    /// Number of distinct names the resolver knows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Report whether the resolver knows no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// One-shot resolution of `feature_name` against `entities` with the
/// built-in aliases.
///
/// The lowercase lookup is rebuilt on every call. Anything resolving more
/// than one name, such as a boundary layer, must build an
/// [`EntityNameResolver`] once and reuse it.
#[must_use]
pub fn resolve<'a>(feature_name: &str, entities: &'a [Entity]) -> Option<&'a Entity> {
    EntityNameResolver::new(entities).resolve(feature_name)
}
