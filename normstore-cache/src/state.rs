//! Cache state: type-scoped entity maps plus per-namespace views.

use normstore_types::{EntityMap, FlatEntity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The long-lived store a [`NamespaceCache`](crate::NamespaceCache) reduces
/// over.
///
/// Entity data lives in one map per entity type and is shared by every
/// namespace. A namespace only records which keys it fetched, whether a fetch
/// is in flight, and optionally a frozen copy of what it received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheState {
    /// Known namespaces, in the order they were first seen.
    #[serde(default)]
    pub namespaces: Vec<String>,
    /// Per-namespace records.
    #[serde(default)]
    pub records: BTreeMap<String, NamespaceRecord>,
    /// Entity maps keyed by entity type.
    #[serde(default)]
    pub entity_maps: BTreeMap<String, EntityMap>,
}

impl CacheState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the record of a namespace.
    pub fn record(&self, namespace: &str) -> Option<&NamespaceRecord> {
        self.records.get(namespace)
    }

    /// Gets the entity map of a type.
    pub fn entity_map(&self, entity_type: &str) -> Option<&EntityMap> {
        self.entity_maps.get(entity_type)
    }

    /// Gets one entity out of a type's map.
    pub fn entity(&self, entity_type: &str, key: &str) -> Option<&FlatEntity> {
        self.entity_maps.get(entity_type)?.get(key)
    }

    /// Returns true if the namespace has been requested or received and not
    /// cleared since.
    pub fn knows_namespace(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|ns| ns == namespace)
    }
}

/// Bookkeeping for one namespace.
///
/// Created with `is_fetching` set and no keys when a fetch starts; `keys` and
/// `preserved_entities` are filled in when the payload arrives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceRecord {
    #[serde(default)]
    pub is_fetching: bool,
    /// Keys of the namespace's primary entities, in received order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    /// Snapshot of the entities as received, keyed like `keys`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserved_entities: Option<EntityMap>,
}

impl NamespaceRecord {
    /// The key list, or an empty slice before anything was received.
    pub fn keys(&self) -> &[String] {
        self.keys.as_deref().unwrap_or_default()
    }

    pub fn preserved(&self, key: &str) -> Option<&FlatEntity> {
        self.preserved_entities.as_ref()?.get(key)
    }
}
