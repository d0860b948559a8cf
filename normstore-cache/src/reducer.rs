use crate::action::{CacheAction, ReceiveMeta};
use crate::mapper::{EntityMapper, StandardMapper};
use crate::state::{CacheState, NamespaceRecord};
use normstore_types::value::{dedupe, omit, without};
use normstore_types::{EntityMap, NormalizedDocument, StoreSlice};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Which entity types a cache listens for, and how each is folded in.
#[derive(Clone, Default)]
pub struct ReceiveConfig {
    primary_types: Vec<String>,
    entities: Option<Vec<String>>,
    mappers: BTreeMap<String, Arc<dyn EntityMapper>>,
}

impl ReceiveConfig {
    /// Listens for `primary_types`. Their keys are what namespaces record;
    /// when more than one produces keys in a payload, the last one in this
    /// list wins.
    pub fn new<I, S>(primary_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            primary_types: primary_types.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the full list of types whose entity maps are kept up to date.
    /// Defaults to the primary types.
    pub fn with_entities<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities = Some(entities.into_iter().map(Into::into).collect());
        self
    }

    /// Overrides the mapper of one entity type.
    pub fn with_mapper(
        mut self,
        entity_type: impl Into<String>,
        mapper: impl EntityMapper + 'static,
    ) -> Self {
        self.mappers.insert(entity_type.into(), Arc::new(mapper));
        self
    }

    pub fn primary_types(&self) -> &[String] {
        &self.primary_types
    }

    pub fn tracked_types(&self) -> &[String] {
        self.entities.as_deref().unwrap_or(self.primary_types.as_slice())
    }

    pub fn mapper_for(&self, entity_type: &str) -> &dyn EntityMapper {
        match self.mappers.get(entity_type) {
            Some(mapper) => mapper.as_ref(),
            None => &StandardMapper,
        }
    }
}

impl fmt::Debug for ReceiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiveConfig")
            .field("primary_types", &self.primary_types)
            .field("entities", &self.entities)
            .field("mappers", &self.mappers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Pure state transitions for a namespaced entity cache.
///
/// Every transition takes the state by value and returns the next one; a
/// transition that does not apply returns its input untouched. Nothing here
/// fails.
#[derive(Debug, Clone, Default)]
pub struct NamespaceCache {
    config: ReceiveConfig,
}

impl NamespaceCache {
    pub fn new(config: ReceiveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReceiveConfig {
        &self.config
    }

    /// Applies one action.
    pub fn reduce(&self, state: CacheState, action: CacheAction) -> CacheState {
        match action {
            CacheAction::Request { namespace } => {
                request_namespace(state, namespace.as_deref())
            }
            CacheAction::Receive { payload, meta } => {
                self.receive_entities(state, &payload, &meta)
            }
            CacheAction::Clear { namespace } => clear_namespace(state, &namespace),
        }
    }

    /// Folds a parsed payload into the state.
    ///
    /// Each tracked type present in the payload goes through its mapper. When
    /// the payload carries none of them the state is returned as is. With a
    /// namespace, the primary types are applied in configured order: a type
    /// is skipped when the payload's primary list leaves it out or when it
    /// brought no keys, and otherwise it rewrites the namespace record.
    pub fn receive_entities(
        &self,
        mut state: CacheState,
        payload: &NormalizedDocument,
        meta: &ReceiveMeta,
    ) -> CacheState {
        let mut received: BTreeMap<&str, &StoreSlice> = BTreeMap::new();
        let mut mapped: Vec<(String, EntityMap)> = Vec::new();

        for entity_type in self.config.tracked_types() {
            let Some(slice) = payload.slice(entity_type) else {
                continue;
            };
            let empty = EntityMap::new();
            let existing = state.entity_maps.get(entity_type).unwrap_or(&empty);
            let next = self.config.mapper_for(entity_type).map(existing, slice);
            mapped.push((entity_type.clone(), next));
            received.insert(entity_type, slice);
        }

        if received.is_empty() {
            trace!(
                tracked = ?self.config.tracked_types(),
                "Payload carries no tracked entity types"
            );
            return state;
        }

        let mut record = None;
        if let Some(namespace) = meta.namespace() {
            let previous = state.records.get(namespace);
            for entity_type in &self.config.primary_types {
                let Some(slice) = received.get(entity_type.as_str()) else {
                    trace!(entity_type = %entity_type, "Primary type not received");
                    continue;
                };
                if payload.lists_primary(entity_type) == Some(false) {
                    trace!(entity_type = %entity_type, "Type not primary in payload");
                    continue;
                }
                let Some(keys) = slice.keys.as_deref().filter(|keys| !keys.is_empty()) else {
                    trace!(entity_type = %entity_type, "Primary type brought no keys");
                    continue;
                };
                record = Some(populated_record(previous, slice, keys, meta));
            }
        }

        for (entity_type, map) in mapped {
            state.entity_maps.insert(entity_type, map);
        }

        if let Some(namespace) = meta.namespace()
            && let Some(record) = record
        {
            debug!(
                namespace = %namespace,
                keys = record.keys().len(),
                append = meta.append_keys,
                preserve = meta.preserve_entities,
                "Received namespace entities"
            );
            state.records.insert(namespace.to_string(), record);
        }

        let namespaces = state
            .namespaces
            .iter()
            .cloned()
            .chain(meta.namespace().map(String::from));
        state.namespaces = dedupe(namespaces.filter(|ns| !ns.is_empty()));

        debug!(types = received.len(), "Received entities");
        state
    }
}

/// Marks a namespace as fetching, registering it if it is new. Any keys or
/// snapshot it already holds are kept. Without a namespace this is a no-op.
pub fn request_namespace(mut state: CacheState, namespace: Option<&str>) -> CacheState {
    let Some(namespace) = namespace.filter(|ns| !ns.is_empty()) else {
        return state;
    };

    if !state.knows_namespace(namespace) {
        state.namespaces.push(namespace.to_string());
    }
    state
        .records
        .entry(namespace.to_string())
        .or_default()
        .is_fetching = true;

    debug!(namespace = %namespace, "Requested namespace");
    state
}

/// Forgets a namespace: its record goes and so does its entry in the
/// namespace list. The entity maps are left alone.
pub fn clear_namespace(mut state: CacheState, namespace: &str) -> CacheState {
    state.records = omit(&state.records, &[namespace]);
    state.namespaces = without(&state.namespaces, namespace);

    debug!(namespace = %namespace, "Cleared namespace");
    state
}

fn populated_record(
    previous: Option<&NamespaceRecord>,
    slice: &StoreSlice,
    keys: &[String],
    meta: &ReceiveMeta,
) -> NamespaceRecord {
    let old_keys = previous.map(NamespaceRecord::keys).unwrap_or_default();
    let keys: Vec<String> = if meta.append_keys {
        old_keys.iter().chain(keys).cloned().collect()
    } else {
        keys.to_vec()
    };

    let mut preserved = EntityMap::new();
    if meta.preserve_entities {
        if meta.append_keys
            && let Some(old) = previous.and_then(|r| r.preserved_entities.as_ref())
        {
            preserved.extend(old.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        for key in slice.keys() {
            if let Some(entity) = slice.get(key) {
                preserved.insert(key.clone(), entity.clone());
            }
        }
    }

    NamespaceRecord {
        is_fetching: false,
        keys: Some(keys),
        preserved_entities: Some(preserved),
    }
}
