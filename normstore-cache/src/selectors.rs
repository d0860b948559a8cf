//! Read-side queries over a [`CacheState`].

use crate::state::CacheState;
use normstore_types::FlatEntity;

/// Looks an entity up in its type's map.
pub fn entity_by_id<'a>(
    state: &'a CacheState,
    entity_type: &str,
    id: &str,
) -> Option<&'a FlatEntity> {
    state.entity(entity_type, id)
}

/// Looks an entity up as seen by a namespace: the namespace's preserved copy
/// when it has one, else the type's map.
pub fn entity_by_namespace_and_id<'a>(
    state: &'a CacheState,
    namespace: &str,
    id: &str,
    entity_type: &str,
) -> Option<&'a FlatEntity> {
    state
        .record(namespace)
        .and_then(|record| record.preserved(id))
        .or_else(|| state.entity(entity_type, id))
}

/// The entities of a namespace in key order. Keys with no entity behind them
/// are skipped.
pub fn entities_by_namespace<'a>(
    state: &'a CacheState,
    namespace: &str,
    entity_type: &str,
) -> Vec<&'a FlatEntity> {
    let Some(record) = state.record(namespace) else {
        return Vec::new();
    };
    record
        .keys()
        .iter()
        .filter_map(|id| entity_by_namespace_and_id(state, namespace, id, entity_type))
        .collect()
}

pub fn namespace_is_fetching(state: &CacheState, namespace: &str) -> bool {
    state.record(namespace).is_some_and(|record| record.is_fetching)
}
