use normstore_merge::merge_entity_maps;
use normstore_types::{EntityMap, StoreSlice};

/// Folds a received slice into the existing entity map of its type.
///
/// Implementations must be pure: the returned map replaces the type's map in
/// the next state.
pub trait EntityMapper: Send + Sync {
    fn map(&self, existing: &EntityMap, received: &StoreSlice) -> EntityMap;
}

/// Shallow merge: received entities replace existing ones under the same key,
/// everything else is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMapper;

impl EntityMapper for StandardMapper {
    fn map(&self, existing: &EntityMap, received: &StoreSlice) -> EntityMap {
        merge_entity_maps(existing, &received.data)
    }
}

impl<F> EntityMapper for F
where
    F: Fn(&EntityMap, &StoreSlice) -> EntityMap + Send + Sync,
{
    fn map(&self, existing: &EntityMap, received: &StoreSlice) -> EntityMap {
        self(existing, received)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use normstore_types::FlatEntity;

    fn entity(id: &str, extra: Option<&str>) -> FlatEntity {
        let mut e = FlatEntity::default();
        e.insert("id", id.into());
        if let Some(extra) = extra {
            e.insert("newProp", extra.into());
        }
        e
    }

    #[test]
    fn standard_mapper_into_empty_map() {
        let mut received = StoreSlice::new();
        received.insert("id", entity("id", None));
        let out = StandardMapper.map(&EntityMap::new(), &received);
        assert_eq!(out, received.data);
    }

    #[test]
    fn standard_mapper_keeps_entities_not_received() {
        let existing = EntityMap::from([
            ("changingId".to_string(), entity("changingId", None)),
            ("oldId".to_string(), entity("oldId", None)),
        ]);
        let mut received = StoreSlice::new();
        received.insert("newId", entity("newId", None));
        received.insert("changingId", entity("changingId", Some("newprop")));

        let out = StandardMapper.map(&existing, &received);
        assert_eq!(out.len(), 3);
        assert_eq!(out["oldId"], entity("oldId", None));
        assert_eq!(out["changingId"], entity("changingId", Some("newprop")));
    }
}
