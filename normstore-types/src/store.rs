//! The normalized store: type-keyed slices of identity-keyed flat entities.

use crate::{Object, Resource, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Identity key to flat entity.
pub type EntityMap = BTreeMap<String, FlatEntity>;

/// A resource with its attributes, relationships and meta lifted onto one
/// object next to `id`, `type` and `links`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatEntity(Object);

impl FlatEntity {
    /// Flattens a resource.
    ///
    /// Fields are written in a fixed order: `id`, `type`, `links`, then the
    /// attributes, then the relationships, then the meta members. A later
    /// write replaces an earlier one with the same name.
    pub fn from_resource(resource: &Resource) -> Self {
        let mut fields = Object::new();
        fields.insert("id".into(), Value::String(resource.id.clone()));
        fields.insert("type".into(), Value::String(resource.resource_type.clone()));
        fields.insert(
            "links".into(),
            Value::Object(resource.links.clone().unwrap_or_default()),
        );

        if let Some(attributes) = &resource.attributes {
            for (name, value) in attributes {
                fields.insert(name.clone(), value.clone());
            }
        }
        if let Some(relationships) = &resource.relationships {
            for (name, relationship) in relationships {
                fields.insert(name.clone(), relationship.to_value());
            }
        }
        if let Some(meta) = &resource.meta {
            for (name, value) in meta {
                fields.insert(name.clone(), value.clone());
            }
        }

        Self(fields)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn entity_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    pub fn as_object(&self) -> &Object {
        &self.0
    }

    pub fn into_object(self) -> Object {
        self.0
    }
}

impl From<Object> for FlatEntity {
    fn from(fields: Object) -> Self {
        Self(fields)
    }
}

/// All entities of one type.
///
/// `keys` is only present for types that appeared among a document's primary
/// resources; it lists identity keys in first-seen order without repeats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSlice {
    #[serde(default)]
    pub data: EntityMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
}

impl StoreSlice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a side-loaded entity. Does not touch `keys`.
    pub fn insert(&mut self, key: impl Into<String>, entity: FlatEntity) {
        self.data.insert(key.into(), entity);
    }

    /// Inserts a primary entity: the entity replaces any earlier one under the
    /// same key, and the key is appended to `keys` unless already listed.
    pub fn push_primary(&mut self, key: impl Into<String>, entity: FlatEntity) {
        let key = key.into();
        let keys = self.keys.get_or_insert_with(Vec::new);
        if !keys.contains(&key) {
            keys.push(key.clone());
        }
        self.data.insert(key, entity);
    }

    /// The ordered key list, or an empty slice when the type is not primary.
    pub fn keys(&self) -> &[String] {
        self.keys.as_deref().unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&FlatEntity> {
        self.data.get(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A whole normalized document: optional top-level members, the list of
/// primary types, and one [`StoreSlice`] per entity type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonapi: Option<Object>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Object>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Object>,
    /// Types that came from the document's primary `data`, in first-seen order.
    #[serde(
        rename = "__primaryEntities",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub primary_entities: Option<Vec<String>>,
    #[serde(flatten)]
    pub slices: BTreeMap<String, StoreSlice>,
}

impl NormalizedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a store out of an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn slice(&self, entity_type: &str) -> Option<&StoreSlice> {
        self.slices.get(entity_type)
    }

    pub fn slice_mut(&mut self, entity_type: &str) -> &mut StoreSlice {
        self.slices.entry(entity_type.to_string()).or_default()
    }

    /// Whether the type is listed as primary. A store that carries no primary
    /// list at all is not asked and answers `None`.
    pub fn lists_primary(&self, entity_type: &str) -> Option<bool> {
        self.primary_entities
            .as_ref()
            .map(|types| types.iter().any(|t| t == entity_type))
    }

    pub fn primary_types(&self) -> &[String] {
        self.primary_entities.as_deref().unwrap_or_default()
    }

    /// Number of entities across every slice.
    pub fn entity_count(&self) -> usize {
        self.slices.values().map(StoreSlice::len).sum()
    }
}
