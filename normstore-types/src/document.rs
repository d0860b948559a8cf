//! The hypermedia document as it travels over the wire.
//!
//! The same types describe inbound responses (fed to the parser) and outbound
//! requests (produced by the composer). Optional members are skipped on
//! serialization, so an absent field never shows up as `null`.

use crate::{Object, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A top-level document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PrimaryData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<Resource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorObject>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Object>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Object>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonapi: Option<Object>,
}

impl Document {
    /// Reads a document out of an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the primary resources, coercing a single resource to a slice.
    pub fn primary(&self) -> &[Resource] {
        match &self.data {
            Some(data) => data.as_slice(),
            None => &[],
        }
    }

    /// Returns the side-loaded resources, or an empty slice.
    pub fn included(&self) -> &[Resource] {
        self.included.as_deref().unwrap_or_default()
    }
}

/// The `data` member: one resource or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    Many(Vec<Resource>),
    One(Box<Resource>),
}

impl PrimaryData {
    pub fn as_slice(&self) -> &[Resource] {
        match self {
            Self::Many(resources) => resources,
            Self::One(resource) => std::slice::from_ref(resource.as_ref()),
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Self::One(_))
    }
}

/// A resource object: `id` and `type` plus optional payload sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(deserialize_with = "identifier")]
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Object>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<BTreeMap<String, Relationship>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Object>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Object>,
}

impl Resource {
    pub fn new(id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
            ..Self::default()
        }
    }

    /// Looks up a key in the resource-level `meta` section.
    pub fn meta_value(&self, key: &str) -> Option<&Value> {
        self.meta.as_ref().and_then(|meta| meta.get(key))
    }
}

/// A relationship object. A relationship without `data` is links/meta only.
///
/// Members other than `data`, `links` and `meta` are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RelationshipData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Object>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Object>,
    #[serde(flatten)]
    pub extra: Object,
}

impl Relationship {
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
            && self.links.is_none()
            && self.meta.is_none()
            && self.extra.is_empty()
    }

    /// Converts to a JSON value in the same member order the wire uses.
    pub fn to_value(&self) -> Value {
        let mut out = Object::new();
        if let Some(links) = &self.links {
            out.insert("links".into(), Value::Object(links.clone()));
        }
        if let Some(meta) = &self.meta {
            out.insert("meta".into(), Value::Object(meta.clone()));
        }
        if let Some(data) = &self.data {
            out.insert("data".into(), data.to_value());
        }
        for (key, value) in &self.extra {
            out.entry(key.clone()).or_insert_with(|| value.clone());
        }
        Value::Object(out)
    }
}

/// Relationship linkage: a to-one reference or a to-many list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    Many(Vec<ResourceRef>),
    One(ResourceRef),
}

impl RelationshipData {
    pub fn refs(&self) -> &[ResourceRef] {
        match self {
            Self::Many(refs) => refs,
            Self::One(one) => std::slice::from_ref(one),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Many(refs) => Value::Array(refs.iter().map(ResourceRef::to_value).collect()),
            Self::One(one) => one.to_value(),
        }
    }
}

/// A resource identifier object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(deserialize_with = "identifier")]
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Object>,
}

impl ResourceRef {
    pub fn new(id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
            meta: None,
        }
    }

    pub fn to_value(&self) -> Value {
        let mut out = Object::new();
        out.insert("id".into(), Value::String(self.id.clone()));
        out.insert("type".into(), Value::String(self.resource_type.clone()));
        if let Some(meta) = &self.meta {
            out.insert("meta".into(), Value::Object(meta.clone()));
        }
        Value::Object(out)
    }
}

/// An entry of the top-level `errors` array.
///
/// Members the format does not name are kept in `extra` so that error
/// documents pass through the parser without losing anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `code` and `status` arrive as either strings or numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Object>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(flatten)]
    pub extra: Object,
}

impl ErrorObject {
    pub fn to_value(&self) -> Value {
        let mut out = self.extra.clone();
        let named = [
            ("id", self.id.clone().map(Value::String)),
            ("code", self.code.clone()),
            ("status", self.status.clone()),
            ("source", self.source.clone().map(Value::Object)),
            ("title", self.title.clone().map(Value::String)),
            ("detail", self.detail.clone().map(Value::String)),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                out.insert(key.into(), value);
            }
        }
        Value::Object(out)
    }
}

/// Reads an id sent as either a string or a number.
fn identifier<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(D::Error::custom(format!(
            "id must be a string or a number, got {other}"
        ))),
    }
}
