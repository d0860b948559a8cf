//! Identity strategies: how a resource maps to its key in the store.

use normstore_types::Resource;
use serde_json::Value;

/// Computes the key a resource is stored under.
///
/// Two resources with the same key in the same type collapse into one store
/// entry, so a strategy decides what counts as "the same entity".
pub trait Identifier {
    fn identify(&self, resource: &Resource) -> String;
}

/// Keys resources by their `id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ById;

impl Identifier for ById {
    fn identify(&self, resource: &Resource) -> String {
        resource.id.clone()
    }
}

/// Keys resources by `id` and a resource-level meta member, as
/// `"<id>:<value>"`, so that several revisions of one resource can live side
/// by side. Resources without the member fall back to their bare `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByMetaRevision {
    meta_key: String,
}

impl ByMetaRevision {
    pub fn new(meta_key: impl Into<String>) -> Self {
        Self {
            meta_key: meta_key.into(),
        }
    }

    pub fn meta_key(&self) -> &str {
        &self.meta_key
    }
}

impl Identifier for ByMetaRevision {
    fn identify(&self, resource: &Resource) -> String {
        match resource.meta_value(&self.meta_key) {
            Some(Value::String(rev)) => format!("{}:{}", resource.id, rev),
            Some(rev @ (Value::Number(_) | Value::Bool(_))) => format!("{}:{}", resource.id, rev),
            _ => resource.id.clone(),
        }
    }
}

impl<F> Identifier for F
where
    F: Fn(&Resource) -> String,
{
    fn identify(&self, resource: &Resource) -> String {
        self(resource)
    }
}
