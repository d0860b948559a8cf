//! The response parser.

use crate::{ById, Identifier, ParseOutcome};
use normstore_merge::merge_stores;
use normstore_types::value::dedupe;
use normstore_types::{
    Document, ErrorObject, FlatEntity, NormalizedDocument, Object, PrimaryData, Resource,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

/// Top-level members whose presence makes a document worth parsing.
const PAYLOAD_MEMBERS: [&str; 3] = ["data", "errors", "meta"];

/// Flattens response documents into normalized stores.
///
/// Every entity is keyed through the parser's [`Identifier`]; the default
/// keys by raw `id`.
#[derive(Debug, Clone, Default)]
pub struct Parser<I = ById> {
    identifier: I,
}

impl Parser<ById> {
    pub fn new() -> Self {
        Self { identifier: ById }
    }
}

impl<I: Identifier> Parser<I> {
    pub fn with_identifier(identifier: I) -> Self {
        Self { identifier }
    }

    pub fn identifier(&self) -> &I {
        &self.identifier
    }

    /// Parses raw JSON.
    ///
    /// Anything that is not an object carrying `data`, `errors` or `meta` is
    /// [`ParseOutcome::Empty`]. A member counts as present even when it holds
    /// `null`. An `errors` member is passed through as it arrived. Otherwise
    /// each resource is read on its own and one that does not read is skipped.
    pub fn parse_value(&self, raw: &Value) -> ParseOutcome {
        let Some(members) = raw.as_object() else {
            return ParseOutcome::Empty;
        };
        if !PAYLOAD_MEMBERS.iter().any(|m| members.contains_key(*m)) {
            return ParseOutcome::Empty;
        }
        if let Some(errors) = members.get("errors") {
            debug!("Response carries errors, skipping normalization");
            return ParseOutcome::Errors(errors.clone());
        }

        let doc = Document {
            data: members
                .get("data")
                .map(|data| PrimaryData::Many(read_resources("data", data))),
            included: members
                .get("included")
                .map(|included| read_resources("included", included)),
            errors: None,
            meta: top_level(members, "meta"),
            links: top_level(members, "links"),
            jsonapi: top_level(members, "jsonapi"),
        };
        self.normalize(&doc)
    }

    /// Parses a typed document.
    pub fn parse(&self, doc: &Document) -> ParseOutcome {
        if doc.data.is_none() && doc.errors.is_none() && doc.meta.is_none() {
            return ParseOutcome::Empty;
        }
        if let Some(errors) = &doc.errors {
            debug!(count = errors.len(), "Response carries errors, skipping normalization");
            return ParseOutcome::Errors(Value::Array(
                errors.iter().map(ErrorObject::to_value).collect(),
            ));
        }
        self.normalize(doc)
    }

    fn normalize(&self, doc: &Document) -> ParseOutcome {
        let primary = self.flatten_primary(doc.primary());
        let included = self.flatten_included(doc.included());
        let mut store = merge_stores(&primary, &included);
        store.jsonapi = non_empty(&doc.jsonapi);
        store.links = non_empty(&doc.links);
        store.meta = non_empty(&doc.meta);

        debug!(
            primary = ?store.primary_types(),
            types = store.slices.len(),
            entities = store.entity_count(),
            "Normalized response"
        );
        ParseOutcome::Normalized(store)
    }

    /// Primary resources: every slice gets a `keys` list and every type is
    /// recorded as primary.
    fn flatten_primary(&self, resources: &[Resource]) -> NormalizedDocument {
        let mut store = NormalizedDocument::new();
        for resource in resources {
            let key = self.identifier.identify(resource);
            trace!(entity_type = %resource.resource_type, key = %key, "Flattening primary resource");
            store
                .slice_mut(&resource.resource_type)
                .push_primary(key, FlatEntity::from_resource(resource));
        }
        store.primary_entities = Some(dedupe(
            resources.iter().map(|r| r.resource_type.clone()),
        ));
        store
    }

    /// Side-loaded resources: slices without `keys`.
    fn flatten_included(&self, resources: &[Resource]) -> NormalizedDocument {
        let mut store = NormalizedDocument::new();
        for resource in resources {
            let key = self.identifier.identify(resource);
            store
                .slice_mut(&resource.resource_type)
                .insert(key, FlatEntity::from_resource(resource));
        }
        store.primary_entities = Some(Vec::new());
        store
    }
}

/// Parses raw JSON with the default identity.
pub fn parse_response(raw: &Value) -> ParseOutcome {
    Parser::new().parse_value(raw)
}

/// Reads `data` or `included`. A single resource reads as a list of one.
fn read_resources(member: &str, value: &Value) -> Vec<Resource> {
    let items = match value {
        Value::Null => return Vec::new(),
        Value::Array(items) => items.as_slice(),
        item => std::slice::from_ref(item),
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match Resource::deserialize(item) {
            Ok(resource) => Some(resource),
            Err(error) => {
                warn!(member, index, %error, "Skipping unreadable resource");
                None
            }
        })
        .collect()
}

fn top_level(members: &Object, key: &str) -> Option<Object> {
    members.get(key).and_then(Value::as_object).cloned()
}

fn non_empty(member: &Option<Object>) -> Option<Object> {
    member.as_ref().filter(|m| !m.is_empty()).cloned()
}
