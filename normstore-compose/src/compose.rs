use crate::{build_relationship, ComposeError, ComposeResult};
use normstore_schema::{
    validate_included_schema, validate_schema, CompositionSchema, IncludedSchema,
    RelationshipSchema,
};
use normstore_types::value::{as_identifier, pick};
use normstore_types::{Document, FlatEntity, Object, PrimaryData, Relationship, Resource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Options for [`compose_request`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeOptions {
    /// Emit `data` as a single resource instead of a one-element list.
    #[serde(default)]
    pub single: bool,
}

impl ComposeOptions {
    pub fn single() -> Self {
        Self { single: true }
    }
}

/// Composes a request document for `entity`.
///
/// The entity must carry an `id` and a `type` equal to the schema's. The
/// resource's `attributes`, `relationships` and `meta` and the document's
/// top-level `meta` and `included` are each left out when nothing ends up in
/// them.
pub fn compose_request(
    entity: &FlatEntity,
    schema: &CompositionSchema,
    options: ComposeOptions,
) -> ComposeResult<Document> {
    validate_schema(schema)?;
    let fields = entity.as_object();

    let id = fields
        .get("id")
        .and_then(as_identifier)
        .ok_or_else(|| ComposeError::MissingId {
            context: format!("`{}` entity", schema.entity_type),
        })?;

    let found = entity.entity_type().unwrap_or_default();
    if found != schema.entity_type {
        return Err(ComposeError::TypeMismatch {
            expected: schema.entity_type.clone(),
            found: found.to_string(),
        });
    }

    let top_level_meta = pick(fields, &schema.top_level_meta);
    let attributes = pick(fields, &schema.attributes);
    let relationships = build_relationships(fields, &schema.relationships)?;
    let included = collect_included(fields, &schema.included)?;

    let resource = Resource {
        id,
        resource_type: schema.entity_type.clone(),
        attributes: non_empty(attributes),
        relationships,
        meta: non_empty(pick(fields, &schema.meta)),
        links: None,
    };

    debug!(
        entity_type = %resource.resource_type,
        id = %resource.id,
        included = included.len(),
        single = options.single,
        "Composed request"
    );

    let data = if options.single {
        PrimaryData::One(Box::new(resource))
    } else {
        PrimaryData::Many(vec![resource])
    };

    Ok(Document {
        data: Some(data),
        included: (!included.is_empty()).then_some(included),
        meta: non_empty(top_level_meta),
        ..Document::default()
    })
}

/// Builds one side-loaded resource from a flat related entity.
///
/// The entity's own `type` is used when it has one, else the descriptor's
/// default type, else "".
pub fn build_included(entity: &Object, schema: &IncludedSchema) -> ComposeResult<Resource> {
    validate_included_schema(schema)?;

    let id = entity
        .get("id")
        .and_then(as_identifier)
        .ok_or_else(|| ComposeError::MissingId {
            context: format!("included `{}` entity {}", schema.key, Value::Object(entity.clone())),
        })?;

    let resource_type = entity
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .or_else(|| schema.default_type.clone())
        .unwrap_or_default();

    trace!(key = %schema.key, id = %id, "Building included resource");

    Ok(Resource {
        id,
        resource_type,
        attributes: non_empty(pick(entity, &schema.attributes)),
        relationships: build_relationships(entity, &schema.relationships)?,
        meta: non_empty(pick(entity, &schema.meta)),
        links: None,
    })
}

fn build_relationships(
    fields: &Object,
    schemas: &[RelationshipSchema],
) -> ComposeResult<Option<BTreeMap<String, Relationship>>> {
    let mut out = BTreeMap::new();
    for schema in schemas {
        if let Some(input) = fields.get(&schema.key) {
            out.insert(schema.key.clone(), build_relationship(input, schema)?);
        }
    }
    Ok((!out.is_empty()).then_some(out))
}

/// Side-loaded resources in schema order, then in order within each field.
fn collect_included(fields: &Object, schemas: &[IncludedSchema]) -> ComposeResult<Vec<Resource>> {
    let mut included = Vec::new();
    for schema in schemas {
        let Some(data) = fields.get(&schema.key).and_then(|field| field.get("data")) else {
            continue;
        };
        match data {
            Value::Null | Value::Bool(false) => {}
            Value::Array(items) => {
                for item in items {
                    included.push(build_included(as_entity(item, schema)?, schema)?);
                }
            }
            item => included.push(build_included(as_entity(item, schema)?, schema)?),
        }
    }
    Ok(included)
}

fn as_entity<'a>(item: &'a Value, schema: &IncludedSchema) -> ComposeResult<&'a Object> {
    item.as_object().ok_or_else(|| ComposeError::MissingId {
        context: format!("included `{}` entity {}", schema.key, item),
    })
}

fn non_empty(fields: Object) -> Option<Object> {
    (!fields.is_empty()).then_some(fields)
}
