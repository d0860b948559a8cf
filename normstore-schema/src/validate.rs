//! Structural validation of composition schemas.
//!
//! Raw JSON is checked field by field while the typed schema is built, so a
//! schema that loads is known to be well formed. The typed checks at the end
//! cover what the types cannot express.

use crate::{CompositionSchema, IncludedSchema, RelationshipSchema, SchemaError, SchemaResult};
use normstore_types::Object;
use serde_json::Value;

impl CompositionSchema {
    /// Loads and validates a top-level schema from JSON.
    ///
    /// Fields holding `null`, `false`, `0` or `""` count as absent.
    pub fn from_value(value: &Value) -> SchemaResult<Self> {
        let fields = value.as_object().ok_or_else(|| SchemaError::NotAnObject {
            field: "schema".into(),
            value: value.to_string(),
        })?;

        let entity_type = match fields.get("type").filter(|v| is_present(v)) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(SchemaError::NotAString {
                    field: "type".into(),
                    value: other.to_string(),
                });
            }
            None => {
                return Err(SchemaError::MissingType {
                    schema: value.to_string(),
                });
            }
        };

        let relationships = array_field(fields, "relationships")?
            .iter()
            .map(relationship_from_value)
            .collect::<SchemaResult<Vec<_>>>()?;
        let included = array_field(fields, "included")?
            .iter()
            .map(IncludedSchema::from_value)
            .collect::<SchemaResult<Vec<_>>>()?;

        Ok(Self {
            entity_type,
            top_level_meta: string_list(fields, "topLevelMeta")?,
            attributes: string_list(fields, "attributes")?,
            meta: string_list(fields, "meta")?,
            relationships,
            included,
        })
    }
}

impl IncludedSchema {
    /// Loads and validates an included descriptor from JSON.
    pub fn from_value(value: &Value) -> SchemaResult<Self> {
        let fields = value.as_object().ok_or_else(|| SchemaError::NotAnObject {
            field: "included".into(),
            value: value.to_string(),
        })?;

        let key = match fields.get("key").filter(|v| is_present(v)) {
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(SchemaError::InvalidKey {
                    field: "included".into(),
                    value: value.to_string(),
                });
            }
            None => {
                return Err(SchemaError::MissingKey {
                    field: "included".into(),
                    value: value.to_string(),
                });
            }
        };

        let relationships = array_field(fields, "relationships")?
            .iter()
            .map(relationship_from_value)
            .collect::<SchemaResult<Vec<_>>>()?;

        Ok(Self {
            key,
            default_type: default_type(fields),
            attributes: string_list(fields, "attributes")?,
            relationships,
            meta: string_list(fields, "meta")?,
        })
    }
}

/// Checks a typed top-level schema, including every included descriptor.
pub fn validate_schema(schema: &CompositionSchema) -> SchemaResult<()> {
    if schema.entity_type.is_empty() {
        return Err(SchemaError::MissingType {
            schema: format!("{schema:?}"),
        });
    }
    schema.included.iter().try_for_each(validate_included_schema)
}

/// Checks a typed included descriptor. Unlike the top level it needs no
/// `type`, but it must name the field it reads.
pub fn validate_included_schema(schema: &IncludedSchema) -> SchemaResult<()> {
    if schema.key.is_empty() {
        return Err(SchemaError::MissingKey {
            field: "included".into(),
            value: format!("{schema:?}"),
        });
    }
    Ok(())
}

fn relationship_from_value(value: &Value) -> SchemaResult<RelationshipSchema> {
    let fields = value.as_object().ok_or_else(|| SchemaError::NotAnObject {
        field: "relationship".into(),
        value: value.to_string(),
    })?;

    let key = match fields.get("key") {
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(SchemaError::InvalidKey {
                field: "relationship".into(),
                value: value.to_string(),
            });
        }
        None => {
            return Err(SchemaError::MissingKey {
                field: "relationship".into(),
                value: value.to_string(),
            });
        }
    };

    let meta = string_list(fields, "meta").map_err(|_| SchemaError::InvalidRelationshipMeta {
        value: value.to_string(),
    })?;

    Ok(RelationshipSchema {
        key,
        default_type: default_type(fields),
        meta,
    })
}

fn default_type(fields: &Object) -> Option<String> {
    fields
        .get("defaultType")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// The entries of a list field, or nothing when the field is absent.
fn array_field<'a>(fields: &'a Object, field: &str) -> SchemaResult<&'a [Value]> {
    match fields.get(field).filter(|v| is_present(v)) {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(SchemaError::NotAnArray {
            field: field.into(),
        }),
    }
}

fn string_list(fields: &Object, field: &str) -> SchemaResult<Vec<String>> {
    array_field(fields, field)?
        .iter()
        .map(|item| {
            item.as_str()
                .map(String::from)
                .ok_or_else(|| SchemaError::NotAString {
                    field: field.into(),
                    value: item.to_string(),
                })
        })
        .collect()
}

/// Empty lists and objects still count as present; only scalar blanks do not.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
