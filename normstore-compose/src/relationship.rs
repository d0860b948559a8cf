use crate::{ComposeError, ComposeResult};
use normstore_schema::RelationshipSchema;
use normstore_types::value::{as_identifier, pick};
use normstore_types::{Object, Relationship, RelationshipData, ResourceRef};
use serde_json::Value;

/// Builds a relationship object from a flat entity's relationship field.
///
/// `input` is expected to look like `{data, meta}`. Only the meta members the
/// schema names are copied, and a missing `meta` is fine when none are named.
/// `data` becomes a to-many list for arrays and a to-one reference for a
/// non-empty object; anything else, including an empty list, leaves `data`
/// out.
pub fn build_relationship(
    input: &Value,
    schema: &RelationshipSchema,
) -> ComposeResult<Relationship> {
    let meta = match input.get("meta").and_then(Value::as_object) {
        Some(meta) => pick(meta, &schema.meta),
        None => Object::new(),
    };

    let data = match input.get("data") {
        Some(Value::Array(items)) if !items.is_empty() => Some(RelationshipData::Many(
            items
                .iter()
                .map(|item| reference(item, schema))
                .collect::<ComposeResult<Vec<_>>>()?,
        )),
        Some(item @ Value::Object(fields)) if !fields.is_empty() => {
            Some(RelationshipData::One(reference(item, schema)?))
        }
        _ => None,
    };

    Ok(Relationship {
        data,
        meta: (!meta.is_empty()).then_some(meta),
        ..Relationship::default()
    })
}

/// A reference's type falls back to the schema's default type, then to "".
fn reference(item: &Value, schema: &RelationshipSchema) -> ComposeResult<ResourceRef> {
    let id = item
        .get("id")
        .and_then(as_identifier)
        .ok_or_else(|| ComposeError::MissingId {
            context: format!("relationship `{}`", schema.key),
        })?;

    let resource_type = item
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .or_else(|| schema.default_type.clone())
        .unwrap_or_default();

    Ok(ResourceRef::new(id, resource_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reference_prefers_own_type() {
        let schema = RelationshipSchema::new("author").with_default_type("people");
        let r = reference(&json!({"id": "9", "type": "admins"}), &schema).unwrap();
        assert_eq!(r, ResourceRef::new("9", "admins"));
    }

    #[test]
    fn reference_without_any_type_is_empty_string() {
        let r = reference(&json!({"id": 9}), &RelationshipSchema::new("author")).unwrap();
        assert_eq!(r, ResourceRef::new("9", ""));
    }
}
