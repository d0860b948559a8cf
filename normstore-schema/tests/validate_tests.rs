use normstore_schema::{
    validate_included_schema, validate_schema, CompositionSchema, IncludedSchema,
    RelationshipSchema, SchemaError,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn article_schema_json() -> serde_json::Value {
    json!({
        "type": "articles",
        "topLevelMeta": ["requestId"],
        "attributes": ["title", "body"],
        "meta": ["revisionNumber"],
        "relationships": [
            {"key": "author", "defaultType": "people", "meta": ["role"]},
            {"key": "comments"}
        ],
        "included": [
            {
                "key": "author",
                "defaultType": "people",
                "attributes": ["first-name"],
                "relationships": [{"key": "employer"}],
                "meta": ["verified"]
            }
        ]
    })
}

// ── Loading valid schemas ───────────────────────────────────────

#[test]
fn loads_full_schema() {
    let schema = CompositionSchema::from_value(&article_schema_json()).unwrap();
    let expected = CompositionSchema::new("articles")
        .with_top_level_meta(["requestId"])
        .with_attributes(["title", "body"])
        .with_meta(["revisionNumber"])
        .with_relationship(
            RelationshipSchema::new("author")
                .with_default_type("people")
                .with_meta(["role"]),
        )
        .with_relationship(RelationshipSchema::new("comments"))
        .with_included(
            IncludedSchema::new("author")
                .with_default_type("people")
                .with_attributes(["first-name"])
                .with_relationship(RelationshipSchema::new("employer"))
                .with_meta(["verified"]),
        );
    assert_eq!(schema, expected);
    assert_eq!(validate_schema(&schema), Ok(()));
}

#[test]
fn loads_type_only_schema() {
    let schema = CompositionSchema::from_value(&json!({"type": "articles"})).unwrap();
    assert_eq!(schema, CompositionSchema::new("articles"));
}

#[test]
fn scalar_blanks_count_as_absent() {
    let schema = CompositionSchema::from_value(&json!({
        "type": "articles",
        "attributes": null,
        "meta": false,
        "relationships": 0
    }))
    .unwrap();
    assert!(schema.attributes.is_empty());
    assert!(schema.meta.is_empty());
    assert!(schema.relationships.is_empty());
}

#[test]
fn serde_and_validated_loading_agree() {
    let via_serde: CompositionSchema = serde_json::from_value(article_schema_json()).unwrap();
    let validated = CompositionSchema::from_value(&article_schema_json()).unwrap();
    assert_eq!(via_serde, validated);
}

// ── Top-level defects ───────────────────────────────────────────

#[test]
fn rejects_missing_type() {
    let err = CompositionSchema::from_value(&json!({"attributes": ["title"]})).unwrap_err();
    assert!(matches!(err, SchemaError::MissingType { .. }));
}

#[test]
fn rejects_non_string_type() {
    let err = CompositionSchema::from_value(&json!({"type": 7})).unwrap_err();
    assert!(matches!(err, SchemaError::NotAString { ref field, .. } if field == "type"));
}

#[test]
fn rejects_non_object_schema() {
    let err = CompositionSchema::from_value(&json!(["articles"])).unwrap_err();
    assert!(matches!(err, SchemaError::NotAnObject { .. }));
}

#[test]
fn rejects_non_array_lists() {
    for field in ["topLevelMeta", "attributes", "meta", "relationships", "included"] {
        let err = CompositionSchema::from_value(&json!({"type": "articles", field: "title"}))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::NotAnArray {
                field: field.to_string()
            }
        );
    }
}

#[test]
fn rejects_empty_object_where_list_expected() {
    let err =
        CompositionSchema::from_value(&json!({"type": "articles", "attributes": {}})).unwrap_err();
    assert_eq!(
        err,
        SchemaError::NotAnArray {
            field: "attributes".into()
        }
    );
}

#[test]
fn rejects_non_string_list_entries() {
    for field in ["topLevelMeta", "attributes", "meta"] {
        let err = CompositionSchema::from_value(&json!({"type": "articles", field: ["ok", 3]}))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::NotAString {
                field: field.to_string(),
                value: "3".into()
            }
        );
    }
}

// ── Relationship descriptors ────────────────────────────────────

#[test]
fn rejects_non_object_relationship() {
    let err = CompositionSchema::from_value(&json!({
        "type": "articles",
        "relationships": ["author"]
    }))
    .unwrap_err();
    assert!(matches!(err, SchemaError::NotAnObject { ref field, .. } if field == "relationship"));
}

#[test]
fn rejects_relationship_without_key() {
    let err = CompositionSchema::from_value(&json!({
        "type": "articles",
        "relationships": [{"defaultType": "people"}]
    }))
    .unwrap_err();
    assert!(matches!(err, SchemaError::MissingKey { .. }));
}

#[test]
fn rejects_relationship_with_non_string_key() {
    let err = CompositionSchema::from_value(&json!({
        "type": "articles",
        "relationships": [{"key": 5}]
    }))
    .unwrap_err();
    assert!(matches!(err, SchemaError::InvalidKey { .. }));
}

#[test]
fn rejects_bad_relationship_meta() {
    for meta in [json!("role"), json!(["role", 1])] {
        let err = CompositionSchema::from_value(&json!({
            "type": "articles",
            "relationships": [{"key": "author", "meta": meta}]
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidRelationshipMeta { .. }));
    }
}

// ── Included descriptors ────────────────────────────────────────

#[test]
fn rejects_included_without_key() {
    for included in [json!({"attributes": ["name"]}), json!({"key": ""})] {
        let err = CompositionSchema::from_value(&json!({
            "type": "articles",
            "included": [included]
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::MissingKey { ref field, .. } if field == "included"));
    }
}

#[test]
fn included_does_not_need_type() {
    let included = IncludedSchema::from_value(&json!({"key": "author"})).unwrap();
    assert_eq!(included, IncludedSchema::new("author"));
}

#[test]
fn rejects_included_with_bad_nested_lists() {
    let err = IncludedSchema::from_value(&json!({"key": "author", "attributes": "name"}))
        .unwrap_err();
    assert_eq!(
        err,
        SchemaError::NotAnArray {
            field: "attributes".into()
        }
    );

    let err = IncludedSchema::from_value(&json!({
        "key": "author",
        "relationships": [{"meta": ["x"]}]
    }))
    .unwrap_err();
    assert!(matches!(err, SchemaError::MissingKey { ref field, .. } if field == "relationship"));
}

// ── Typed validation ────────────────────────────────────────────

#[test]
fn typed_schema_needs_type() {
    let err = validate_schema(&CompositionSchema::default()).unwrap_err();
    assert!(matches!(err, SchemaError::MissingType { .. }));
}

#[test]
fn typed_schema_checks_included_keys() {
    let schema = CompositionSchema::new("articles").with_included(IncludedSchema::default());
    assert!(matches!(
        validate_schema(&schema),
        Err(SchemaError::MissingKey { .. })
    ));
    assert!(validate_included_schema(&IncludedSchema::new("author")).is_ok());
}

#[test]
fn error_messages_name_the_field() {
    let err = SchemaError::NotAnArray {
        field: "attributes".into(),
    };
    assert_eq!(err.to_string(), "attributes is not an array");
}
