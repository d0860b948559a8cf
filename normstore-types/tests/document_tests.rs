use normstore_types::{
    Document, ErrorObject, PrimaryData, Relationship, RelationshipData, Resource, ResourceRef,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn article_json() -> serde_json::Value {
    json!({
        "jsonapi": {"version": "1.0"},
        "links": {"self": "resource-linkage"},
        "meta": {"revisionNumber": 0},
        "data": [{
            "type": "articles",
            "id": "1",
            "attributes": {"title": "JSON API paints my bikeshed!"},
            "links": {"self": "http://example.com/articles/1"},
            "relationships": {
                "author": {
                    "links": {"related": "http://example.com/articles/1/author"},
                    "data": {"type": "people", "id": "9"}
                },
                "comments": {
                    "data": [
                        {"type": "comments", "id": "5"},
                        {"type": "comments", "id": "12"}
                    ]
                }
            }
        }],
        "included": [{
            "type": "people",
            "id": "9",
            "attributes": {"first-name": "Dan"}
        }]
    })
}

// ── Deserialization ─────────────────────────────────────────────

#[test]
fn reads_array_data() {
    let doc = Document::from_value(article_json()).unwrap();
    assert!(matches!(doc.data, Some(PrimaryData::Many(_))));
    assert_eq!(doc.primary().len(), 1);
    assert_eq!(doc.primary()[0].id, "1");
    assert_eq!(doc.primary()[0].resource_type, "articles");
    assert_eq!(doc.included().len(), 1);
}

#[test]
fn reads_single_object_data() {
    let doc = Document::from_value(json!({
        "data": {"type": "articles", "id": "7"}
    }))
    .unwrap();
    assert!(doc.data.as_ref().unwrap().is_single());
    assert_eq!(doc.primary(), &[Resource::new("7", "articles")]);
}

#[test]
fn missing_data_gives_empty_primary() {
    let doc = Document::from_value(json!({"meta": {"count": 0}})).unwrap();
    assert!(doc.primary().is_empty());
    assert!(doc.included().is_empty());
}

#[test]
fn relationship_linkage_shapes() {
    let doc = Document::from_value(article_json()).unwrap();
    let rels = doc.primary()[0].relationships.as_ref().unwrap();

    match rels["author"].data.as_ref().unwrap() {
        RelationshipData::One(r) => assert_eq!(r, &ResourceRef::new("9", "people")),
        other => panic!("expected to-one linkage, got {other:?}"),
    }
    assert_eq!(rels["comments"].data.as_ref().unwrap().refs().len(), 2);
}

#[test]
fn null_relationship_data_is_absent() {
    let doc = Document::from_value(json!({
        "data": {
            "type": "articles",
            "id": "1",
            "relationships": {"editor": {"data": null, "links": {"self": "x"}}}
        }
    }))
    .unwrap();
    let editor = &doc.primary()[0].relationships.as_ref().unwrap()["editor"];
    assert!(editor.data.is_none());
    assert_eq!(editor.to_value(), json!({"links": {"self": "x"}}));
}

#[test]
fn error_objects_keep_unknown_members() {
    let raw = json!({
        "errors": [{
            "id": "entityIsATeapot",
            "status": 418,
            "detail": "I'm a teapot, and that's not water",
            "meta": {"brewing": true}
        }]
    });
    let doc = Document::from_value(raw.clone()).unwrap();
    let errors: &Vec<ErrorObject> = doc.errors.as_ref().unwrap();
    assert_eq!(errors[0].id.as_deref(), Some("entityIsATeapot"));
    assert_eq!(errors[0].status, Some(json!(418)));
    assert_eq!(errors[0].extra["meta"], json!({"brewing": true}));
    assert_eq!(serde_json::to_value(&doc).unwrap(), raw);
}

#[test]
fn error_code_may_be_a_number() {
    let raw = json!({"errors": [{"code": 1042, "title": "bad", "links": {"about": "/docs"}}]});
    let doc = Document::from_value(raw.clone()).unwrap();
    let errors = doc.errors.as_ref().unwrap();
    assert_eq!(errors[0].code, Some(json!(1042)));
    assert_eq!(errors[0].to_value(), raw["errors"][0]);
}

#[test]
fn numeric_ids_read_as_strings() {
    let resource: Resource = serde_json::from_value(json!({
        "id": 42,
        "type": "articles",
        "relationships": {"author": {"data": {"id": 9, "type": "people"}}}
    }))
    .unwrap();
    assert_eq!(resource.id, "42");
    let author = &resource.relationships.as_ref().unwrap()["author"];
    assert_eq!(author.data.as_ref().unwrap().refs(), &[ResourceRef::new("9", "people")]);
}

#[test]
fn structured_ids_are_rejected() {
    let err = serde_json::from_value::<Resource>(json!({"id": {"n": 1}, "type": "articles"}))
        .unwrap_err();
    assert!(err.to_string().contains("id must be a string or a number"));
    assert!(serde_json::from_value::<Resource>(json!({"type": "articles"})).is_err());
}

#[test]
fn relationship_keeps_reference_meta_and_unknown_members() {
    let raw = json!({
        "data": {"id": "9", "type": "people", "meta": {"role": "editor"}},
        "links": {"self": "/articles/1/relationships/author"},
        "x-source": "import"
    });
    let relationship: Relationship = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(relationship.extra["x-source"], json!("import"));
    assert!(!relationship.is_empty());
    assert_eq!(relationship.to_value(), raw);
    assert_eq!(serde_json::to_value(&relationship).unwrap(), raw);
}

// ── Serialization ───────────────────────────────────────────────

#[test]
fn absent_members_are_not_serialized() {
    let doc = Document {
        data: Some(PrimaryData::One(Box::new(Resource::new("1", "articles")))),
        ..Document::default()
    };
    assert_eq!(
        serde_json::to_value(&doc).unwrap(),
        json!({"data": {"id": "1", "type": "articles"}})
    );
}

#[test]
fn resource_meta_lookup() {
    let resource: Resource = serde_json::from_value(json!({
        "id": "1",
        "type": "articles",
        "meta": {"revisionNumber": 3}
    }))
    .unwrap();
    assert_eq!(resource.meta_value("revisionNumber"), Some(&json!(3)));
    assert_eq!(resource.meta_value("missing"), None);
}

#[test]
fn rejects_non_document_shapes() {
    assert!(Document::from_value(json!({"data": "nope"})).is_err());
    assert!(Document::from_value(json!([1, 2, 3])).is_err());
}
