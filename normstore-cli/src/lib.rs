//! Commands behind the `normstore` binary.
//!
//! Each command takes already-read JSON and returns JSON, so the binary only
//! does I/O and argument handling.

use anyhow::{bail, Context, Result};
use normstore_compose::{compose_request, ComposeOptions};
use normstore_merge::merge_stores;
use normstore_parse::{ByMetaRevision, Parser};
use normstore_schema::CompositionSchema;
use normstore_types::{FlatEntity, NormalizedDocument};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Reads a JSON value from a file, or from stdin when no path is given.
pub fn read_json(path: Option<&Path>) -> Result<Value> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };
    serde_json::from_str(&text).with_context(|| match path {
        Some(path) => format!("{} is not valid JSON", path.display()),
        None => "stdin is not valid JSON".to_string(),
    })
}

/// Normalizes a response document. With `revision_key`, entities are keyed by
/// `<id>:<meta[revision_key]>` instead of their bare id.
pub fn parse_document(document: &Value, revision_key: Option<&str>) -> Result<Value> {
    let outcome = match revision_key {
        Some(key) => Parser::with_identifier(ByMetaRevision::new(key)).parse_value(document),
        None => Parser::new().parse_value(document),
    };

    match outcome.as_normalized() {
        Some(store) => info!(
            entities = store.entity_count(),
            types = store.slices.len(),
            "Parsed document"
        ),
        None if outcome.is_empty() => info!("Document carries nothing to normalize"),
        None => info!("Document carries errors"),
    }

    serde_json::to_value(&outcome).context("Failed to serialize normalized store")
}

/// Composes a request document for a flat entity.
pub fn compose_document(entity: &Value, schema: &Value, single: bool) -> Result<Value> {
    let schema = CompositionSchema::from_value(schema).context("Invalid composition schema")?;
    if !entity.is_object() {
        bail!("Entity must be a JSON object");
    }
    let entity: FlatEntity =
        serde_json::from_value(entity.clone()).context("Failed to read entity")?;

    let document = compose_request(&entity, &schema, ComposeOptions { single })?;
    info!(entity_type = %schema.entity_type, "Composed request");

    serde_json::to_value(&document).context("Failed to serialize request document")
}

/// Merges two normalized stores, `primary` winning collisions.
pub fn merge_documents(primary: &Value, secondary: &Value) -> Result<Value> {
    let primary = NormalizedDocument::from_value(primary.clone())
        .context("Primary store is not a normalized store")?;
    let secondary = NormalizedDocument::from_value(secondary.clone())
        .context("Secondary store is not a normalized store")?;

    let merged = merge_stores(&primary, &secondary);
    debug!(
        primary = primary.entity_count(),
        secondary = secondary.entity_count(),
        merged = merged.entity_count(),
        "Merged stores"
    );

    serde_json::to_value(&merged).context("Failed to serialize merged store")
}

pub fn render(value: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}
