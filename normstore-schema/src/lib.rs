//! Composition schemas for outbound requests.
//!
//! A [`CompositionSchema`] declares which fields of a flat entity become
//! attributes, meta, relationships and side-loaded resources when the entity
//! is turned back into a document. Schemas usually arrive as JSON; loading one
//! through [`CompositionSchema::from_value`] checks every structural rule and
//! fails on the first defect.

mod error;
mod schema;
mod validate;

pub use error::{SchemaError, SchemaResult};
pub use schema::{CompositionSchema, IncludedSchema, RelationshipSchema};
pub use validate::{validate_included_schema, validate_schema};
