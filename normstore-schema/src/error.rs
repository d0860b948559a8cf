//! Error types for schema loading and validation.

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A structural defect in a composition schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The top-level schema has no usable `type`.
    #[error("schema {schema} missing 'type'")]
    MissingType { schema: String },

    /// A field that must hold a list holds something else.
    #[error("{field} is not an array")]
    NotAnArray { field: String },

    /// A list entry that must be a string is not.
    #[error("{field} {value} is not a valid {field}")]
    NotAString { field: String, value: String },

    /// A descriptor that must be an object is not.
    #[error("{field} {value} is not an object")]
    NotAnObject { field: String, value: String },

    /// A relationship or included descriptor has no `key`.
    #[error("candidate {field} {value} missing key")]
    MissingKey { field: String, value: String },

    /// A relationship or included descriptor has a `key` of the wrong kind.
    #[error("candidate {field} {value} has invalid key")]
    InvalidKey { field: String, value: String },

    /// A relationship descriptor's `meta` is not a list of strings.
    #[error("candidate relationship {value} has invalid 'meta'")]
    InvalidRelationshipMeta { value: String },
}
