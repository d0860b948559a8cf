//! Error types for request composition.

use normstore_schema::SchemaError;
use thiserror::Error;

/// Result type for composition.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Errors that abort a composition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// The schema failed validation.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// An entity or reference that must carry an `id` does not.
    #[error("missing key 'id' on {context}")]
    MissingId { context: String },

    /// The entity's `type` is not the schema's `type`.
    #[error("entity type `{found}` does not match schema type `{expected}`")]
    TypeMismatch { expected: String, found: String },
}
