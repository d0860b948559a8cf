//! Core type definitions for normstore.
//!
//! This crate defines the types every other normstore crate speaks:
//! - The hypermedia wire document ([`Document`], [`Resource`], [`Relationship`])
//! - The flat, type-keyed store produced by normalization ([`NormalizedDocument`],
//!   [`StoreSlice`], [`FlatEntity`])
//! - Small structural helpers over JSON objects ([`value`])
//!
//! Nothing in here performs normalization itself; the parser, composer, merge
//! engine and cache reducer live in their own crates.

mod document;
mod store;
pub mod value;

pub use document::{
    Document, ErrorObject, PrimaryData, Relationship, RelationshipData, Resource, ResourceRef,
};
pub use store::{EntityMap, FlatEntity, NormalizedDocument, StoreSlice};

/// A JSON object, as used for `attributes`, `meta`, `links` and flat entities.
pub type Object = serde_json::Map<String, serde_json::Value>;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when reading documents or stores from JSON.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
