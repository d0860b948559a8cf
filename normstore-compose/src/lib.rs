//! Request composition for normstore.
//!
//! The reverse of parsing: a flat entity, with its relationship and
//! side-loaded fields nested as `{data, meta}` objects, is filtered through a
//! [`CompositionSchema`](normstore_schema::CompositionSchema) and inflated
//! into a compliant document. Only fields the schema names are sent; fields it
//! names that the entity lacks are skipped.
//!
//! Composition is all-or-nothing: a missing `id`, a type mismatch or a
//! schema defect aborts the whole request.

mod compose;
mod error;
mod relationship;

pub use compose::{build_included, compose_request, ComposeOptions};
pub use error::{ComposeError, ComposeResult};
pub use relationship::build_relationship;
