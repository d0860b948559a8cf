//! Response parsing for normstore.
//!
//! Turns a nested response document into a flat, type-keyed store:
//! - [`Parser`]: flattens primary and side-loaded resources and merges them
//! - [`Identifier`]: the strategy that computes each entity's store key
//! - [`ParseOutcome`]: a normalized store, a passed-through error list, or
//!   nothing for documents with no payload
//!
//! Parsing never fails. Documents without a payload degrade to
//! [`ParseOutcome::Empty`] and resources that cannot be read are skipped.

mod identify;
mod outcome;
mod parser;

pub use identify::{ById, ByMetaRevision, Identifier};
pub use outcome::ParseOutcome;
pub use parser::{parse_response, Parser};
