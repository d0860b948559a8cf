use normstore_types::NormalizedDocument;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// What parsing a document produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// The document had none of `data`, `errors` or `meta`. Serializes as `{}`.
    Empty,
    /// The document carried `errors`. The member is passed through untouched
    /// and everything else is dropped. Serializes as `{"errors": ...}`.
    Errors(Value),
    Normalized(NormalizedDocument),
}

impl ParseOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn errors(&self) -> Option<&Value> {
        match self {
            Self::Errors(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn as_normalized(&self) -> Option<&NormalizedDocument> {
        match self {
            Self::Normalized(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn into_normalized(self) -> Option<NormalizedDocument> {
        match self {
            Self::Normalized(doc) => Some(doc),
            _ => None,
        }
    }
}

impl Serialize for ParseOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_map(Some(0))?.end(),
            Self::Errors(errors) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("errors", errors)?;
                map.end()
            }
            Self::Normalized(doc) => doc.serialize(serializer),
        }
    }
}
