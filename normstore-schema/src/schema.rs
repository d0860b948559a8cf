use serde::{Deserialize, Serialize};

/// Declares how a flat entity of one type is composed into a document.
///
/// Every list names fields of the flat entity. Names that the entity does not
/// carry are skipped at composition time, so a schema may list more than any
/// single entity has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionSchema {
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Fields copied into the document's top-level `meta`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_level_meta: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    /// Fields copied into the primary resource's `meta`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<RelationshipSchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<IncludedSchema>,
}

impl CompositionSchema {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            ..Self::default()
        }
    }

    pub fn with_top_level_meta<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.top_level_meta = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_attributes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_meta<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meta = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_relationship(mut self, relationship: RelationshipSchema) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn with_included(mut self, included: IncludedSchema) -> Self {
        self.included.push(included);
        self
    }
}

/// Declares one relationship field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipSchema {
    pub key: String,
    /// Type given to references that do not carry their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_type: Option<String>,
    /// Relationship-level meta members to copy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta: Vec<String>,
}

impl RelationshipSchema {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_default_type(mut self, default_type: impl Into<String>) -> Self {
        self.default_type = Some(default_type.into());
        self
    }

    pub fn with_meta<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meta = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// Declares a field whose related entities are side-loaded into `included`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludedSchema {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<RelationshipSchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta: Vec<String>,
}

impl IncludedSchema {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_default_type(mut self, default_type: impl Into<String>) -> Self {
        self.default_type = Some(default_type.into());
        self
    }

    pub fn with_attributes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_meta<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meta = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_relationship(mut self, relationship: RelationshipSchema) -> Self {
        self.relationships.push(relationship);
        self
    }
}
