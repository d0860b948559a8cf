use normstore_types::NormalizedDocument;
use serde::{Deserialize, Serialize};

/// Options that travel with a received payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReceiveMeta {
    /// Namespace the payload belongs to. Without one, only the entity maps
    /// are updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Keep a namespace-local copy of the received primary entities.
    pub preserve_entities: bool,
    /// Append the received keys to the namespace's existing keys instead of
    /// replacing them.
    pub append_keys: bool,
}

impl ReceiveMeta {
    pub fn for_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..Self::default()
        }
    }

    pub fn with_preserved_entities(mut self) -> Self {
        self.preserve_entities = true;
        self
    }

    pub fn with_appended_keys(mut self) -> Self {
        self.append_keys = true;
        self
    }

    /// The namespace, treating an empty name as none.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }
}

/// A signal the cache reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheAction {
    /// A fetch for the namespace has started.
    Request { namespace: Option<String> },
    /// A parsed payload has arrived.
    Receive {
        payload: NormalizedDocument,
        meta: ReceiveMeta,
    },
    /// The namespace should be forgotten.
    Clear { namespace: String },
}

impl CacheAction {
    pub fn request(namespace: impl Into<String>) -> Self {
        Self::Request {
            namespace: Some(namespace.into()),
        }
    }

    pub fn receive(payload: NormalizedDocument, meta: ReceiveMeta) -> Self {
        Self::Receive { payload, meta }
    }

    pub fn clear(namespace: impl Into<String>) -> Self {
        Self::Clear {
            namespace: namespace.into(),
        }
    }
}
