//! Namespaced entity cache for normstore.
//!
//! Parsed payloads are folded into a long-lived [`CacheState`] that separates
//! entity data from the views over it:
//! - **Entity maps**: one map per entity type, shared by every namespace and
//!   updated through a per-type [`EntityMapper`]
//! - **Namespaces**: named result sets holding an ordered key list, a fetch
//!   flag and optionally a frozen copy of the entities they received
//!
//! [`NamespaceCache::reduce`] is a pure `(state, action) -> state` function;
//! sequencing concurrent fetches is up to the caller. The [`selectors`]
//! module reads entities back out through a namespace.

mod action;
mod mapper;
mod reducer;
pub mod selectors;
mod state;

pub use action::{CacheAction, ReceiveMeta};
pub use mapper::{EntityMapper, StandardMapper};
pub use reducer::{clear_namespace, request_namespace, NamespaceCache, ReceiveConfig};
pub use state::{CacheState, NamespaceRecord};
