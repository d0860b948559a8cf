//! Merging of normalized stores.
//!
//! Two stores are combined with a fixed precedence: the *primary* side wins
//! every entity collision, and key lists are unioned with the primary side's
//! keys first. The merge satisfies:
//! - **Self-idempotence**: `merged(S, S) == S` for any store whose key lists
//!   are already free of repeats
//! - **Precedence**: an entity present on the primary side is always the one
//!   kept, whatever the secondary side holds
//! - **Convergence**: folding a sequence of pages with the newest page as the
//!   primary side yields the union of every page's entities, each at its
//!   newest version
//!
//! The parser uses this to combine a document's primary resources with its
//! side-loaded ones, and the cache uses it to fold received entities into its
//! type maps.

use normstore_types::value::dedupe;
use normstore_types::{EntityMap, NormalizedDocument, StoreSlice};
use std::collections::{BTreeMap, BTreeSet};

/// Combines two values of the same kind, `self` taking precedence.
pub trait Merge {
    /// Returns the merge of `self` (primary) with `secondary`.
    #[must_use]
    fn merged(&self, secondary: &Self) -> Self;
}

impl Merge for StoreSlice {
    fn merged(&self, secondary: &Self) -> Self {
        merge_slices(self, Some(secondary))
    }
}

impl Merge for NormalizedDocument {
    fn merged(&self, secondary: &Self) -> Self {
        merge_stores(self, secondary)
    }
}

/// Merges two normalized stores, `primary` winning collisions.
///
/// Types present on both sides are merged slice by slice; types present on
/// one side only pass through. Top-level `jsonapi`, `links` and `meta` are
/// taken from the primary side when it has them.
pub fn merge_stores(
    primary: &NormalizedDocument,
    secondary: &NormalizedDocument,
) -> NormalizedDocument {
    let handled: BTreeSet<&String> = primary.slices.keys().collect();
    let remaining: Vec<&String> = secondary
        .slices
        .keys()
        .filter(|ty| !handled.contains(ty))
        .collect();

    let mut slices = BTreeMap::new();
    for (ty, slice) in &primary.slices {
        slices.insert(ty.clone(), merge_slices(slice, secondary.slices.get(ty)));
    }
    for ty in remaining {
        if let Some(slice) = secondary.slices.get(ty) {
            slices.insert(ty.clone(), slice.clone());
        }
    }

    let primary_entities = match (&primary.primary_entities, &secondary.primary_entities) {
        (None, None) => None,
        (p, s) => Some(union_keys(
            p.as_deref().unwrap_or_default(),
            s.as_deref().unwrap_or_default(),
        )),
    };

    NormalizedDocument {
        jsonapi: primary.jsonapi.clone().or_else(|| secondary.jsonapi.clone()),
        links: primary.links.clone().or_else(|| secondary.links.clone()),
        meta: primary.meta.clone().or_else(|| secondary.meta.clone()),
        primary_entities,
        slices,
    }
}

/// Merges one type's slices.
///
/// The result's `data` holds every entity from both sides, the primary copy
/// kept on collision. Its `keys` are the primary keys followed by the
/// secondary keys, repeats dropped, and absent when that list is empty.
pub fn merge_slices(primary: &StoreSlice, secondary: Option<&StoreSlice>) -> StoreSlice {
    let (data, keys) = match secondary {
        Some(secondary) => (
            merge_entity_maps(&secondary.data, &primary.data),
            union_keys(primary.keys(), secondary.keys()),
        ),
        None => (primary.data.clone(), union_keys(primary.keys(), &[])),
    };

    StoreSlice {
        data,
        keys: (!keys.is_empty()).then_some(keys),
    }
}

/// Shallow merge of two entity maps; entries of `incoming` replace those of
/// `base` under the same key.
pub fn merge_entity_maps(base: &EntityMap, incoming: &EntityMap) -> EntityMap {
    let mut out = base.clone();
    out.extend(incoming.iter().map(|(k, v)| (k.clone(), v.clone())));
    out
}

/// Ordered union of two key lists: first-occurrence order, no repeats.
pub fn union_keys(first: &[String], second: &[String]) -> Vec<String> {
    dedupe(first.iter().chain(second).cloned())
}
