//! Remote collection and route entities
//!
//! Both are owned by the remote service. The engine only reads, creates and
//! deletes references to them; identities are never mutated locally.

use serde::{Deserialize, Serialize};

use super::newtypes::{CollectionId, RouteId};

/// A named remote grouping of routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCollection {
    /// Opaque identifier assigned by the remote store
    pub id: CollectionId,
    /// Display name; not guaranteed unique by the store
    pub name: String,
}

impl RemoteCollection {
    pub fn new(id: CollectionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Case-insensitive name comparison used for folder matching
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// A single route stored inside a remote collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRoute {
    pub id: RouteId,
    /// Collection the route was listed under
    pub collection_id: CollectionId,
}

/// Finds a collection by exact name, first in listing order.
pub fn find_by_exact_name<'a>(
    collections: &'a [RemoteCollection],
    name: &str,
) -> Option<&'a RemoteCollection> {
    collections.iter().find(|c| c.name == name)
}
