//! Remote route store port (driven/secondary port)
//!
//! This module defines the interface for the collection-based remote route
//! store. The primary implementation targets the Hammerhead dashboard API,
//! but the engine only depends on these traits so tests can substitute an
//! in-memory store.
//!
//! ## Design Notes
//!
//! - Uses [`RemoteError`] rather than `anyhow` because callers branch on the
//!   error class (authentication failures skip an account, everything else
//!   skips only the current item).
//! - Uses `#[async_trait]` for async trait methods.
//! - No method retries. Retry, if any, is a caller policy.

use std::path::Path;

use crate::config::UserCredentials;
use crate::domain::{
    AccountSession, CollectionId, RemoteCollection, RemoteError, RemoteRoute, RouteId,
};

/// Port trait for the username/password credential exchange
#[async_trait::async_trait]
pub trait IAuthenticator: Send + Sync {
    /// Exchanges credentials for a bearer token and user identifier
    ///
    /// # Errors
    /// [`RemoteError::Auth`] when the credentials are rejected or the
    /// response carries no usable token.
    async fn authenticate(
        &self,
        credentials: &UserCredentials,
    ) -> Result<AccountSession, RemoteError>;
}

/// Port trait for remote collection and route operations
///
/// Every call needs a valid [`AccountSession`]. Every call may fail
/// independently.
#[async_trait::async_trait]
pub trait IRouteStore: Send + Sync {
    /// Lists all collections of the account, in the store's listing order
    ///
    /// An account without collections yields an empty vector, not an error.
    async fn list_collections(
        &self,
        session: &AccountSession,
    ) -> Result<Vec<RemoteCollection>, RemoteError>;

    /// Creates a collection
    ///
    /// Not idempotent on the server: calling twice with the same name may
    /// create two collections with the same name.
    async fn create_collection(
        &self,
        session: &AccountSession,
        name: &str,
        description: &str,
    ) -> Result<RemoteCollection, RemoteError>;

    /// Deletes a collection by id
    async fn delete_collection(
        &self,
        session: &AccountSession,
        collection_id: &CollectionId,
    ) -> Result<(), RemoteError>;

    /// Lists the routes of one collection
    ///
    /// Returns a single bounded page; collections larger than the configured
    /// page size are only partially listed.
    async fn list_routes(
        &self,
        session: &AccountSession,
        collection_id: &CollectionId,
    ) -> Result<Vec<RemoteRoute>, RemoteError>;

    /// Deletes a route by id
    async fn delete_route(
        &self,
        session: &AccountSession,
        route_id: &RouteId,
    ) -> Result<(), RemoteError>;

    /// Uploads a local route file into a collection
    async fn import_route_file(
        &self,
        session: &AccountSession,
        collection_id: &CollectionId,
        file_path: &Path,
    ) -> Result<(), RemoteError>;
}
