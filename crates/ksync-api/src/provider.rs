//! IRouteStore implementation for the dashboard API
//!
//! Delegates to the [`collections`] and [`routes`] modules to fulfil the
//! [`IRouteStore`] port contract.
//!
//! ## Design Notes
//!
//! - `HammerheadClient` holds no per-account state, so the trait is
//!   implemented on the client directly and shared behind an `Arc`.
//! - After every state-mutating call (create, delete, import) the attached
//!   pacer is awaited, whether the call succeeded or not. Listings are not
//!   paced.

use std::path::Path;

use ksync_core::domain::{
    AccountSession, CollectionId, RemoteCollection, RemoteError, RemoteRoute, RouteId,
};
use ksync_core::ports::IRouteStore;
use tracing::debug;

use crate::client::HammerheadClient;
use crate::{collections, routes};

#[async_trait::async_trait]
impl IRouteStore for HammerheadClient {
    async fn list_collections(
        &self,
        session: &AccountSession,
    ) -> Result<Vec<RemoteCollection>, RemoteError> {
        collections::list_collections(self, session).await
    }

    async fn create_collection(
        &self,
        session: &AccountSession,
        name: &str,
        description: &str,
    ) -> Result<RemoteCollection, RemoteError> {
        let result = collections::create_collection(self, session, name, description).await;
        self.pace().await;
        result
    }

    async fn delete_collection(
        &self,
        session: &AccountSession,
        collection_id: &CollectionId,
    ) -> Result<(), RemoteError> {
        let result = collections::delete_collection(self, session, collection_id).await;
        self.pace().await;
        result
    }

    async fn list_routes(
        &self,
        session: &AccountSession,
        collection_id: &CollectionId,
    ) -> Result<Vec<RemoteRoute>, RemoteError> {
        routes::list_routes(self, session, collection_id).await
    }

    async fn delete_route(
        &self,
        session: &AccountSession,
        route_id: &RouteId,
    ) -> Result<(), RemoteError> {
        let result = routes::delete_route(self, session, route_id).await;
        self.pace().await;
        result
    }

    /// Uploads a route file
    ///
    /// A file that cannot be read never reaches the network, so no pause
    /// follows it.
    async fn import_route_file(
        &self,
        session: &AccountSession,
        collection_id: &CollectionId,
        file_path: &Path,
    ) -> Result<(), RemoteError> {
        let result = routes::import_route_file(self, session, collection_id, file_path).await;
        if matches!(result, Err(RemoteError::LocalFile { .. })) {
            debug!(file = %file_path.display(), "Skipping pause after unreadable file");
        } else {
            self.pace().await;
        }
        result
    }
}
