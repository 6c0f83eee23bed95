//! Collection endpoints
//!
//! - `GET /users/{userId}/collections` - list
//! - `POST /users/{userId}/collections` - create (`{name, description}`)
//! - `DELETE /users/{userId}/collections/{id}` - delete

use ksync_core::domain::{AccountSession, CollectionId, RemoteCollection, RemoteError};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::client::{expect_status, transport_error, HammerheadClient};
use crate::wire::WireId;

// ============================================================================
// Wire types
// ============================================================================

/// A collection as returned by the API
///
/// `id` and `name` are required; any other field is ignored.
#[derive(Debug, Deserialize)]
struct CollectionResponse {
    id: WireId,
    name: String,
}

#[derive(Debug, Serialize)]
struct CreateCollectionRequest<'a> {
    name: &'a str,
    description: &'a str,
}

fn into_collection(raw: CollectionResponse) -> Result<RemoteCollection, RemoteError> {
    let id = CollectionId::new(raw.id.into_string())
        .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;
    Ok(RemoteCollection::new(id, raw.name))
}

// ============================================================================
// Operations
// ============================================================================

/// Lists all collections of the session's user
pub async fn list_collections(
    client: &HammerheadClient,
    session: &AccountSession,
) -> Result<Vec<RemoteCollection>, RemoteError> {
    debug!(user_id = %session.user_id, "Listing collections");

    let response = client
        .user_request(Method::GET, session, "/collections")
        .send()
        .await
        .map_err(transport_error)?;
    let response = expect_status(response, &[StatusCode::OK]).await?;

    let raw: Vec<CollectionResponse> = response.json().await.map_err(transport_error)?;
    let collections = raw
        .into_iter()
        .map(into_collection)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = collections.len(), "Fetched collections");
    Ok(collections)
}

/// Creates a collection and returns it as reported by the server
pub async fn create_collection(
    client: &HammerheadClient,
    session: &AccountSession,
    name: &str,
    description: &str,
) -> Result<RemoteCollection, RemoteError> {
    debug!(collection = name, "Creating collection");

    let response = client
        .user_request(Method::POST, session, "/collections")
        .json(&CreateCollectionRequest { name, description })
        .send()
        .await
        .map_err(transport_error)?;
    let response = expect_status(response, &[StatusCode::OK, StatusCode::CREATED])
        .await
        .map_err(|e| {
            warn!(collection = name, error = %e, "Failed to create collection");
            e
        })?;

    let raw: CollectionResponse = response.json().await.map_err(transport_error)?;
    let created = into_collection(raw)?;

    info!(collection = %created.name, id = %created.id, "Collection created");
    Ok(created)
}

/// Deletes a collection by id
pub async fn delete_collection(
    client: &HammerheadClient,
    session: &AccountSession,
    collection_id: &CollectionId,
) -> Result<(), RemoteError> {
    let path = format!("/collections/{}", collection_id.as_str());

    let response = client
        .user_request(Method::DELETE, session, &path)
        .send()
        .await
        .map_err(transport_error)?;
    expect_status(response, &[StatusCode::OK])
        .await
        .map_err(|e| {
            warn!(id = %collection_id, error = %e, "Failed to delete collection");
            e
        })?;

    info!(id = %collection_id, "Collection deleted");
    Ok(())
}
