//! Route endpoints
//!
//! - `GET /users/{userId}/routes` - list, filtered to one collection
//! - `DELETE /users/{userId}/routes/{id}` - delete
//! - `POST /users/{userId}/routes/import/file?collectionId={id}` - multipart
//!   upload of one route file into a collection

use std::path::Path;

use ksync_core::domain::{AccountSession, CollectionId, RemoteError, RemoteRoute, RouteId};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::client::{expect_status, transport_error, HammerheadClient};
use crate::wire::WireId;

/// MIME type sent for GPX uploads
const GPX_MIME: &str = "application/gpx+xml";

/// MIME type sent for any other route file
const FALLBACK_MIME: &str = "application/octet-stream";

// ============================================================================
// Wire types
// ============================================================================

/// One page of the route listing
///
/// Only `data` is read; pagination metadata is ignored.
#[derive(Debug, Deserialize)]
struct RoutesPage {
    data: Vec<RouteResponse>,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    id: WireId,
}

/// Builds the query parameters of the route listing for one collection
///
/// `include` carries the bare collection id restricting results to that
/// collection; archived routes are excluded.
fn list_query(collection_id: &CollectionId, page_size: u32) -> Vec<(&'static str, String)> {
    vec![
        ("per_page", page_size.to_string()),
        ("page", "1".to_string()),
        ("search", String::new()),
        ("order_by", "NEWEST".to_string()),
        ("ascending", "true".to_string()),
        ("include", collection_id.as_str().to_string()),
        ("exclude", "archive".to_string()),
    ]
}

/// Picks the MIME type of an upload from the file extension
fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("gpx") => GPX_MIME,
        _ => FALLBACK_MIME,
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Lists the routes of one collection
///
/// A single page of `routes_page_size` entries is requested; routes beyond
/// that page are not returned.
pub async fn list_routes(
    client: &HammerheadClient,
    session: &AccountSession,
    collection_id: &CollectionId,
) -> Result<Vec<RemoteRoute>, RemoteError> {
    debug!(collection_id = %collection_id, "Listing routes");

    let response = client
        .user_request(Method::GET, session, "/routes")
        .query(&list_query(collection_id, client.routes_page_size()))
        .send()
        .await
        .map_err(transport_error)?;
    let response = expect_status(response, &[StatusCode::OK]).await?;

    let page: RoutesPage = response.json().await.map_err(transport_error)?;
    let routes = page
        .data
        .into_iter()
        .map(|raw| {
            RouteId::new(raw.id.into_string())
                .map(|id| RemoteRoute {
                    id,
                    collection_id: collection_id.clone(),
                })
                .map_err(|e| RemoteError::InvalidResponse(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(collection_id = %collection_id, count = routes.len(), "Fetched routes");
    Ok(routes)
}

/// Deletes a single route by id
pub async fn delete_route(
    client: &HammerheadClient,
    session: &AccountSession,
    route_id: &RouteId,
) -> Result<(), RemoteError> {
    let path = format!("/routes/{}", route_id.as_str());

    let response = client
        .user_request(Method::DELETE, session, &path)
        .send()
        .await
        .map_err(transport_error)?;
    expect_status(response, &[StatusCode::OK]).await.map_err(|e| {
        warn!(route_id = %route_id, error = %e, "Failed to delete route");
        e
    })?;

    debug!(route_id = %route_id, "Route deleted");
    Ok(())
}

/// Uploads one route file into a collection
///
/// The file is read fully into memory and sent as the `file` part of a
/// multipart form, named after its base file name.
///
/// # Errors
/// [`RemoteError::LocalFile`] if the file cannot be read; otherwise the
/// classified failure of the upload request.
pub async fn import_route_file(
    client: &HammerheadClient,
    session: &AccountSession,
    collection_id: &CollectionId,
    file: &Path,
) -> Result<(), RemoteError> {
    let data = tokio::fs::read(file)
        .await
        .map_err(|e| RemoteError::LocalFile {
            path: file.display().to_string(),
            message: e.to_string(),
        })?;

    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let size = data.len();

    let part = Part::bytes(data)
        .file_name(file_name.clone())
        .mime_str(mime_for(file))
        .map_err(transport_error)?;
    let form = Form::new().part("file", part);

    debug!(file = %file_name, size, collection_id = %collection_id, "Uploading route file");

    let response = client
        .user_request(Method::POST, session, "/routes/import/file")
        .query(&[("collectionId", collection_id.as_str())])
        .multipart(form)
        .send()
        .await
        .map_err(transport_error)?;
    expect_status(response, &[StatusCode::CREATED])
        .await
        .map_err(|e| {
            warn!(file = %file_name, collection_id = %collection_id, error = %e, "Route upload failed");
            e
        })?;

    info!(file = %file_name, collection_id = %collection_id, "Route uploaded");
    Ok(())
}
