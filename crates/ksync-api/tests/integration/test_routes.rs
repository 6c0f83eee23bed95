//! Integration tests for route listing, deletion and file import

use std::io::Write;

use wiremock::matchers::{body_string_contains, header_exists, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use ksync_core::domain::{CollectionId, RemoteError, RouteId};
use ksync_core::ports::IRouteStore;

use crate::common;

#[tokio::test]
async fn test_list_routes_filters_by_collection() {
    let (server, client) = common::setup_mock().await;

    Mock::given(method("GET"))
        .and(path(common::user_path("/routes")))
        .and(query_param("per_page", "50"))
        .and(query_param("page", "1"))
        .and(query_param("order_by", "NEWEST"))
        .and(query_param("ascending", "true"))
        .and(query_param("include", "c-1"))
        .and(query_param("exclude", "archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": "r-1"}, {"id": 2}, {"id": "r-3"}],
            "totalItems": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let collection_id = CollectionId::new("c-1").unwrap();
    let routes = client
        .list_routes(&common::test_session(), &collection_id)
        .await
        .expect("list_routes failed");

    let ids: Vec<&str> = routes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r-1", "2", "r-3"]);
    assert!(routes.iter().all(|r| r.collection_id == collection_id));
}

#[tokio::test]
async fn test_list_routes_uses_configured_page_size() {
    let (server, client) = common::setup_mock().await;
    let client = client.with_routes_page_size(10);

    Mock::given(method("GET"))
        .and(path(common::user_path("/routes")))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let routes = client
        .list_routes(&common::test_session(), &CollectionId::new("c-1").unwrap())
        .await
        .unwrap();
    assert!(routes.is_empty());
}

#[tokio::test]
async fn test_delete_route() {
    let (server, client, pacer) = common::setup_paced_mock().await;

    Mock::given(method("DELETE"))
        .and(path(common::user_path("/routes/r-1")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .delete_route(&common::test_session(), &RouteId::new("r-1").unwrap())
        .await
        .expect("delete_route failed");
    assert_eq!(pacer.count(), 1);
}

#[tokio::test]
async fn test_import_route_file_multipart() {
    let (server, client, pacer) = common::setup_paced_mock().await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("Stelvio.gpx");
    let mut file = std::fs::File::create(&file_path).unwrap();
    file.write_all(b"<gpx version=\"1.1\"></gpx>").unwrap();

    Mock::given(method("POST"))
        .and(path(common::user_path("/routes/import/file")))
        .and(query_param("collectionId", "c-1"))
        .and(header_exists("content-type"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"Stelvio.gpx\""))
        .and(body_string_contains("application/gpx+xml"))
        .and(body_string_contains("<gpx version=\"1.1\"></gpx>"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client
        .import_route_file(
            &common::test_session(),
            &CollectionId::new("c-1").unwrap(),
            &file_path,
        )
        .await
        .expect("import_route_file failed");
    assert_eq!(pacer.count(), 1);
}

#[tokio::test]
async fn test_import_route_file_requires_created_status() {
    let (server, client) = common::setup_mock().await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("a.gpx");
    std::fs::write(&file_path, "<gpx/>").unwrap();

    Mock::given(method("POST"))
        .and(path(common::user_path("/routes/import/file")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client
        .import_route_file(
            &common::test_session(),
            &CollectionId::new("c-1").unwrap(),
            &file_path,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::Rejected { status: 200, .. }));
}

#[tokio::test]
async fn test_import_missing_file_does_not_hit_server() {
    let (server, client, pacer) = common::setup_paced_mock().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .import_route_file(
            &common::test_session(),
            &CollectionId::new("c-1").unwrap(),
            std::path::Path::new("/nonexistent/route.gpx"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::LocalFile { .. }));
    assert_eq!(pacer.count(), 0);
}
