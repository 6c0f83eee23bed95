//! Integration tests for the collection endpoints

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use ksync_core::domain::{CollectionId, RemoteError};
use ksync_core::ports::IRouteStore;

use crate::common;

#[tokio::test]
async fn test_list_collections() {
    let (server, client) = common::setup_mock().await;

    Mock::given(method("GET"))
        .and(path(common::user_path("/collections")))
        .and(header("authorization", "Bearer test-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "c-1", "name": "Alps", "routes": 4},
            {"id": 2, "name": "Dolomites"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let collections = client
        .list_collections(&common::test_session())
        .await
        .expect("list_collections failed");

    assert_eq!(collections.len(), 2);
    assert_eq!(collections[0].id.as_str(), "c-1");
    assert_eq!(collections[0].name, "Alps");
    assert_eq!(collections[1].id.as_str(), "2");
    assert_eq!(collections[1].name, "Dolomites");
}

#[tokio::test]
async fn test_list_collections_empty() {
    let (server, client) = common::setup_mock().await;

    Mock::given(method("GET"))
        .and(path(common::user_path("/collections")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let collections = client
        .list_collections(&common::test_session())
        .await
        .unwrap();
    assert!(collections.is_empty());
}

#[tokio::test]
async fn test_list_collections_schema_violation() {
    let (server, client) = common::setup_mock().await;

    Mock::given(method("GET"))
        .and(path(common::user_path("/collections")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "collections": []
        })))
        .mount(&server)
        .await;

    let err = client
        .list_collections(&common::test_session())
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_list_collections_expired_token() {
    let (server, client) = common::setup_mock().await;

    Mock::given(method("GET"))
        .and(path(common::user_path("/collections")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client
        .list_collections(&common::test_session())
        .await
        .unwrap_err();
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_create_collection_sends_name_and_description() {
    let (server, client, pacer) = common::setup_paced_mock().await;

    Mock::given(method("POST"))
        .and(path(common::user_path("/collections")))
        .and(body_json(serde_json::json!({"name": "Dolomites", "description": ""})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "c-9",
            "name": "Dolomites"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_collection(&common::test_session(), "Dolomites", "")
        .await
        .expect("create_collection failed");

    assert_eq!(created.id.as_str(), "c-9");
    assert_eq!(created.name, "Dolomites");
    assert_eq!(pacer.count(), 1);
}

#[tokio::test]
async fn test_create_collection_rejected_still_paces() {
    let (server, client, pacer) = common::setup_paced_mock().await;

    Mock::given(method("POST"))
        .and(path(common::user_path("/collections")))
        .respond_with(ResponseTemplate::new(422).set_body_string("name too long"))
        .mount(&server)
        .await;

    let err = client
        .create_collection(&common::test_session(), "x", "")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RemoteError::Rejected {
            status: 422,
            message: "name too long".to_string()
        }
    );
    assert_eq!(pacer.count(), 1);
}

#[tokio::test]
async fn test_delete_collection() {
    let (server, client, pacer) = common::setup_paced_mock().await;

    Mock::given(method("DELETE"))
        .and(path(common::user_path("/collections/c-1")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .delete_collection(&common::test_session(), &CollectionId::new("c-1").unwrap())
        .await
        .expect("delete_collection failed");
    assert_eq!(pacer.count(), 1);
}

#[tokio::test]
async fn test_delete_collection_not_found() {
    let (server, client) = common::setup_mock().await;

    Mock::given(method("DELETE"))
        .and(path(common::user_path("/collections/missing")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client
        .delete_collection(
            &common::test_session(),
            &CollectionId::new("missing").unwrap(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::Rejected { status: 404, .. }));
}
