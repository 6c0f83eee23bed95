//! Integration tests for the password-grant credential exchange

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use ksync_core::config::UserCredentials;
use ksync_core::domain::RemoteError;
use ksync_core::ports::IAuthenticator;

use crate::common;

#[tokio::test]
async fn test_authenticate_posts_form_and_reads_subject() {
    let (server, client) = common::setup_mock().await;

    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=rider%40example.com"))
        .and(body_string_contains("password=s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": common::jwt(serde_json::json!({"sub": common::TEST_USER_ID})),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = client
        .authenticate(&UserCredentials::new("rider@example.com", "s3cret"))
        .await
        .expect("authenticate failed");

    assert_eq!(session.username, "rider@example.com");
    assert_eq!(session.user_id.as_str(), common::TEST_USER_ID);
    assert!(!session.access_token.is_empty());
}

#[tokio::test]
async fn test_authenticate_numeric_subject() {
    let (server, client) = common::setup_mock().await;

    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": common::jwt(serde_json::json!({"sub": 98765})),
        })))
        .mount(&server)
        .await;

    let session = client
        .authenticate(&UserCredentials::new("rider", "pw"))
        .await
        .unwrap();
    assert_eq!(session.user_id.as_str(), "98765");
}

#[tokio::test]
async fn test_authenticate_rejected_credentials() {
    let (server, client) = common::setup_mock().await;

    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_grant"))
        .mount(&server)
        .await;

    let err = client
        .authenticate(&UserCredentials::new("rider", "wrong"))
        .await
        .unwrap_err();
    assert!(err.is_auth(), "expected auth error, got {err:?}");
}

#[tokio::test]
async fn test_authenticate_bad_request_is_auth_error() {
    let (server, client) = common::setup_mock().await;

    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("unsupported_grant_type"))
        .mount(&server)
        .await;

    let err = client
        .authenticate(&UserCredentials::new("rider", "pw"))
        .await
        .unwrap_err();
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_authenticate_missing_access_token() {
    let (server, client) = common::setup_mock().await;

    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;

    let err = client
        .authenticate(&UserCredentials::new("rider", "pw"))
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::Auth(_)));
}

#[tokio::test]
async fn test_authenticate_server_error_is_transport() {
    let (server, client) = common::setup_mock().await;

    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client
        .authenticate(&UserCredentials::new("rider", "pw"))
        .await
        .unwrap_err();
    assert!(err.is_transport());
}
