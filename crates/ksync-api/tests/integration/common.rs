//! Shared test helpers for dashboard API integration tests
//!
//! Provides wiremock-based mock server setup and a few builders for tokens
//! and sessions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ksync_api::HammerheadClient;
use ksync_core::domain::{AccountSession, UserId};
use ksync_core::ports::IPacer;

/// User id carried by the tokens issued in these tests
pub const TEST_USER_ID: &str = "user-test-001";

/// Builds an unsigned JWT with the given claims
pub fn jwt(claims: serde_json::Value) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}

/// Session for [`TEST_USER_ID`] with a fixed bearer token
pub fn test_session() -> AccountSession {
    AccountSession::new(
        "rider@example.com",
        "test-access-token",
        UserId::new(TEST_USER_ID).unwrap(),
    )
}

/// Starts a mock server and returns a client pointing at it
pub async fn setup_mock() -> (MockServer, HammerheadClient) {
    let server = MockServer::start().await;
    let client = HammerheadClient::with_base_url(server.uri());
    (server, client)
}

/// Mounts a token endpoint that issues a JWT for [`TEST_USER_ID`]
#[allow(dead_code)]
pub async fn mount_token_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": jwt(serde_json::json!({"sub": TEST_USER_ID})),
            "token_type": "bearer",
            "expires_in": 3600
        })))
        .mount(server)
        .await;
}

/// Path below the user prefix of [`TEST_USER_ID`]
pub fn user_path(suffix: &str) -> String {
    format!("/users/{TEST_USER_ID}{suffix}")
}

/// Pacer that only counts how often it was awaited
#[derive(Debug, Default)]
pub struct CountingPacer {
    pauses: AtomicUsize,
}

impl CountingPacer {
    pub fn count(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IPacer for CountingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

/// Starts a mock server and returns a client with a counting pacer attached
#[allow(dead_code)]
pub async fn setup_paced_mock() -> (MockServer, HammerheadClient, Arc<CountingPacer>) {
    let server = MockServer::start().await;
    let pacer = Arc::new(CountingPacer::default());
    let client = HammerheadClient::with_base_url(server.uri()).with_pacer(pacer.clone());
    (server, client, pacer)
}
