//! Hammerhead dashboard API client
//!
//! Provides a typed HTTP client for the versioned dashboard API.
//! Handles bearer headers, endpoint construction, status classification
//! and the optional pause after state-mutating calls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ksync_api::HammerheadClient;
//! use ksync_core::config::UserCredentials;
//! use ksync_core::ports::{IAuthenticator, IRouteStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = HammerheadClient::new();
//! let session = client
//!     .authenticate(&UserCredentials::new("rider@example.com", "secret"))
//!     .await?;
//! for collection in client.list_collections(&session).await? {
//!     println!("{} ({})", collection.name, collection.id);
//! }
//! # Ok(())
//! # }
//! ```

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use ksync_core::config::{ApiConfig, DEFAULT_BASE_URL};
use ksync_core::domain::{AccountSession, RemoteError};
use ksync_core::ports::IPacer;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use tracing::debug;

/// Default number of routes requested per listing
const DEFAULT_ROUTES_PAGE_SIZE: u32 = 50;

/// Longest response body excerpt carried in an error
const MAX_ERROR_BODY_LEN: usize = 200;

// ============================================================================
// HammerheadClient
// ============================================================================

/// HTTP client for the dashboard API
///
/// Wraps `reqwest::Client` with base URL construction and bearer
/// authentication. The client itself holds no credentials; every call takes
/// the [`AccountSession`] it acts for, so one client serves all accounts.
///
/// Optionally holds an [`IPacer`] that is awaited after every
/// state-mutating request (create, delete, import).
pub struct HammerheadClient {
    /// The underlying HTTP client
    client: Client,
    /// Versioned base URL, without trailing slash
    base_url: String,
    /// Page size used when listing routes of a collection
    routes_page_size: u32,
    /// Optional pause strategy between mutating calls
    pacer: Option<Arc<dyn IPacer>>,
}

impl HammerheadClient {
    /// Creates a client for the production API
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (useful for testing)
    ///
    /// # Arguments
    /// * `base_url` - Base URL for API requests; a trailing `/` is removed
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            routes_page_size: DEFAULT_ROUTES_PAGE_SIZE,
            pacer: None,
        }
    }

    /// Creates a client from the `api` section of the configuration
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            routes_page_size: config.routes_page_size,
            pacer: None,
        })
    }

    /// Sets the pacer awaited after every state-mutating request.
    pub fn with_pacer(mut self, pacer: Arc<dyn IPacer>) -> Self {
        self.pacer = Some(pacer);
        self
    }

    /// Overrides the route listing page size.
    pub fn with_routes_page_size(mut self, page_size: u32) -> Self {
        self.routes_page_size = page_size;
        self
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the page size used when listing routes
    pub fn routes_page_size(&self) -> u32 {
        self.routes_page_size
    }

    /// Returns true if a pacer is attached
    pub fn has_pacer(&self) -> bool {
        self.pacer.is_some()
    }

    /// Creates an unauthenticated request builder for a path below the base URL
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    /// Creates a bearer-authenticated request builder for a path below the
    /// `/users/{userId}` prefix of the session's user
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `session` - Account session providing user id and token
    /// * `path` - Path relative to the user prefix (e.g. "/collections")
    pub fn user_request(
        &self,
        method: Method,
        session: &AccountSession,
        path: &str,
    ) -> RequestBuilder {
        let full_path = format!("/users/{}{}", session.user_id.as_str(), path);
        self.request(method, &full_path)
            .bearer_auth(&session.access_token)
    }

    /// Awaits the pacer, if one is attached
    pub(crate) async fn pace(&self) {
        if let Some(ref pacer) = self.pacer {
            pacer.pause().await;
        }
    }
}

impl Default for HammerheadClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Status and error mapping
// ============================================================================

/// Maps a `reqwest` failure to the remote error taxonomy
///
/// Body decoding failures are schema violations; everything else (connect,
/// timeout, broken body stream) is a transport failure.
pub(crate) fn transport_error(err: reqwest::Error) -> RemoteError {
    if err.is_decode() {
        RemoteError::InvalidResponse(err.to_string())
    } else {
        RemoteError::Transport(err.to_string())
    }
}

/// Classifies a status code the caller did not expect
pub(crate) fn classify_status(status: StatusCode, body: &str) -> RemoteError {
    let message = excerpt(body);
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        RemoteError::Auth(format!("{status}: {message}"))
    } else if status.is_server_error() {
        RemoteError::Transport(format!("{status}: {message}"))
    } else {
        RemoteError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

/// Returns the response if its status is one of `expected`, otherwise
/// consumes it into a classified error
pub(crate) async fn expect_status(
    response: Response,
    expected: &[StatusCode],
) -> Result<Response, RemoteError> {
    let status = response.status();
    if expected.contains(&status) {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(%status, body = %excerpt(&body), "Unexpected response status");
    Err(classify_status(status, &body))
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_LEN {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(MAX_ERROR_BODY_LEN).collect();
        format!("{cut}...")
    }
}
