//! Credential exchange for the dashboard API
//!
//! Exchanges a username/password pair for a bearer token using the
//! resource-owner password grant, then reads the user identifier from the
//! `sub` claim of the returned JWT.
//!
//! The token is trusted as issued: its payload is decoded but the signature
//! is not verified.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ksync_core::config::UserCredentials;
use ksync_core::domain::{AccountSession, RemoteError, UserId};
use ksync_core::ports::IAuthenticator;
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::client::{classify_status, transport_error, HammerheadClient};
use crate::wire::WireId;

/// Token endpoint, relative to the base URL
const TOKEN_PATH: &str = "/auth/token";

/// Body of the token endpoint response
///
/// Only `access_token` is used; other fields (expiry, refresh token) are
/// ignored.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// JWT payload claims
#[derive(Debug, Deserialize)]
struct TokenClaims {
    sub: WireId,
}

/// Extracts the user identifier from an access token without verifying it
///
/// # Errors
/// [`RemoteError::Auth`] if the token is not a three-part JWT, its payload
/// is not base64url JSON, or it carries no usable `sub` claim.
pub fn user_id_from_token(token: &str) -> Result<UserId, RemoteError> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(RemoteError::Auth("access token is not a JWT".to_string())),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| RemoteError::Auth(format!("access token payload is not base64url: {e}")))?;

    let claims: TokenClaims = serde_json::from_slice(&bytes)
        .map_err(|e| RemoteError::Auth(format!("access token claims are invalid: {e}")))?;

    UserId::new(claims.sub.into_string())
        .map_err(|e| RemoteError::Auth(format!("access token subject is invalid: {e}")))
}

#[async_trait::async_trait]
impl IAuthenticator for HammerheadClient {
    async fn authenticate(
        &self,
        credentials: &UserCredentials,
    ) -> Result<AccountSession, RemoteError> {
        debug!(username = %credentials.username, "Authenticating");

        let response = self
            .request(Method::POST, TOKEN_PATH)
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!(username = %credentials.username, %status, "Authentication failed");
            return Err(match classify_status(status, &body) {
                RemoteError::Rejected { status, message } => {
                    RemoteError::Auth(format!("{status}: {message}"))
                }
                other => other,
            });
        }

        let token = serde_json::from_str::<TokenResponse>(&body)
            .ok()
            .and_then(|r| r.access_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                warn!(username = %credentials.username, "Authentication response has no access token");
                RemoteError::Auth("response contains no access_token".to_string())
            })?;

        let user_id = user_id_from_token(&token)?;

        info!(username = %credentials.username, user_id = %user_id, "Authentication successful");
        Ok(AccountSession::new(
            credentials.username.clone(),
            token,
            user_id,
        ))
    }
}
