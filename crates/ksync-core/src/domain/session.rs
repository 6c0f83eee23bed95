//! Authenticated account session

use std::fmt;

use super::newtypes::UserId;

/// Bearer credential and user identifier obtained from the credential exchange
///
/// Every remote route store call requires one. The token is trusted as
/// issued; its signature is never verified locally.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountSession {
    /// Username the session was obtained for
    pub username: String,
    /// Bearer token attached to every API request
    pub access_token: String,
    /// Remote user identifier decoded from the token claims
    pub user_id: UserId,
}

impl AccountSession {
    pub fn new(
        username: impl Into<String>,
        access_token: impl Into<String>,
        user_id: UserId,
    ) -> Self {
        Self {
            username: username.into(),
            access_token: access_token.into(),
            user_id,
        }
    }
}

impl fmt::Debug for AccountSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountSession")
            .field("username", &self.username)
            .field("access_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}
