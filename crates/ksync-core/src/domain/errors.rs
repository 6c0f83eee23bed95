//! Domain error types
//!
//! This module defines error types specific to domain operations
//! (validation of identifiers and paths) and the error taxonomy used at the
//! remote route store boundary.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid path format or content
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Identifier parsing error
    #[error("Invalid ID format: {0}")]
    InvalidId(String),
}

/// Errors returned by the remote route store and the credential exchange
///
/// Every remote call may fail independently. Callers log the failure, skip
/// the affected file or collection and continue with the next item; nothing
/// is retried automatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Credentials were rejected or the bearer token is not accepted (401/403)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network failure, timeout or 5xx response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body did not match the expected schema
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Any other non-success status
    #[error("Request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// A local file to be uploaded could not be read
    #[error("Cannot read local file {path}: {message}")]
    LocalFile {
        /// Path of the file
        path: String,
        /// Underlying I/O error
        message: String,
    },
}

impl RemoteError {
    /// Returns true for authentication failures
    pub fn is_auth(&self) -> bool {
        matches!(self, RemoteError::Auth(_))
    }

    /// Returns true for failures of the transport class
    ///
    /// Schema violations count as transport failures: the call did not
    /// produce a usable answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RemoteError::Transport(_) | RemoteError::InvalidResponse(_)
        )
    }
}
