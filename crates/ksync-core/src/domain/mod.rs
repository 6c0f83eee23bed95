//! Domain entities and business logic
//!
//! This module contains the core domain types for KSync:
//! - Newtypes for the opaque remote identifiers
//! - Remote collections and routes as reported by the route store
//! - Local folder groups produced by the scanner
//! - Reconciliation of local groups against remote collections
//! - Per-file sync outcomes and per-account reports
//! - Domain-specific error types

pub mod collection;
pub mod errors;
pub mod local;
pub mod matching;
pub mod newtypes;
pub mod outcome;
pub mod session;

// Re-export commonly used types
pub use collection::{RemoteCollection, RemoteRoute};
pub use errors::{DomainError, RemoteError};
pub use local::LocalGroup;
pub use matching::{reconcile, FolderGroup, MatchResult};
pub use newtypes::*;
pub use outcome::{SyncOutcome, SyncReport, UploadStatus};
pub use session::AccountSession;
