//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IAuthenticator`] - Credential exchange yielding an [`AccountSession`](crate::domain::AccountSession)
//! - [`IRouteStore`] - Remote collections and routes (list/create/delete/import)
//! - [`IPacer`] - Pause strategy applied between state-mutating remote calls

pub mod pacer;
pub mod route_store;

pub use pacer::{IPacer, NoPacer};
pub use route_store::{IAuthenticator, IRouteStore};
