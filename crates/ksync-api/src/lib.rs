//! KSync API - Hammerhead dashboard API client
//!
//! Provides an async client for:
//! - Password-grant credential exchange (bearer token + user id)
//! - Collection listing, creation and deletion
//! - Route listing, deletion and GPX file import
//! - Pacing between state-mutating calls
//!
//! ## Modules
//!
//! - [`auth`] - Credential exchange and access-token claim decoding
//! - [`client`] - HTTP client, request construction and status mapping
//! - [`collections`] - Collection endpoints
//! - [`routes`] - Route endpoints (list, delete, multipart import)
//! - [`provider`] - [`IRouteStore`](ksync_core::ports::IRouteStore) implementation
//! - [`pacing`] - Random-interval [`IPacer`](ksync_core::ports::IPacer)

pub mod auth;
pub mod client;
pub mod collections;
pub mod pacing;
pub mod provider;
pub mod routes;
mod wire;

pub use client::HammerheadClient;
pub use pacing::RandomPacer;
