//! KSync Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `LocalGroup`, `RemoteCollection`, `RemoteRoute`, `MatchResult`, `SyncOutcome`
//! - **Reconciliation** - case-insensitive matching of local folders to remote collections
//! - **Port definitions** - Traits for adapters: `IAuthenticator`, `IRouteStore`, `IPacer`
//! - **Configuration** - YAML/JSON configuration with validation and a builder
//!
//! # Architecture
//!
//! The domain module contains pure business logic with no I/O.
//! Ports define trait interfaces that adapter crates implement
//! (`ksync-api` for the remote route store, `ksync-sync` for the filesystem
//! side and the sync driver).

pub mod config;
pub mod domain;
pub mod ports;
