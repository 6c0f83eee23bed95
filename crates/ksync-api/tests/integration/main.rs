//! Integration tests for ksync-api
//!
//! Uses wiremock to simulate the dashboard API and verifies end-to-end
//! behavior of the credential exchange, collection and route endpoints,
//! and pacing after mutating calls.

mod common;

mod test_auth;
mod test_collections;
mod test_routes;
