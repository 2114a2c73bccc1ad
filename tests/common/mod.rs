//! Common test infrastructure
//!
//! Everything an end-to-end test needs: an isolated server, an in-process
//! fake Steam store and an HTTP client that keeps the session cookie.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestClient, TestServer, TEST_USER};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_library_starts_empty() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::authenticated(server.base_url.clone(), TEST_USER).await;
//!
//!     let response = client.get_library().await;
//!     assert_eq!(response.status(), StatusCode::OK);
//! }
//! ```

mod client;
mod constants;
mod fake_steam;
mod server;

// Public API - this is what tests import
pub use client::TestClient;
pub use constants::*;
#[allow(unused_imports)]
pub use fake_steam::FakeSteamStore;
pub use server::TestServer;
