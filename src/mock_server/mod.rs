//! Mock OTX API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the OTX API
//! for integration and end-to-end testing. Unlike wiremock which mocks at the
//! HTTP level per-test, this server keeps its data across requests and
//! builds real `next`/`previous` links, so paging workflows can be walked
//! end to end.
//!
//! # Example
//!
//! ```ignore
//! use otxapi::mock_server::MockServer;
//! use otxapi::{ClientConfig, List, ListOptions, OtxClient, Pulse};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = OtxClient::new(
//!         ClientConfig::new("test-key").with_base_url(server.url()),
//!     )
//!     .unwrap();
//!
//!     // Server comes with default fixtures
//!     let pulses = Pulse::list_all(&client, &ListOptions::for_page(1, 2)).await.unwrap();
//!     assert_eq!(pulses.len(), 5);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
