//! AlienVault OTX API client library.
//!
//! A Rust library for the Open Threat Exchange REST API using a
//! trait-based architecture where each operation (Get, List, Search)
//! is defined as a trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use otxapi::{ListOptions, OtxClient, Pulse, Get, List};
//!
//! #[tokio::main]
//! async fn main() -> otxapi::Result<()> {
//!     // Create client from environment variables
//!     let client = OtxClient::from_env()?;
//!
//!     // Who owns this key?
//!     let user = otxapi::get_user_details(&client).await?;
//!     println!("User: {:?}", user.username);
//!
//!     // Every subscribed pulse, following the server's page links
//!     let pulses = Pulse::list_all(&client, &ListOptions::default()).await?;
//!     println!("Subscribed to {} pulses", pulses.len());
//!
//!     // Search across every page of results
//!     let hits = otxapi::search_all_pulses(&client, &ListOptions::search("emotet")).await?;
//!     println!("Found {} matching pulses", hits.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Get`] - Fetch a single entity by ID
//! - [`List`] - Fetch collections whose pages link to each other
//! - [`Search`] - Fetch collections bounded by a reported total count
//!
//! Paging state is never tracked client-side. Each [`PageEnvelope`]
//! carries the server's `next`/`previous` links, and
//! [`PageEnvelope::next_page_options`] reads the following request's
//! [`ListOptions`] out of them. [`OtxError::NoPage`] marks the end.
//!
//! # Configuration
//!
//! [`OtxClient::from_env`] reads the API key from `X_OTX_API_KEY` or
//! `ALIENVAULT_OTXAPI_KEY` and an optional base URL from `OTX_API_URL`
//! (defaults to `https://otx.alienvault.com`). For explicit setup, build a
//! [`ClientConfig`] from any [`ApiKeySource`].

pub mod cli;
mod client;
mod config;
mod error;
#[cfg(feature = "test-server")]
pub mod mock_server;
mod models;
mod output;
mod pagination;
pub mod response;
mod timestamp;
mod traits;

// Re-export core types
pub use client::{OtxClient, API_KEY_HEADER};
pub use config::{
    ApiKeySource, ClientConfig, EnvApiKey, StaticApiKey, DEFAULT_API_KEY_VARS, DEFAULT_BASE_URL,
    DEFAULT_USER_AGENT,
};
pub use error::{OtxError, Result};
pub use output::PrettyPrint;
pub use pagination::{
    total_pages, ListOptions, PageEnvelope, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    SEARCH_ALL_PAGE_SIZE,
};
pub use timestamp::Timestamp;

// Re-export traits
pub use traits::{Get, List, Search, SearchStream};

// Re-export models
pub use models::{
    // User types
    UserDetail,
    // Pulse types
    Pulse,
    PulseIndicator,
    // Search types
    Indicator,
    PulseSearchResponse,
    SearchPulse,
    // Endpoint paths
    PULSE_DETAIL_PATH,
    SEARCH_PULSES_PATH,
    SUBSCRIPTIONS_PATH,
    USER_PATH,
};

// Re-export convenience functions
pub use models::get_user_details;
pub use models::{get_pulse, get_subscribed_pulses, get_subscribed_pulses_page};
pub use models::{search_all_pulses, search_all_pulses_stream, search_pulses};
