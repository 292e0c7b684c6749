//! Trait definitions for OTX operations.
//!
//! Each entity type implements the traits it supports. Subscription feeds
//! and search use different pagination contracts, so they get separate
//! traits.

mod get;
mod list;
mod search;

pub use get::Get;
pub use list::List;
pub use search::{Search, SearchStream};
