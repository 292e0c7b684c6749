//! Mock server state management.
//!
//! Provides the in-memory data store for the mock OTX API server.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Pulse, SearchPulse, UserDetail};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Profile returned by the user endpoint.
    pub user: Option<UserDetail>,

    /// Subscribed pulses, in feed order. Also served by the detail endpoint.
    pub pulses: Vec<Pulse>,

    /// Corpus the search endpoint filters.
    pub search_pulses: Vec<SearchPulse>,

    /// If set, requests must carry this value in `X-OTX-API-KEY`.
    pub required_api_key: Option<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    pub fn with_user(mut self, user: UserDetail) -> Self {
        self.user = Some(user);
        self
    }

    /// Append a pulse to the subscription feed.
    pub fn with_pulse(mut self, pulse: Pulse) -> Self {
        self.pulses.push(pulse);
        self
    }

    /// Add a pulse to the search corpus.
    pub fn with_search_pulse(mut self, pulse: SearchPulse) -> Self {
        self.search_pulses.push(pulse);
        self
    }

    /// Set the API key requests must present.
    pub fn with_required_api_key(mut self, key: &str) -> Self {
        self.required_api_key = Some(key.to_string());
        self
    }

    /// Whether a request carrying `key` may proceed.
    pub fn is_authorized(&self, key: Option<&str>) -> bool {
        match self.required_api_key {
            Some(ref required) => key == Some(required.as_str()),
            None => true,
        }
    }

    /// Get a pulse by ID.
    pub fn get_pulse(&self, id: &str) -> Option<&Pulse> {
        self.pulses.iter().find(|p| p.id.as_deref() == Some(id))
    }

    /// Search pulses whose name, description, tags or indicator values
    /// contain `query` (case-insensitive). A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&SearchPulse> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return vec![];
        }
        let hit = |s: Option<&str>| s.is_some_and(|s| s.to_lowercase().contains(&needle));

        self.search_pulses
            .iter()
            .filter(|p| {
                hit(p.name.as_deref())
                    || hit(p.description.as_deref())
                    || p.tags.iter().any(|t| hit(Some(t)))
                    || p.indicators.iter().any(|i| hit(i.indicator.as_deref()))
            })
            .collect()
    }
}
