//! Pulse (threat report) model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::nullable_vec;
use crate::client::OtxClient;
use crate::error::Result;
use crate::pagination::{ListOptions, PageEnvelope};
use crate::timestamp::Timestamp;
use crate::traits::{Get, List};

/// Path prefix of the pulse detail endpoint.
pub const PULSE_DETAIL_PATH: &str = "api/v1/pulses/";

/// Path of the subscribed-pulses feed.
pub const SUBSCRIPTIONS_PATH: &str = "api/v1/pulses/subscribed";

/// An OTX pulse, as returned by the detail and subscription endpoints.
///
/// Search results use a different shape; see [`SearchPulse`](crate::SearchPulse).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "author_name", default)]
    pub author: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "created", default)]
    pub created_at: Option<Timestamp>,

    #[serde(rename = "modified", default)]
    pub modified_at: Option<Timestamp>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub references: Vec<String>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub indicators: Vec<PulseIndicator>,

    #[serde(default)]
    pub revision: Option<f64>,

    /// Traffic Light Protocol marking (`white`, `green`, `amber`, `red`).
    #[serde(default)]
    pub tlp: Option<String>,

    #[serde(default)]
    pub public: Option<bool>,

    #[serde(default)]
    pub adversary: Option<String>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub targeted_countries: Vec<String>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub industries: Vec<String>,
}

/// An indicator of compromise embedded in a [`Pulse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseIndicator {
    #[serde(default)]
    pub id: Option<i64>,

    /// The indicator value (domain, hash, address, ...).
    #[serde(default)]
    pub indicator: Option<String>,

    /// Indicator type, e.g. `domain`, `IPv4`, `FileHash-SHA256`.
    #[serde(rename = "type", default)]
    pub indicator_type: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub created: Option<Timestamp>,

    #[serde(default)]
    pub expiration: Option<Timestamp>,

    #[serde(rename = "is_active", default)]
    pub active: Option<i64>,

    #[serde(default)]
    pub access_reason: Option<String>,

    #[serde(default)]
    pub access_type: Option<String>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub access_groups: Vec<String>,

    #[serde(default)]
    pub observations: Option<i64>,
}

impl Pulse {
    /// Check if the pulse carries any indicators.
    pub fn has_indicators(&self) -> bool {
        !self.indicators.is_empty()
    }

    /// Indicators of the given type (case-insensitive).
    pub fn indicators_of_type<'a>(
        &'a self,
        indicator_type: &'a str,
    ) -> impl Iterator<Item = &'a PulseIndicator> + 'a {
        self.indicators.iter().filter(move |i| {
            i.indicator_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case(indicator_type))
        })
    }
}

impl PulseIndicator {
    /// Whether the server marks this indicator as active.
    pub fn is_active(&self) -> bool {
        self.active.is_some_and(|a| a != 0)
    }
}

#[async_trait]
impl Get for Pulse {
    type Id = String; // Pulse ID

    #[tracing::instrument(skip(client))]
    async fn get(client: &OtxClient, id: String) -> Result<Self> {
        let path = format!("{PULSE_DETAIL_PATH}{}", urlencoding::encode(&id));
        client.get(&path).await
    }
}

#[async_trait]
impl List for Pulse {
    #[tracing::instrument(skip(client))]
    async fn list_page(client: &OtxClient, opts: &ListOptions) -> Result<PageEnvelope<Self>> {
        client
            .get_with_options(SUBSCRIPTIONS_PATH, &opts.for_listing())
            .await
    }
}

// Convenience functions for working with pulses

/// Fetch a single pulse by ID.
pub async fn get_pulse(client: &OtxClient, id: &str) -> Result<Pulse> {
    Pulse::get(client, id.to_string()).await
}

/// Fetch one page of subscribed pulses.
///
/// `None` fetches the first page with the maximum page size (20).
pub async fn get_subscribed_pulses_page(
    client: &OtxClient,
    opts: Option<&ListOptions>,
) -> Result<PageEnvelope<Pulse>> {
    match opts {
        Some(opts) => Pulse::list_page(client, opts).await,
        None => Pulse::list_page(client, &ListOptions::for_page(1, 20)).await,
    }
}

/// Fetch every subscribed pulse by following the server's next-page links.
///
/// # Example
///
/// ```ignore
/// use otxapi::{OtxClient, get_subscribed_pulses};
///
/// let client = OtxClient::from_env()?;
/// let pulses = get_subscribed_pulses(&client).await?;
/// ```
pub async fn get_subscribed_pulses(client: &OtxClient) -> Result<Vec<Pulse>> {
    Pulse::list_all(client, &ListOptions::default()).await
}
