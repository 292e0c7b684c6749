//! Pulse search results.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{nullable_vec, Indicator};
use crate::client::OtxClient;
use crate::error::Result;
use crate::pagination::{ListOptions, PageEnvelope};
use crate::timestamp::Timestamp;
use crate::traits::{Search, SearchStream};

/// Path of the pulse search endpoint.
pub const SEARCH_PULSES_PATH: &str = "api/v1/search/pulses";

/// A pulse as returned by the search endpoint.
///
/// This shape differs from [`Pulse`](crate::Pulse): every field may be
/// missing and indicators use the lighter [`Indicator`] record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPulse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "author_name", default)]
    pub author: Option<String>,

    #[serde(rename = "created", default)]
    pub created_at: Option<Timestamp>,

    #[serde(rename = "modified", default)]
    pub modified_at: Option<Timestamp>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub references: Vec<String>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub indicators: Vec<Indicator>,

    #[serde(default)]
    pub tlp: Option<String>,

    #[serde(default)]
    pub adversary: Option<String>,
}

/// One page of pulse search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PulseSearchResponse {
    #[serde(flatten)]
    pub page: PageEnvelope<SearchPulse>,

    /// Set when the query matched something exactly (e.g. an indicator).
    #[serde(default)]
    pub exact_match: Option<String>,
}

#[async_trait]
impl Search for SearchPulse {
    #[tracing::instrument(skip(client))]
    async fn search_page(client: &OtxClient, opts: &ListOptions) -> Result<PageEnvelope<Self>> {
        Ok(search_pulses(client, opts).await?.page)
    }
}

// Convenience functions for searching

/// Fetch one page of pulses matching `opts.query`.
pub async fn search_pulses(client: &OtxClient, opts: &ListOptions) -> Result<PulseSearchResponse> {
    client
        .get_with_options(SEARCH_PULSES_PATH, &opts.for_search())
        .await
}

/// Fetch every page of pulses matching `opts.query`.
///
/// Pages are requested independently, bounded by the total count the
/// first page reports.
pub async fn search_all_pulses(client: &OtxClient, opts: &ListOptions) -> Result<Vec<SearchPulse>> {
    SearchPulse::search_all(client, opts).await
}

/// Stream every page of pulses matching `opts.query` through a bounded
/// channel filled by a background task.
///
/// # Example
///
/// ```ignore
/// let mut stream = search_all_pulses_stream(&client, &ListOptions::search("emotet"), 10);
/// while let Some(pulse) = stream.recv().await {
///     println!("{:?}", pulse?.name);
/// }
/// ```
pub fn search_all_pulses_stream(
    client: &OtxClient,
    opts: &ListOptions,
    capacity: usize,
) -> SearchStream<SearchPulse> {
    SearchPulse::search_all_stream(client.clone(), opts.clone(), capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_deserializes() {
        let response: PulseSearchResponse = serde_json::from_value(serde_json::json!({
            "results": [
                {
                    "id": "abc",
                    "name": "APT28 activity",
                    "indicators": [{"_id": "1", "indicator": "198.51.100.4", "type": "IPv4"}]
                },
                {"name": "no id here", "indicators": null}
            ],
            "count": 12,
            "next": "https://otx.alienvault.com/api/v1/search/pulses?q=apt28&page=2&limit=5",
            "previous": null,
            "exact_match": ""
        }))
        .unwrap();

        assert_eq!(response.page.len(), 2);
        assert_eq!(response.page.total_count, Some(12));
        assert_eq!(response.exact_match.as_deref(), Some(""));
        assert!(response.page.items[1].id.is_none());
        assert!(response.page.items[1].indicators.is_empty());

        let next = response.page.next_page_options().unwrap();
        assert_eq!(next, ListOptions::for_page(2, 5).with_query("apt28"));
    }
}
