//! Indicator model for search results.

use serde::{Deserialize, Serialize};

/// An indicator as embedded in a [`SearchPulse`](crate::SearchPulse).
///
/// Every field is optional; the search endpoint omits most of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,

    #[serde(default)]
    pub indicator: Option<String>,

    #[serde(rename = "type", default)]
    pub indicator_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
