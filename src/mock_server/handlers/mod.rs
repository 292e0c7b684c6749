//! HTTP request handlers for the mock server.

pub mod pulses;
pub mod search;
pub mod user;

pub use pulses::*;
pub use search::*;
pub use user::*;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use url::Url;

use crate::mock_server::state::MockState;
use crate::{API_KEY_HEADER, MAX_PAGE_SIZE};

/// Page size used when a request carries no `limit`.
const MOCK_PAGE_SIZE: u32 = 10;

/// Paging query parameters shared by the list and search endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub q: Option<String>,
}

impl PageQuery {
    fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    fn limit(&self) -> u32 {
        match self.limit {
            Some(n) if (1..=MAX_PAGE_SIZE).contains(&n) => n,
            _ => MOCK_PAGE_SIZE,
        }
    }
}

/// One page of items plus the links pointing around it.
pub(crate) struct Paged<T> {
    pub items: Vec<T>,
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl<T: Clone> Paged<T> {
    /// Slice `all` to the requested page and build links the way the OTX
    /// API does: absolute URLs on the request's host, with `page` left
    /// out of the link to the first page.
    pub(crate) fn slice(all: &[&T], query: &PageQuery, headers: &HeaderMap, path: &str) -> Self {
        let page = query.page();
        let limit = query.limit();
        let count = all.len();

        let start = ((page - 1) * limit) as usize;
        let end = (start + limit as usize).min(count);
        let items = if start < count {
            all[start..end].iter().map(|item| (*item).clone()).collect()
        } else {
            vec![]
        };

        let link = |target: u32| page_link(headers, path, target, limit, query.q.as_deref());
        Self {
            items,
            count,
            next: (end < count).then(|| link(page + 1)),
            previous: (page > 1).then(|| link(page - 1)),
        }
    }

    pub(crate) fn into_json(self) -> serde_json::Value
    where
        T: serde::Serialize,
    {
        serde_json::json!({
            "count": self.count,
            "next": self.next,
            "previous": self.previous,
            "results": self.items,
        })
    }
}

fn page_link(headers: &HeaderMap, path: &str, page: u32, limit: u32, q: Option<&str>) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");

    let mut url = match Url::parse(&format!("http://{host}{path}")) {
        Ok(url) => url,
        Err(_) => return path.to_string(),
    };
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("limit", &limit.to_string());
        if page > 1 {
            pairs.append_pair("page", &page.to_string());
        }
        if let Some(q) = q {
            pairs.append_pair("q", q);
        }
    }
    url.into()
}

/// Reject the request unless it carries the key the state requires.
pub(crate) fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let key = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if state.is_authorized(key) {
        return Ok(());
    }
    let detail = if key.is_some() {
        "Invalid API key."
    } else {
        "Authentication credentials were not provided."
    };
    Err(error_response(StatusCode::FORBIDDEN, detail))
}

pub(crate) fn error_response(status: StatusCode, detail: &str) -> Response {
    (status, Json(serde_json::json!({ "detail": detail }))).into_response()
}

pub(crate) fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found.")
}
