//! Search endpoint handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use super::{authorize, PageQuery, Paged};
use crate::mock_server::state::MockState;

/// GET /api/v1/search/pulses
pub async fn search_pulses(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }

    let hits = state.search(query.q.as_deref().unwrap_or_default());
    let mut body = Paged::slice(&hits, &query, &headers, "/api/v1/search/pulses").into_json();
    body["exact_match"] = serde_json::Value::String(String::new());
    (StatusCode::OK, Json(body)).into_response()
}
