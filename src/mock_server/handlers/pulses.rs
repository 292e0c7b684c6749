//! Pulse endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use super::{authorize, not_found, PageQuery, Paged};
use crate::mock_server::state::MockState;

/// GET /api/v1/pulses/subscribed
pub async fn list_subscribed(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }

    let all: Vec<_> = state.pulses.iter().collect();
    let page = Paged::slice(&all, &query, &headers, "/api/v1/pulses/subscribed");
    (StatusCode::OK, Json(page.into_json())).into_response()
}

/// GET /api/v1/pulses/{id}
pub async fn get_pulse(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }

    match state.get_pulse(&id) {
        Some(pulse) => (StatusCode::OK, Json(pulse.clone())).into_response(),
        None => not_found(),
    }
}
