//! User endpoint handler.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use super::{authorize, not_found};
use crate::mock_server::state::MockState;

/// GET /api/v1/user/
pub async fn get_user(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }

    match state.user {
        Some(ref user) => (StatusCode::OK, Json(user.clone())).into_response(),
        None => not_found(),
    }
}
