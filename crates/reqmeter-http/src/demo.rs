//! Demo application routes served by `reqmeter-demo`.
//!
//! Each route exercises one recording path: plain success, large bodies,
//! slow handlers with path parameters, and assorted error statuses.

use std::time::Duration;

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::app_state::AppState;

/// Size of the `/fake` response body.
pub const FAKE_BODY_LEN: usize = 1024 * 1000;

/// Statuses `/bad/:user` picks from.
pub const BAD_STATUSES: [u16; 9] = [300, 400, 413, 500, 417, 404, 402, 503, 502];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/fake", get(fake))
        .route("/slow/:user/ping", get(slow))
        .route("/bad/:user", get(bad))
}

async fn index() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "data": "Welcome to reqmeter demo. Visit /metrics."
    }))
}

async fn fake() -> impl IntoResponse {
    vec![0u8; FAKE_BODY_LEN]
}

/// Sleep between 0.5s and 2.25s depending on the user segment.
pub fn slow_delay(user: &str) -> Duration {
    Duration::from_millis(500 + (user.len() % 8) as u64 * 250)
}

async fn slow(Path(user): Path<String>) -> impl IntoResponse {
    tokio::time::sleep(slow_delay(&user)).await;
    Json(json!({ "status": "success", "data": "Sleeping slow response" }))
}

/// Deterministic status for a user segment.
pub fn bad_status(user: &str) -> StatusCode {
    let idx = user.bytes().map(usize::from).sum::<usize>() % BAD_STATUSES.len();
    StatusCode::from_u16(BAD_STATUSES[idx]).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn bad(Path(user): Path<String>) -> Response {
    let status = bad_status(&user);
    (status, Json(json!({ "status": "error", "message": "oops" }))).into_response()
}
