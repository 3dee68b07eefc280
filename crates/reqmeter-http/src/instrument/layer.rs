//! Axum middleware running the timer before and the recorder after each
//! handler.
//!
//! Use with `axum::middleware::from_fn_with_state`:
//! ```ignore
//! Router::new()
//!     .route("/orders/:id", get(handler))
//!     .layer(middleware::from_fn_with_state(recorder, track_requests))
//! ```

use std::sync::Arc;

use axum::{
    body::{Body, HttpBody},
    extract::{MatchedPath, Request, State},
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::Response,
};

use super::{Exchange, MetricsRecorder, RequestTimer};
use crate::context::{ContextValues, RequestContext, MATCHED_ROUTE_KEY};

pub async fn track_requests(
    State(recorder): State<Arc<MetricsRecorder>>,
    request: Request,
    next: Next,
) -> Response {
    let mut ctx = RequestContext::new();
    RequestTimer.before(&mut ctx);

    let method = request.method().as_str().to_owned();
    let path = request.uri().path().to_owned();
    if let Some(route) = request.extensions().get::<MatchedPath>() {
        ctx.set_value(MATCHED_ROUTE_KEY, route.as_str());
    }

    let response = next.run(request).await;

    if let Some(ContextValues(values)) = response.extensions().get::<ContextValues>() {
        for (k, v) in values {
            ctx.set_value(k.as_str(), v.as_str());
        }
    }

    let ex = Exchange {
        method: &method,
        path: &path,
        status: response.status().as_u16(),
        body_len: body_len(&response),
    };
    recorder.after(&ctx, &ex);

    response
}

/// Exact body size when known, else `Content-Length`, else 0.
fn body_len(response: &Response<Body>) -> u64 {
    if let Some(n) = response.body().size_hint().exact() {
        return n;
    }
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
