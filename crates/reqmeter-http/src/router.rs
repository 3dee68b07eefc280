//! Axum router wiring.
//!
//! Application routes are merged with the ops endpoints and every route,
//! including `/metrics`, runs behind the instrumentation layer.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, instrument, ops};

pub fn build_router(state: AppState, routes: Router<AppState>) -> Router {
    Router::new()
        .merge(routes)
        .route("/metrics", get(ops::metrics))
        .route("/healthz", get(ops::healthz))
        .layer(middleware::from_fn_with_state(
            state.recorder(),
            instrument::track_requests,
        ))
        .with_state(state)
}
