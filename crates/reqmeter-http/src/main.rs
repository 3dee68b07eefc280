//! reqmeter demo server.
//!
//! - Config: `$REQMETER_CONFIG` or `reqmeter.yaml`, defaults when absent
//! - Demo routes plus `/metrics` and `/healthz`, all instrumented
//! - Log filter via `RUST_LOG`

use std::path::Path;

use tracing_subscriber::{fmt, EnvFilter};

use reqmeter_http::{app_state, config, demo, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("REQMETER_CONFIG").unwrap_or_else(|_| "reqmeter.yaml".into());
    let cfg = if Path::new(&path).exists() {
        config::load_from_file(&path).expect("config load failed")
    } else {
        tracing::warn!(%path, "config file not found, using defaults");
        config::ReqmeterConfig::default()
    };
    let listen = cfg
        .server
        .listen_addr()
        .expect("server.listen must be a valid SocketAddr");

    tracing::info!(
        service = %cfg.metrics.service_name,
        normalize_status = cfg.metrics.normalize_status,
        route_label_source = ?cfg.metrics.route_label_source,
        "metrics options resolved"
    );

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state, demo::routes());

    tracing::info!(%listen, "reqmeter-demo starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
