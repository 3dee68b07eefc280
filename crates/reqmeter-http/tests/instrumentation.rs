//! End-to-end recording through the axum layer.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower::ServiceExt;

use reqmeter_core::Registry;
use reqmeter_http::app_state::AppState;
use reqmeter_http::config::{MetricsOpts, ReqmeterConfig};
use reqmeter_http::context::{ContextValues, MATCHED_ROUTE_KEY};
use reqmeter_http::instrument::{names, HttpLabels};
use reqmeter_http::{ops, router};

fn opts(normalize: bool, route_source: Option<&str>) -> MetricsOpts {
    MetricsOpts {
        normalize_status: normalize,
        expose_runtime_metrics: false,
        route_label_source: route_source.map(str::to_string),
        service_name: "svc".into(),
    }
}

fn app(opts: MetricsOpts) -> (Router, AppState) {
    let state = AppState::new(ReqmeterConfig {
        metrics: opts,
        ..ReqmeterConfig::default()
    });
    let routes = Router::new()
        .route("/", get(|| async { "hello" }))
        .route("/orders/:id", get(|| async { "order" }))
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .route("/kb", get(|| async { "x".repeat(1000) }))
        .route(
            "/sleep",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                "done"
            }),
        )
        .route(
            "/tagged/:a/:b",
            get(|| async {
                let mut res = "tagged".into_response();
                res.extensions_mut()
                    .insert(ContextValues::default().with("route", "/tagged/*"));
                res
            }),
        );

    (router::build_router(state.clone(), routes), state)
}

async fn send(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(res: Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn labels(status: &str, path: &str) -> HttpLabels {
    HttpLabels {
        service: "svc".into(),
        status: status.into(),
        method: "GET".into(),
        path: path.into(),
    }
}

fn requests(reg: &Registry, status: &str, path: &str) -> Option<u64> {
    reg.counter_value(&labels(status, path).key(names::REQUESTS_TOTAL))
}

#[tokio::test]
async fn exposition_contains_request_line() {
    let (app, _) = app(opts(true, None));

    assert_eq!(send(&app, "/").await.status(), StatusCode::OK);

    let res = send(&app, "/metrics").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(CONTENT_TYPE).unwrap(),
        "text/plain; version=0.0.4"
    );

    let text = body_text(res).await;
    assert!(
        text.lines()
            .any(|l| l == r#"requests_total{service="svc",status="2xx",method="GET",path="/"} 1"#),
        "{text}"
    );
    assert!(text.contains(
        r#"request_duration_seconds_bucket{service="svc",status="2xx",method="GET",path="/",le="+Inf"} 1"#
    ));
    assert!(text.contains(
        r#"response_size_bytes_sum{service="svc",status="2xx",method="GET",path="/"} 5"#
    ));
}

#[tokio::test]
async fn status_is_normalized_when_enabled() {
    let (app, state) = app(opts(true, None));
    send(&app, "/missing").await;

    let reg = state.registry();
    assert_eq!(requests(&reg, "4xx", "/missing"), Some(1));
    assert_eq!(requests(&reg, "404", "/missing"), None);
}

#[tokio::test]
async fn status_is_raw_when_disabled() {
    let (app, state) = app(opts(false, None));
    send(&app, "/missing").await;

    let reg = state.registry();
    assert_eq!(requests(&reg, "404", "/missing"), Some(1));
}

#[tokio::test]
async fn route_template_used_when_configured() {
    let (app, state) = app(opts(true, Some(MATCHED_ROUTE_KEY)));
    send(&app, "/orders/42").await;
    send(&app, "/orders/43").await;

    let reg = state.registry();
    assert_eq!(requests(&reg, "2xx", "/orders/:id"), Some(2));
    assert_eq!(requests(&reg, "2xx", "/orders/42"), None);
}

#[tokio::test]
async fn raw_path_used_without_route_source() {
    let (app, state) = app(opts(true, None));
    send(&app, "/orders/42").await;

    let reg = state.registry();
    assert_eq!(requests(&reg, "2xx", "/orders/42"), Some(1));
    assert_eq!(requests(&reg, "2xx", "/orders/:id"), None);
}

#[tokio::test]
async fn handler_supplied_route_label() {
    let (app, state) = app(opts(true, Some("route")));
    send(&app, "/tagged/a/b").await;

    let reg = state.registry();
    assert_eq!(requests(&reg, "2xx", "/tagged/*"), Some(1));
}

#[tokio::test]
async fn duration_covers_slow_handler() {
    let (app, state) = app(opts(true, None));
    send(&app, "/sleep").await;

    let snap = state
        .registry()
        .histogram_snapshot(&labels("2xx", "/sleep").key(names::REQUEST_DURATION_SECONDS))
        .unwrap();
    assert_eq!(snap.count, 1);
    assert!(snap.sum >= 0.5, "sum = {}", snap.sum);
    assert!(snap.sum < 1.0, "sum = {}", snap.sum);
}

#[tokio::test]
async fn response_size_is_body_length() {
    let (app, state) = app(opts(true, None));
    send(&app, "/kb").await;

    let snap = state
        .registry()
        .histogram_snapshot(&labels("2xx", "/kb").key(names::RESPONSE_SIZE_BYTES))
        .unwrap();
    assert_eq!(snap.count, 1);
    assert_eq!(snap.sum, 1000.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_use_counts_every_request() {
    const N: usize = 64;
    let (app, state) = app(opts(true, None));

    let tasks: Vec<_> = (0..N)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { send(&app, "/").await.status() })
        })
        .collect();
    for t in tasks {
        assert_eq!(t.await.unwrap(), StatusCode::OK);
    }

    let reg = state.registry();
    let l = labels("2xx", "/");
    assert_eq!(reg.counter_value(&l.key(names::REQUESTS_TOTAL)), Some(N as u64));
    assert_eq!(
        reg.histogram_snapshot(&l.key(names::REQUEST_DURATION_SECONDS)).unwrap().count,
        N as u64
    );
    assert_eq!(reg.series_count(), 3);
}

#[tokio::test]
async fn exposition_is_stable_without_new_requests() {
    let (app, state) = app(opts(true, None));
    send(&app, "/").await;
    send(&app, "/missing").await;

    // call the handler directly so the scrape itself is not recorded
    let first = body_text(ops::metrics(State(state.clone())).await).await;
    let second = body_text(ops::metrics(State(state.clone())).await).await;
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[tokio::test]
async fn runtime_metrics_follow_option() {
    let (_, state) = app(opts(true, None));
    let text = body_text(ops::metrics(State(state)).await).await;
    assert!(!text.contains("process_uptime_seconds"));

    let (_, state) = app(MetricsOpts {
        expose_runtime_metrics: true,
        ..opts(true, None)
    });
    let text = body_text(ops::metrics(State(state)).await).await;
    assert!(text.contains("process_uptime_seconds"));
}

#[tokio::test]
async fn healthz_is_ok() {
    let (app, _) = app(opts(true, None));
    let res = send(&app, "/healthz").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "ok");
}
