//! In-process HTTP tests driving the router with `tower::ServiceExt::oneshot`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use citysim_core::MetricsResult;
use citysim_gateway::{app_state::AppState, config::CitySimConfig, router::build_router};

fn app_with(cfg: CitySimConfig) -> (AppState, Router) {
    let state = AppState::new(cfg).expect("valid config");
    let app = build_router(state.clone());
    (state, app)
}

fn app() -> (AppState, Router) {
    app_with(CitySimConfig::default())
}

fn post_simulate(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/simulate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_string(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn metrics_of(resp: Response) -> MetricsResult {
    serde_json::from_str(&body_string(resp).await).unwrap()
}

const SMALL_CITY: &str = r#"{
    "layout": "basic_grid",
    "buildings": [
        {"type": "residential", "count": 10},
        {"type": "commercial", "count": 3},
        {"type": "industrial", "count": 1}
    ]
}"#;

#[tokio::test]
async fn root_returns_banner() {
    let (_, app) = app();
    let resp = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, citysim_gateway::ops::HOME_BANNER);
}

#[tokio::test]
async fn simulate_small_city() {
    let (_, app) = app();
    let resp = app.oneshot(post_simulate(SMALL_CITY)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let out = metrics_of(resp).await;
    assert_eq!(
        out,
        MetricsResult {
            traffic: 44,
            co2: 37,
            energy: 67,
            message: "City Analyzed: 10R 3C 1I".into(),
        }
    );
}

#[tokio::test]
async fn simulate_eco_mode() {
    let (state, app) = app();
    let body = r#"{"buildings":[
        {"type":"residential","count":10},
        {"type":"commercial","count":3},
        {"type":"industrial","count":1}],
        "smartthings_mode":"eco"}"#;
    let resp = app.oneshot(post_simulate(body)).await.unwrap();
    let out = metrics_of(resp).await;
    assert_eq!((out.traffic, out.co2, out.energy), (44, 22, 57));
    assert!(out.message.contains("Eco Mode Active"));
    assert_eq!(state.metrics().simulate_modes.get(&[("mode", "eco")]), 1);
}

#[tokio::test]
async fn malformed_body_falls_back_to_idle_defaults() {
    let (state, app) = app();
    let resp = app.oneshot(post_simulate("{definitely not json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let out = metrics_of(resp).await;
    assert_eq!((out.traffic, out.co2, out.energy), (25, 20, 30));
    assert_eq!(out.message, "Hello from SmartCitySim! The API is working!");
    assert_eq!(
        state.metrics().decode_errors.get(&[("route", "/api/simulate")]),
        1
    );
    assert_eq!(
        state
            .metrics()
            .http_requests
            .get(&[("route", "/api/simulate"), ("outcome", "fallback")]),
        1
    );
}

#[tokio::test]
async fn empty_body_without_content_type() {
    let (_, app) = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/simulate")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let out = metrics_of(resp).await;
    assert_eq!((out.traffic, out.co2, out.energy), (25, 20, 30));
}

#[tokio::test]
async fn identical_requests_give_identical_answers() {
    let (_, app) = app();
    let a = metrics_of(app.clone().oneshot(post_simulate(SMALL_CITY)).await.unwrap()).await;
    let b = metrics_of(app.oneshot(post_simulate(SMALL_CITY)).await.unwrap()).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn get_on_simulate_is_not_allowed() {
    let (_, app) = app();
    let req = Request::builder()
        .uri("/api/simulate")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn api_allows_any_origin() {
    let (_, app) = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/simulate")
        .header(header::ORIGIN, "http://game.example")
        .body(Body::from(SMALL_CITY))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn api_answers_preflight() {
    let (_, app) = app();
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/simulate")
        .header(header::ORIGIN, "http://game.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn cors_is_scoped_to_api() {
    let (_, app) = app();
    let req = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://game.example")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn cors_can_be_disabled() {
    let mut cfg = CitySimConfig::default();
    cfg.gateway.cors.allow_any_origin = false;
    let (_, app) = app_with(cfg);
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/simulate")
        .header(header::ORIGIN, "http://game.example")
        .body(Body::from(SMALL_CITY))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut cfg = CitySimConfig::default();
    cfg.gateway.max_body_bytes = 1024;
    let (_, app) = app_with(cfg);
    let resp = app.oneshot(post_simulate(vec![b' '; 4096])).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn configured_policy_is_used() {
    let mut cfg = CitySimConfig::default();
    cfg.policy.traffic.base = 10;
    let (_, app) = app_with(cfg);
    let out = metrics_of(app.oneshot(post_simulate(SMALL_CITY)).await.unwrap()).await;
    assert_eq!(out.traffic, 24);
}

#[tokio::test]
async fn readiness_flips_when_draining() {
    let (state, app) = app();
    let ready = || Request::builder().uri("/readyz").body(Body::empty()).unwrap();

    let resp = app.clone().oneshot(ready()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    state.begin_draining();
    let resp = app.oneshot(ready()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_string(resp).await, "draining");
}

#[tokio::test]
async fn metrics_endpoint_reports_simulations() {
    let (_, app) = app();
    app.clone().oneshot(post_simulate(SMALL_CITY)).await.unwrap();

    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let text = body_string(resp).await;
    assert!(text.contains("citysim_simulate_mode_total{mode=\"idle\"} 1"));
    assert!(text.contains("citysim_draining 0"));
}

#[tokio::test]
async fn metrics_endpoint_reports_decode_errors_by_route() {
    let (_, app) = app();
    app.clone().oneshot(post_simulate("not json at all")).await.unwrap();

    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let text = body_string(app.oneshot(req).await.unwrap()).await;
    assert!(text.contains("# TYPE citysim_decode_errors_total counter"));
    assert!(text.contains("citysim_decode_errors_total{route=\"/api/simulate\"} 1"));
    assert!(text.contains(
        "citysim_http_requests_total{outcome=\"fallback\",route=\"/api/simulate\"} 1"
    ));
}
