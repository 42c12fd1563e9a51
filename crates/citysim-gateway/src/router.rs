//! Axum router wiring.
//!
//! `/api/*` carries the permissive CORS layer so a client served from another
//! origin can call it. Operational routes stay same-origin.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.cfg().gateway.max_body_bytes;
    let allow_any_origin = state.cfg().gateway.cors.allow_any_origin;

    let mut api: Router<AppState> =
        Router::new().route("/api/simulate", post(transport::simulate::simulate));
    if allow_any_origin {
        api = api.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    Router::new()
        .route("/", get(ops::home))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .merge(api)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
