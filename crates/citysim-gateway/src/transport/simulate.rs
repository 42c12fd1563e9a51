//! `POST /api/simulate`.
//!
//! The body is read as raw bytes rather than through `Json<T>`, so a missing
//! or wrong `Content-Type` is accepted. A body that is not JSON is logged and
//! counted, then simulated as an empty city; the route always answers 200.

use std::time::Instant;

use axum::{extract::State, Json};
use bytes::Bytes;

use citysim_core::{decode_manifest, CityManifest, MetricsResult};

use crate::app_state::AppState;

const ROUTE: &str = "/api/simulate";

pub async fn simulate(State(state): State<AppState>, body: Bytes) -> Json<MetricsResult> {
    let metrics = state.metrics();

    let (manifest, outcome) = match decode_manifest(&body) {
        Ok(m) => (m, "ok"),
        Err(e) => {
            tracing::warn!(
                code = e.client_code().as_str(),
                error = %e,
                body_len = body.len(),
                "malformed simulate body; simulating an empty city"
            );
            metrics.decode_errors.inc(&[("route", ROUTE)]);
            (CityManifest::default(), "fallback")
        }
    };

    let mode = manifest.mode.label();
    tracing::info!(
        buildings = manifest.buildings.len(),
        mode,
        layout = manifest.layout.as_deref().unwrap_or("-"),
        "simulate request"
    );

    let started = Instant::now();
    let out = state.policy().compute(&manifest);
    metrics.compute_duration.observe(&[("mode", mode)], started.elapsed());

    metrics.simulate_modes.inc(&[("mode", mode)]);
    metrics.http_requests.inc(&[("route", ROUTE), ("outcome", outcome)]);

    tracing::debug!(
        traffic = out.traffic,
        co2 = out.co2,
        energy = out.energy,
        message = %out.message,
        "simulate response"
    );
    Json(out)
}
