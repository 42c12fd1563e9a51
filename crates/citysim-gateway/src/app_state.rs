//! Shared application state for the citysim gateway.
//!
//! Built once at startup from the validated config and handed to the router.
//! Holds no simulation state: every `/api/simulate` call is independent.

use std::sync::Arc;

use citysim_core::error::Result;
use citysim_core::SimPolicy;

use crate::config::CitySimConfig;
use crate::obs::GatewayMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<GatewayMetrics>,
}

struct AppStateInner {
    cfg: CitySimConfig,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can report a bad config instead of panicking.
    pub fn new(cfg: CitySimConfig) -> Result<Self> {
        cfg.validate()?;

        tracing::debug!(policy = ?cfg.policy, "calculator policy");

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            metrics: Arc::new(GatewayMetrics::default()),
        })
    }

    pub fn cfg(&self) -> &CitySimConfig {
        &self.inner.cfg
    }

    pub fn policy(&self) -> &SimPolicy {
        &self.inner.cfg.policy
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.metrics
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    /// Flip `/readyz` to 503 ahead of graceful shutdown.
    pub fn begin_draining(&self) {
        self.metrics.set_draining();
        tracing::info!("draining; readiness now reports 503");
    }
}
