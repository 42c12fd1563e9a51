use std::net::SocketAddr;

use citysim_core::error::{CitySimError, Result};
use citysim_core::SimPolicy;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CitySimConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    /// Calculator weights and modifiers. Omitted fields keep their defaults.
    #[serde(default)]
    pub policy: SimPolicy,
}

impl Default for CitySimConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            policy: SimPolicy::default(),
        }
    }
}

impl CitySimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(CitySimError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.policy.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    #[serde(default)]
    pub cors: CorsSection,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_body_bytes: default_max_body_bytes(),
            cors: CorsSection::default(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(1024..=16 * 1024 * 1024).contains(&self.max_body_bytes) {
            return Err(CitySimError::BadRequest(
                "gateway.max_body_bytes must be between 1024 and 16777216".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            CitySimError::BadRequest(format!(
                "gateway.listen must be a valid socket address ({}): {e}",
                self.listen
            ))
        })
    }
}

/// Cross-origin policy for `/api/*`. The game client runs on another origin.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsSection {
    #[serde(default = "default_allow_any_origin")]
    pub allow_any_origin: bool,
}

impl Default for CorsSection {
    fn default() -> Self {
        Self { allow_any_origin: default_allow_any_origin() }
    }
}

fn default_listen() -> String {
    "0.0.0.0:5001".into()
}
fn default_max_body_bytes() -> usize {
    64 * 1024
}
fn default_allow_any_origin() -> bool {
    true
}
