//! Gateway config loader (strict parsing).
//!
//! Lookup order: the file named by `CITYSIM_CONFIG`, then `citysim.yaml` in
//! the working directory, then built-in defaults.

pub mod schema;

use std::fs;
use std::path::Path;

use citysim_core::error::{CitySimError, Result};

pub use schema::{CitySimConfig, CorsSection, GatewaySection};

pub const CONFIG_ENV: &str = "CITYSIM_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "citysim.yaml";

pub fn load() -> Result<CitySimConfig> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return load_from_file(&path);
    }
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        return load_from_file(DEFAULT_CONFIG_PATH);
    }
    tracing::info!("no config file found; using built-in defaults");
    let cfg = CitySimConfig::default();
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_file(path: &str) -> Result<CitySimConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| CitySimError::Internal(format!("read config {path} failed: {e}")))?;
    let cfg = load_from_str(&s)?;
    tracing::info!(%path, "config loaded");
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<CitySimConfig> {
    let cfg: CitySimConfig = serde_yaml::from_str(s)
        .map_err(|e| CitySimError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
