//! Simulation output sent back to the client.

use serde::{Deserialize, Serialize};

/// Derived city-health numbers plus a status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsResult {
    /// Congestion, percent-like.
    pub traffic: u32,
    /// Emissions, percent-like.
    pub co2: u32,
    /// Energy draw (the client renders it as MW).
    pub energy: u32,
    pub message: String,
}
