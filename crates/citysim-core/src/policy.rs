//! Calculator policy: weights, caps, mode modifiers, and floors.
//!
//! `SimPolicy::default()` is the canonical rule set. The gateway can override
//! any field from its YAML config; every section is optional and unknown keys
//! are rejected.

use serde::Deserialize;

use crate::error::{CitySimError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimPolicy {
    pub traffic: TrafficWeights,
    pub co2: Co2Weights,
    pub energy: EnergyWeights,
    pub eco: EcoModifier,
    pub traffic_control: TrafficControlModifier,
    pub alert: AlertThresholds,
    /// Metrics reported when the manifest holds no buildings.
    pub idle: IdleDefaults,
    /// Lower bound applied to every metric after mode modifiers.
    pub floor: u32,
}

impl Default for SimPolicy {
    fn default() -> Self {
        Self {
            traffic: TrafficWeights::default(),
            co2: Co2Weights::default(),
            energy: EnergyWeights::default(),
            eco: EcoModifier::default(),
            traffic_control: TrafficControlModifier::default(),
            alert: AlertThresholds::default(),
            idle: IdleDefaults::default(),
            floor: 5,
        }
    }
}

impl SimPolicy {
    pub fn validate(&self) -> Result<()> {
        let caps = [
            ("policy.traffic.cap", self.traffic.cap),
            ("policy.co2.cap", self.co2.cap),
            ("policy.energy.cap", self.energy.cap),
        ];
        for (name, cap) in caps {
            if cap < self.floor {
                return Err(CitySimError::BadRequest(format!(
                    "{name} ({cap}) must not be below policy.floor ({})",
                    self.floor
                )));
            }
        }

        let idle = [
            ("policy.idle.traffic", self.idle.traffic),
            ("policy.idle.co2", self.idle.co2),
            ("policy.idle.energy", self.idle.energy),
        ];
        for (name, v) in idle {
            if v < self.floor {
                return Err(CitySimError::BadRequest(format!(
                    "{name} ({v}) must not be below policy.floor ({})",
                    self.floor
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrafficWeights {
    pub base: u32,
    pub cap: u32,
    pub commercial: u32,
    pub industrial: u32,
}

impl Default for TrafficWeights {
    fn default() -> Self {
        Self { base: 30, cap: 95, commercial: 3, industrial: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Co2Weights {
    pub base: u32,
    pub cap: u32,
    pub commercial: u32,
    pub industrial: u32,
}

impl Default for Co2Weights {
    fn default() -> Self {
        Self { base: 20, cap: 90, commercial: 3, industrial: 8 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnergyWeights {
    pub base: u32,
    pub cap: u32,
    pub residential: u32,
    pub commercial: u32,
    pub industrial: u32,
}

impl Default for EnergyWeights {
    fn default() -> Self {
        Self { base: 25, cap: 85, residential: 2, commercial: 4, industrial: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EcoModifier {
    pub co2_reduction: u32,
    pub co2_floor: u32,
    pub energy_reduction: u32,
    pub energy_floor: u32,
}

impl Default for EcoModifier {
    fn default() -> Self {
        Self { co2_reduction: 15, co2_floor: 10, energy_reduction: 10, energy_floor: 15 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrafficControlModifier {
    pub traffic_reduction: u32,
    pub traffic_floor: u32,
}

impl Default for TrafficControlModifier {
    fn default() -> Self {
        Self { traffic_reduction: 25, traffic_floor: 20 }
    }
}

/// Alert fires when a metric is strictly above its threshold.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlertThresholds {
    pub traffic_threshold: u32,
    pub co2_threshold: u32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self { traffic_threshold: 70, co2_threshold: 60 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdleDefaults {
    pub traffic: u32,
    pub co2: u32,
    pub energy: u32,
}

impl Default for IdleDefaults {
    fn default() -> Self {
        Self { traffic: 25, co2: 20, energy: 30 }
    }
}
