//! Metric calculator.
//!
//! Pipeline per call:
//! 1. aggregate building counts per zoning kind
//! 2. base metrics from capped linear combinations (or idle defaults when empty)
//! 3. apply the mode modifier and pick the status message
//! 4. clamp every metric to the policy floor
//!
//! Everything here is pure and total. Arithmetic saturates, so huge manifests
//! land on the caps instead of overflowing.

use crate::manifest::{BuildingCounts, BuildingEntry, BuildingKind, CityManifest, Mode};
use crate::metrics::MetricsResult;
use crate::policy::SimPolicy;

/// Greeting used when the manifest has no buildings to analyze.
pub const IDLE_MESSAGE: &str = "Hello from SmartCitySim! The API is working!";

/// Compute metrics with the default policy.
pub fn compute(manifest: &CityManifest) -> MetricsResult {
    SimPolicy::default().compute(manifest)
}

/// Sum counts per kind.
pub fn aggregate(entries: &[BuildingEntry]) -> BuildingCounts {
    entries.iter().fold(BuildingCounts::default(), |mut acc, e| {
        let slot = match e.kind {
            BuildingKind::Residential => &mut acc.residential,
            BuildingKind::Commercial => &mut acc.commercial,
            BuildingKind::Industrial => &mut acc.industrial,
        };
        *slot = slot.saturating_add(e.count);
        acc
    })
}

impl SimPolicy {
    pub fn compute(&self, manifest: &CityManifest) -> MetricsResult {
        let counts = aggregate(&manifest.buildings);
        if counts.total() == 0 {
            return MetricsResult {
                traffic: self.idle.traffic.max(self.floor),
                co2: self.idle.co2.max(self.floor),
                energy: self.idle.energy.max(self.floor),
                message: IDLE_MESSAGE.to_string(),
            };
        }

        let mut traffic = capped(
            self.traffic.base,
            &[
                (counts.commercial, self.traffic.commercial),
                (counts.industrial, self.traffic.industrial),
            ],
            self.traffic.cap,
        );
        let mut co2 = capped(
            self.co2.base,
            &[
                (counts.industrial, self.co2.industrial),
                (counts.commercial, self.co2.commercial),
            ],
            self.co2.cap,
        );
        let mut energy = capped(
            self.energy.base,
            &[
                (counts.residential, self.energy.residential),
                (counts.commercial, self.energy.commercial),
                (counts.industrial, self.energy.industrial),
            ],
            self.energy.cap,
        );

        let message = match manifest.mode {
            Mode::Eco => {
                co2 = reduce(co2, self.eco.co2_reduction, self.eco.co2_floor);
                energy = reduce(energy, self.eco.energy_reduction, self.eco.energy_floor);
                format!("Eco Mode Active: {counts}")
            }
            Mode::TrafficControl => {
                traffic = reduce(
                    traffic,
                    self.traffic_control.traffic_reduction,
                    self.traffic_control.traffic_floor,
                );
                format!("Traffic Control Active: {counts}")
            }
            Mode::Alert => {
                if traffic > self.alert.traffic_threshold || co2 > self.alert.co2_threshold {
                    format!("ALERT: congestion or emissions critical ({counts})")
                } else {
                    format!("Normal: all systems nominal ({counts})")
                }
            }
            Mode::Idle => format!("City Analyzed: {counts}"),
        };

        MetricsResult {
            traffic: traffic.max(self.floor),
            co2: co2.max(self.floor),
            energy: energy.max(self.floor),
            message,
        }
    }
}

/// `min(cap, base + sum(count * weight))`.
fn capped(base: u32, terms: &[(u64, u32)], cap: u32) -> u32 {
    let sum = terms.iter().fold(u64::from(base), |acc, &(count, weight)| {
        acc.saturating_add(count.saturating_mul(u64::from(weight)))
    });
    // bounded by cap, so the narrowing is lossless
    sum.min(u64::from(cap)) as u32
}

/// Subtract `delta`, stopping at `floor`. Never raises a value already below it.
fn reduce(value: u32, delta: u32, floor: u32) -> u32 {
    value.saturating_sub(delta).max(floor).min(value)
}
