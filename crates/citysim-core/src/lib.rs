//! citysim core: building manifests, lenient decoding, and the metric calculator.
//!
//! This crate owns everything that decides what numbers the client sees. It
//! carries no transport or runtime dependencies, so the calculator can be
//! driven from the HTTP gateway, from tests, or from any other host.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Manifest decoding normalizes bad input instead of failing, and the
//! calculator is total: every manifest produces a `MetricsResult`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod calculator;
pub mod error;
pub mod manifest;
pub mod metrics;
pub mod policy;

/// Shared result type.
pub use error::{CitySimError, Result};

pub use calculator::compute;
pub use manifest::{decode_manifest, BuildingCounts, BuildingEntry, BuildingKind, CityManifest, Mode};
pub use metrics::MetricsResult;
pub use policy::SimPolicy;
