//! City manifest model and lenient decoding.
//!
//! The client is a trusted companion app, so bad fields are normalized
//! rather than rejected: unknown building types are dropped, and counts that
//! are absent, negative, or not numbers become zero. Only a body that is not
//! JSON at all is reported as an error, and callers decide what to do with it.

use std::fmt;

use serde_json::Value;

use crate::error::{CitySimError, Result};

/// Zoning category of a building entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildingKind {
    Residential,
    Commercial,
    Industrial,
}

impl BuildingKind {
    /// Parse a `type` tag. Trimmed and ASCII case-insensitive; `None` for
    /// anything that is not one of the three zoning categories.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("residential") {
            Some(BuildingKind::Residential)
        } else if s.eq_ignore_ascii_case("commercial") {
            Some(BuildingKind::Commercial)
        } else if s.eq_ignore_ascii_case("industrial") {
            Some(BuildingKind::Industrial)
        } else {
            None
        }
    }
}

/// One `{type, count}` pair from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingEntry {
    pub kind: BuildingKind,
    pub count: u64,
}

impl BuildingEntry {
    pub fn new(kind: BuildingKind, count: u64) -> Self {
        Self { kind, count }
    }
}

/// Operating mode selected by the client's smart-home panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Eco,
    TrafficControl,
    Alert,
    #[default]
    Idle,
}

impl Mode {
    /// Unknown tags fall back to `Idle`.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case("eco") {
            Mode::Eco
        } else if s.eq_ignore_ascii_case("traffic_control") {
            Mode::TrafficControl
        } else if s.eq_ignore_ascii_case("alert") {
            Mode::Alert
        } else {
            Mode::Idle
        }
    }

    /// Canonical wire tag (`""` for idle).
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Eco => "eco",
            Mode::TrafficControl => "traffic_control",
            Mode::Alert => "alert",
            Mode::Idle => "",
        }
    }

    /// Label used in logs and metric series, where an empty string reads badly.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            other => other.as_str(),
        }
    }
}

/// Per-kind building totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildingCounts {
    pub residential: u64,
    pub commercial: u64,
    pub industrial: u64,
}

impl BuildingCounts {
    pub fn total(&self) -> u64 {
        self.residential
            .saturating_add(self.commercial)
            .saturating_add(self.industrial)
    }
}

impl fmt::Display for BuildingCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}R {}C {}I", self.residential, self.commercial, self.industrial)
    }
}

/// One simulation request. Built per call and dropped after the response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CityManifest {
    pub buildings: Vec<BuildingEntry>,
    pub mode: Mode,
    /// Free-form layout tag sent by the client (e.g. `basic_grid`).
    /// Logged only; it never affects metrics.
    pub layout: Option<String>,
}

impl CityManifest {
    pub fn new(buildings: Vec<BuildingEntry>, mode: Mode) -> Self {
        Self { buildings, mode, layout: None }
    }

    /// Build a manifest from any JSON value. Never fails.
    ///
    /// The mode is read from `smartthings_mode`, falling back to `mode`.
    pub fn from_value(v: &Value) -> Self {
        let Some(obj) = v.as_object() else {
            tracing::debug!("manifest is not a json object; using empty manifest");
            return Self::default();
        };

        let buildings = match obj.get("buildings") {
            Some(Value::Array(items)) => items.iter().filter_map(entry_from_value).collect(),
            Some(_) => {
                tracing::debug!("manifest buildings is not an array; ignoring");
                Vec::new()
            }
            None => Vec::new(),
        };

        let mode = obj
            .get("smartthings_mode")
            .and_then(Value::as_str)
            .or_else(|| obj.get("mode").and_then(Value::as_str))
            .map(Mode::parse)
            .unwrap_or_default();

        let layout = obj.get("layout").and_then(Value::as_str).map(str::to_owned);

        Self { buildings, mode, layout }
    }
}

fn entry_from_value(v: &Value) -> Option<BuildingEntry> {
    let obj = v.as_object()?;
    let raw_type = obj.get("type").and_then(Value::as_str);
    let Some(kind) = raw_type.and_then(BuildingKind::parse) else {
        tracing::debug!(building_type = ?raw_type, "dropping unrecognized building type");
        return None;
    };
    Some(BuildingEntry::new(kind, normalize_count(obj.get("count"))))
}

/// Absent, negative, or non-numeric counts are zero; positive floats truncate.
fn normalize_count(v: Option<&Value>) -> u64 {
    let Some(Value::Number(n)) = v else {
        return 0;
    };
    if let Some(u) = n.as_u64() {
        return u;
    }
    if n.is_i64() {
        return 0;
    }
    match n.as_f64() {
        // `as` saturates at u64::MAX
        Some(f) if f.is_finite() && f > 0.0 => f.trunc() as u64,
        _ => 0,
    }
}

/// Decode a raw request body.
///
/// An empty or whitespace-only body is an empty manifest. Bytes that are not
/// JSON are a `BadRequest`; any valid JSON decodes leniently.
pub fn decode_manifest(body: &[u8]) -> Result<CityManifest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CityManifest::default());
    }
    let v: Value = serde_json::from_slice(body)
        .map_err(|e| CitySimError::BadRequest(format!("invalid manifest json: {e}")))?;
    Ok(CityManifest::from_value(&v))
}
