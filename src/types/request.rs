//! Patient request types: Severity, Condition, PatientRequest
//!
//! Requests are validated once at construction. Anything that reaches the
//! dispatch engine is inside the operating region and uses a known
//! severity and condition.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use super::Coordinate;
use crate::config::defaults;

// ============================================================================
// Severity
// ============================================================================

/// Patient severity as reported by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    /// Category label as seen by the severity encoder.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = RequestError;

    /// Case-insensitive: "HIGH" and "High" both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str() == lower)
            .ok_or_else(|| RequestError::InvalidSeverity(s.to_string()))
    }
}

// ============================================================================
// Condition
// ============================================================================

/// Clinical condition category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Condition {
    #[serde(rename = "Minor injury")]
    MinorInjury,
    Fever,
    Laceration,
    Fracture,
    #[serde(rename = "Moderate respiratory distress")]
    ModerateRespiratoryDistress,
    #[serde(rename = "Abdominal pain")]
    AbdominalPain,
    #[serde(rename = "Heart attack")]
    HeartAttack,
    #[serde(rename = "Major trauma")]
    MajorTrauma,
    Stroke,
}

impl Condition {
    pub const ALL: [Condition; 9] = [
        Condition::MinorInjury,
        Condition::Fever,
        Condition::Laceration,
        Condition::Fracture,
        Condition::ModerateRespiratoryDistress,
        Condition::AbdominalPain,
        Condition::HeartAttack,
        Condition::MajorTrauma,
        Condition::Stroke,
    ];

    /// Category label as seen by the condition encoder.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::MinorInjury => "Minor injury",
            Condition::Fever => "Fever",
            Condition::Laceration => "Laceration",
            Condition::Fracture => "Fracture",
            Condition::ModerateRespiratoryDistress => "Moderate respiratory distress",
            Condition::AbdominalPain => "Abdominal pain",
            Condition::HeartAttack => "Heart attack",
            Condition::MajorTrauma => "Major trauma",
            Condition::Stroke => "Stroke",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = RequestError;

    /// Exact match only; condition labels are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| RequestError::InvalidCondition(s.to_string()))
    }
}

// ============================================================================
// Operating Region
// ============================================================================

/// Inclusive bounding box that patient coordinates must fall inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    #[serde(default = "default_lat_min")]
    pub lat_min: f64,
    #[serde(default = "default_lat_max")]
    pub lat_max: f64,
    #[serde(default = "default_lon_min")]
    pub lon_min: f64,
    #[serde(default = "default_lon_max")]
    pub lon_max: f64,
}

fn default_lat_min() -> f64 {
    defaults::REGION_LAT_MIN
}
fn default_lat_max() -> f64 {
    defaults::REGION_LAT_MAX
}
fn default_lon_min() -> f64 {
    defaults::REGION_LON_MIN
}
fn default_lon_max() -> f64 {
    defaults::REGION_LON_MAX
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self {
            lat_min: default_lat_min(),
            lat_max: default_lat_max(),
            lon_min: default_lon_min(),
            lon_max: default_lon_max(),
        }
    }
}

impl RegionBounds {
    pub fn contains(&self, c: &Coordinate) -> bool {
        (self.lat_min..=self.lat_max).contains(&c.latitude)
            && (self.lon_min..=self.lon_max).contains(&c.longitude)
    }
}

// ============================================================================
// Patient Request
// ============================================================================

/// A validated dispatch request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatientRequest {
    pub coords: Coordinate,
    pub severity: Severity,
    pub condition: Condition,
}

impl PatientRequest {
    /// Validate raw request fields against the operating region.
    pub fn new(
        latitude: f64,
        longitude: f64,
        severity: &str,
        condition: &str,
        region: &RegionBounds,
    ) -> Result<Self, RequestError> {
        let coords = Coordinate::new(latitude, longitude);
        if !coords.is_finite() {
            return Err(RequestError::NonFiniteCoordinate(coords));
        }
        if !(region.lat_min..=region.lat_max).contains(&latitude) {
            return Err(RequestError::OutOfRegion {
                field: "latitude",
                value: latitude,
                min: region.lat_min,
                max: region.lat_max,
            });
        }
        if !(region.lon_min..=region.lon_max).contains(&longitude) {
            return Err(RequestError::OutOfRegion {
                field: "longitude",
                value: longitude,
                min: region.lon_min,
                max: region.lon_max,
            });
        }

        Ok(Self {
            coords,
            severity: severity.parse()?,
            condition: condition.parse()?,
        })
    }
}

/// Invalid request input. Always a client error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("{field} = {value} is outside the operating region ({min}-{max})")]
    OutOfRegion {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("coordinate {0} is not finite")]
    NonFiniteCoordinate(Coordinate),

    #[error("severity must be one of [low, medium, high], got '{0}'")]
    InvalidSeverity(String),

    #[error("unknown condition '{0}'")]
    InvalidCondition(String),
}
