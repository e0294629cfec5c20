//! Reference data: EMS bases and hospitals

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Identifier of a hospital in the registry (and the classifier's output label).
pub type HospitalId = u32;

/// Identifier of an EMS base.
pub type BaseId = u32;

/// A staging location from which an ambulance unit is dispatched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmsBase {
    pub base_id: BaseId,
    pub base_name: String,
    pub coords: Coordinate,
}

impl EmsBase {
    pub fn new(
        base_id: BaseId,
        base_name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            base_id,
            base_name: base_name.into(),
            coords: Coordinate::new(latitude, longitude),
        }
    }
}

/// A receiving hospital.
///
/// `level` is the care level exactly as it appears in the dataset (e.g. "3").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    pub level: String,
    pub coords: Coordinate,
}

impl Hospital {
    pub fn new(
        id: HospitalId,
        name: impl Into<String>,
        level: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            level: level.into(),
            coords: Coordinate::new(latitude, longitude),
        }
    }
}
