//! Geographic primitives: Coordinate, DistanceEstimate

use serde::{Deserialize, Serialize};

/// A (latitude, longitude) pair in decimal degrees.
///
/// Serialized as a two-element array `[lat, lon]`, which is the `coords`
/// shape downstream map clients read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.latitude, c.longitude]
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Distance and travel time from the patient to a site.
///
/// `is_road_distance` is always `false` for great-circle estimates; a road
/// routing source would set it when it supplies the figures instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceEstimate {
    pub distance_km: f64,
    pub time_min: f64,
    pub is_road_distance: bool,
}

impl DistanceEstimate {
    /// Estimate derived from straight-line distance.
    pub const fn great_circle(distance_km: f64, time_min: f64) -> Self {
        Self {
            distance_km,
            time_min,
            is_road_distance: false,
        }
    }
}
