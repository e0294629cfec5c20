//! Great-circle distance and travel-time estimation.
//!
//! Straight-line haversine distance stands in for road distance; travel
//! time assumes a fixed average speed. Every estimate produced here has
//! `is_road_distance = false`.

use crate::config::defaults::{AVERAGE_SPEED_KMH, EARTH_RADIUS_KM};
use crate::types::{Coordinate, DistanceEstimate};

/// Haversine distance between two coordinates in kilometres.
///
/// Symmetric, exactly zero when `a == b`, and finite for all finite
/// inputs (at most half the Earth's circumference).
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h just past 1 for antipodal points
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Minutes to cover `distance_km` at the default average EMS speed.
pub fn travel_time_min(distance_km: f64) -> f64 {
    distance_km / AVERAGE_SPEED_KMH * 60.0
}

/// Distance/time estimator with a configurable average speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelModel {
    average_speed_kmh: f64,
}

impl Default for TravelModel {
    fn default() -> Self {
        Self {
            average_speed_kmh: AVERAGE_SPEED_KMH,
        }
    }
}

impl TravelModel {
    /// `average_speed_kmh` must be positive; config validation enforces this.
    pub const fn new(average_speed_kmh: f64) -> Self {
        Self { average_speed_kmh }
    }

    pub const fn average_speed_kmh(&self) -> f64 {
        self.average_speed_kmh
    }

    pub fn travel_time_min(&self, distance_km: f64) -> f64 {
        distance_km / self.average_speed_kmh * 60.0
    }

    /// Distance and travel time from `from` to `to`.
    pub fn estimate(&self, from: Coordinate, to: Coordinate) -> DistanceEstimate {
        let distance_km = haversine_km(from, to);
        DistanceEstimate::great_circle(distance_km, self.travel_time_min(distance_km))
    }
}
