//! Dispatch output: TimeBreakdown, DispatchPlan
//!
//! `DispatchPlan` serializes to the response body downstream consumers read:
//!
//! ```json
//! {
//!   "hospital": { "id": 1, "name": "...", "level": "3", "coords": [14.63, 121.09],
//!                 "distance_km": 1.55 },
//!   "ems_base": { "base_id": 166, "base_name": "...", "coords": [..], "distance_km": 1.17,
//!                 "time_min": 2.35, "is_road_distance": false },
//!   "time_components": { "dispatch_time": 2.0, "time_to_patient": 2.35, "on_scene_time": 10.0,
//!                        "time_to_hospital": 3.1, "handover_time": 5.0, "total_time": 22.45 },
//!   "is_fallback_calculation": false
//! }
//! ```

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::{Coordinate, DistanceEstimate, EmsBase, Hospital};

/// Response-time components in minutes. `total_time` is the sum of the other five.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeBreakdown {
    pub dispatch_time: f64,
    pub time_to_patient: f64,
    pub on_scene_time: f64,
    pub time_to_hospital: f64,
    pub handover_time: f64,
    pub total_time: f64,
}

/// A site paired with its distance/time from the patient.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<T> {
    pub site: T,
    pub estimate: DistanceEstimate,
}

impl<T> Candidate<T> {
    pub const fn new(site: T, estimate: DistanceEstimate) -> Self {
        Self { site, estimate }
    }
}

pub type HospitalCandidate = Candidate<Hospital>;
pub type BaseCandidate = Candidate<EmsBase>;

/// The combined decision for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchPlan {
    pub hospital: HospitalCandidate,
    pub ems_base: BaseCandidate,
    pub time_components: TimeBreakdown,
    /// The classifier's hospital could not be matched and the nearest hospital was used.
    pub is_fallback: bool,
}

// ============================================================================
// Wire shape
// ============================================================================

#[derive(serde::Serialize)]
struct HospitalBlock<'a> {
    id: u32,
    name: &'a str,
    level: &'a str,
    coords: Coordinate,
    distance_km: f64,
}

#[derive(serde::Serialize)]
struct EmsBaseBlock<'a> {
    base_id: u32,
    base_name: &'a str,
    coords: Coordinate,
    distance_km: f64,
    time_min: f64,
    is_road_distance: bool,
}

impl Serialize for DispatchPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let hospital = HospitalBlock {
            id: self.hospital.site.id,
            name: &self.hospital.site.name,
            level: &self.hospital.site.level,
            coords: self.hospital.site.coords,
            distance_km: self.hospital.estimate.distance_km,
        };
        let ems_base = EmsBaseBlock {
            base_id: self.ems_base.site.base_id,
            base_name: &self.ems_base.site.base_name,
            coords: self.ems_base.site.coords,
            distance_km: self.ems_base.estimate.distance_km,
            time_min: self.ems_base.estimate.time_min,
            is_road_distance: self.ems_base.estimate.is_road_distance,
        };

        let mut s = serializer.serialize_struct("DispatchPlan", 4)?;
        s.serialize_field("hospital", &hospital)?;
        s.serialize_field("ems_base", &ems_base)?;
        s.serialize_field("time_components", &self.time_components)?;
        s.serialize_field("is_fallback_calculation", &self.is_fallback)?;
        s.end()
    }
}
