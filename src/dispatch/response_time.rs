//! Response-time composition.

use crate::config::{defaults, TimingConfig};
use crate::types::TimeBreakdown;

/// Fixed operational components added to the two computed travel legs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseTimeModel {
    pub dispatch_time: f64,
    pub on_scene_time: f64,
    pub handover_time: f64,
}

impl Default for ResponseTimeModel {
    fn default() -> Self {
        Self {
            dispatch_time: defaults::DISPATCH_TIME_MIN,
            on_scene_time: defaults::ON_SCENE_TIME_MIN,
            handover_time: defaults::HANDOVER_TIME_MIN,
        }
    }
}

impl From<&TimingConfig> for ResponseTimeModel {
    fn from(t: &TimingConfig) -> Self {
        Self {
            dispatch_time: t.dispatch_time_min,
            on_scene_time: t.on_scene_time_min,
            handover_time: t.handover_time_min,
        }
    }
}

impl ResponseTimeModel {
    /// dispatch + to patient + on scene + to hospital + handover
    pub fn compose(&self, time_to_patient: f64, time_to_hospital: f64) -> TimeBreakdown {
        let total_time = self.dispatch_time
            + time_to_patient
            + self.on_scene_time
            + time_to_hospital
            + self.handover_time;

        TimeBreakdown {
            dispatch_time: self.dispatch_time,
            time_to_patient,
            on_scene_time: self.on_scene_time,
            time_to_hospital,
            handover_time: self.handover_time,
            total_time,
        }
    }
}
