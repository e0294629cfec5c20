//! Dispatch Orchestrator - combines base selection, hospital ranking and
//! the classifier into one dispatch plan.
//!
//! ## Flow
//!
//! 1. Nearest EMS base by travel time
//! 2. Rank every hospital by distance
//! 3. Provisional breakdown with the nearest hospital (classifier features)
//! 4. Encode severity and condition, classify
//! 5. Resolve the predicted id against the ranked list; fall back to the
//!    nearest hospital when it is absent
//! 6. Final breakdown with the resolved hospital's travel time
//!
//! The orchestrator only borrows shared read-only state, so any number of
//! dispatches can run concurrently.

use tracing::{debug, info, warn};

use super::error::CategoryKind;
use super::locator::nearest_base;
use super::ranking::{find_by_id, nearest, rank_hospitals};
use super::{DispatchError, ResponseTimeModel};
use crate::geo::TravelModel;
use crate::model::{FeatureVector, ModelSuite};
use crate::registry::RegistryKind;
use crate::types::{DispatchPlan, EmsBase, Hospital, HospitalCandidate, HospitalId, PatientRequest};

/// Borrowed view of everything a dispatch needs.
#[derive(Debug, Clone, Copy)]
pub struct DispatchOrchestrator<'a> {
    pub bases: &'a [EmsBase],
    pub hospitals: &'a [Hospital],
    pub travel: &'a TravelModel,
    pub timing: &'a ResponseTimeModel,
}

impl DispatchOrchestrator<'_> {
    pub fn dispatch(
        &self,
        request: &PatientRequest,
        models: &ModelSuite,
    ) -> Result<DispatchPlan, DispatchError> {
        let patient = request.coords;

        let ems_base = nearest_base(patient, self.bases, self.travel)?;
        let ranked = rank_hospitals(patient, self.hospitals, self.travel)?;
        let closest = nearest(&ranked)
            .ok_or(DispatchError::EmptyRegistry(RegistryKind::Hospitals))?;

        let provisional = self
            .timing
            .compose(ems_base.estimate.time_min, closest.estimate.time_min);

        let severity = models
            .severity
            .encode(request.severity.as_str())
            .map_err(|e| DispatchError::UnknownCategory {
                kind: CategoryKind::Severity,
                value: e.value,
            })?;
        let condition = models
            .condition
            .encode(request.condition.as_str())
            .map_err(|e| DispatchError::UnknownCategory {
                kind: CategoryKind::Condition,
                value: e.value,
            })?;

        let features = FeatureVector {
            latitude: patient.latitude,
            longitude: patient.longitude,
            severity,
            condition,
            distance_to_hospital_km: closest.estimate.distance_km,
            response_time_min: provisional.total_time,
        };
        debug!(?features, "Classifier features assembled");

        let predicted_id = models
            .classifier
            .classify(&features)
            .map_err(|e| DispatchError::PredictionFailed(e.0))?;

        let (hospital, is_fallback) = resolve_hospital(&ranked, predicted_id)?;

        let time_components = self
            .timing
            .compose(ems_base.estimate.time_min, hospital.estimate.time_min);

        info!(
            hospital_id = hospital.site.id,
            base_id = ems_base.site.base_id,
            severity = %request.severity,
            condition = %request.condition,
            total_time = time_components.total_time,
            is_fallback,
            "Dispatch plan ready"
        );

        Ok(DispatchPlan {
            hospital,
            ems_base,
            time_components,
            is_fallback,
        })
    }
}

/// Match the predicted id against the ranked list.
///
/// A miss falls back to the nearest-ranked hospital and reports
/// `is_fallback = true`. `HospitalNotFound` is returned only when the
/// ranked list is empty as well.
pub fn resolve_hospital(
    ranked: &[HospitalCandidate],
    predicted_id: HospitalId,
) -> Result<(HospitalCandidate, bool), DispatchError> {
    if let Some(found) = find_by_id(ranked, predicted_id) {
        return Ok((found.clone(), false));
    }

    let fallback = nearest(ranked).ok_or(DispatchError::HospitalNotFound(predicted_id))?;
    warn!(
        predicted_id,
        fallback_id = fallback.site.id,
        "Predicted hospital not in registry, using nearest hospital"
    );
    Ok((fallback.clone(), true))
}
