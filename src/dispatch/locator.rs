//! Nearest EMS base selection.

use tracing::debug;

use super::DispatchError;
use crate::geo::TravelModel;
use crate::registry::RegistryKind;
use crate::types::{BaseCandidate, Candidate, Coordinate, EmsBase};

/// The base with the smallest travel time to the patient.
///
/// Selection is keyed on `time_min`, not distance. On equal times the base
/// that comes first in registry order wins.
pub fn nearest_base(
    patient: Coordinate,
    bases: &[EmsBase],
    travel: &TravelModel,
) -> Result<BaseCandidate, DispatchError> {
    let mut best: Option<BaseCandidate> = None;

    for base in bases {
        let estimate = travel.estimate(base.coords, patient);
        if best
            .as_ref()
            .map_or(true, |b| estimate.time_min < b.estimate.time_min)
        {
            best = Some(Candidate::new(base.clone(), estimate));
        }
    }

    let best = best.ok_or(DispatchError::EmptyRegistry(RegistryKind::EmsBases))?;
    debug!(
        base_id = best.site.base_id,
        distance_km = best.estimate.distance_km,
        time_min = best.estimate.time_min,
        "Nearest EMS base selected"
    );
    Ok(best)
}
