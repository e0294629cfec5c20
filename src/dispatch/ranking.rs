//! Hospital candidate ranking.
//!
//! Hospitals are ranked by physical distance (not travel time) because the
//! classifier's `distance_to_hospital_km` feature was trained on the
//! distance-nearest hospital.

use super::DispatchError;
use crate::geo::TravelModel;
use crate::registry::RegistryKind;
use crate::types::{Candidate, Coordinate, Hospital, HospitalCandidate, HospitalId};

/// Every hospital with its estimate, ascending by `distance_km`.
///
/// The sort is stable, so equal distances keep registry order.
pub fn rank_hospitals(
    patient: Coordinate,
    hospitals: &[Hospital],
    travel: &TravelModel,
) -> Result<Vec<HospitalCandidate>, DispatchError> {
    if hospitals.is_empty() {
        return Err(DispatchError::EmptyRegistry(RegistryKind::Hospitals));
    }

    let mut ranked: Vec<HospitalCandidate> = hospitals
        .iter()
        .map(|h| Candidate::new(h.clone(), travel.estimate(patient, h.coords)))
        .collect();
    ranked.sort_by(|a, b| a.estimate.distance_km.total_cmp(&b.estimate.distance_km));
    Ok(ranked)
}

/// Head of a ranked list.
pub fn nearest(ranked: &[HospitalCandidate]) -> Option<&HospitalCandidate> {
    ranked.first()
}

/// Look up a hospital in a ranked list by id.
pub fn find_by_id(ranked: &[HospitalCandidate], id: HospitalId) -> Option<&HospitalCandidate> {
    ranked.iter().find(|c| c.site.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATIENT: Coordinate = Coordinate::new(14.65, 121.10);

    fn ranked_sample() -> Vec<HospitalCandidate> {
        rank_hospitals(PATIENT, &sample_hospitals(), &TravelModel::default()).unwrap()
    }

    fn sample_hospitals() -> Vec<Hospital> {
        vec![
            Hospital::new(1, "North", "2", 14.675, 121.10),
            Hospital::new(2, "Center", "3", 14.651, 121.10),
            Hospital::new(3, "South", "1", 14.605, 121.10),
            Hospital::new(4, "East", "2", 14.650, 121.12),
            Hospital::new(5, "Center Annex", "1", 14.651, 121.10),
        ]
    }

    #[test]
    fn test_ranked_ascending_and_complete() {
        let hospitals = sample_hospitals();
        let ranked = rank_hospitals(PATIENT, &hospitals, &TravelModel::default()).unwrap();

        assert_eq!(ranked.len(), hospitals.len());
        for pair in ranked.windows(2) {
            assert!(pair[0].estimate.distance_km <= pair[1].estimate.distance_km);
        }
        let mut ids: Vec<u32> = ranked.iter().map(|c| c.site.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_ties_keep_registry_order() {
        let ranked = ranked_sample();
        // 2 and 5 share coordinates; 2 comes first in the registry
        assert_eq!(ranked[0].site.id, 2);
        assert_eq!(ranked[1].site.id, 5);
        assert_eq!(nearest(&ranked).map(|c| c.site.id), Some(2));
    }

    #[test]
    fn test_empty_registry() {
        let err = rank_hospitals(PATIENT, &[], &TravelModel::default()).unwrap_err();
        assert_eq!(err, DispatchError::EmptyRegistry(RegistryKind::Hospitals));
    }

    #[test]
    fn test_find_by_id() {
        let ranked = ranked_sample();
        assert_eq!(find_by_id(&ranked, 4).map(|c| c.site.name.as_str()), Some("East"));
        assert!(find_by_id(&ranked, 9999).is_none());
    }
}
