//! Static reference data: EMS bases and hospitals.
//!
//! Both registries are loaded once at startup and never mutated afterwards.
//! The base list is fixed for this deployment; hospitals come from a CSV
//! dataset (see `hospital_csv`).

mod hospital_csv;

pub use hospital_csv::load_hospitals_csv;

use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::{EmsBase, Hospital, HospitalId};

/// Which registry an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    EmsBases,
    Hospitals,
}

impl std::fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryKind::EmsBases => write!(f, "EMS base"),
            RegistryKind::Hospitals => write!(f, "hospital"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("{}: missing required column '{}'", .0.display(), .1)]
    MissingColumn(PathBuf, &'static str),

    #[error("{}: no valid rows ({} bad, {} blank)", .path.display(), .errors, .blank)]
    NoRows {
        path: PathBuf,
        errors: usize,
        blank: usize,
    },

    #[error("duplicate hospital id {0} in registry")]
    DuplicateHospitalId(HospitalId),

    #[error("duplicate EMS base id {0} in registry")]
    DuplicateBaseId(u32),
}

// ============================================================================
// EMS Bases
// ============================================================================

/// The six Marikina EMS bases, in registry order.
pub fn marikina_ems_bases() -> Vec<EmsBase> {
    vec![
        EmsBase::new(163, "163 Base - Barangay Hall IVC", 14.627_021_8, 121.079_703_2),
        EmsBase::new(166, "166 Base - CHO Office, Barangay Sto.niño", 14.639_974_6, 121.096_597_3),
        EmsBase::new(167, "167 Base - Barangay Hall Kalumpang", 14.624_179, 121.093_323_9),
        EmsBase::new(
            164,
            "164 Base - DRRMO Building, Barangay Fortune",
            14.662_868_9,
            121.121_423_5,
        ),
        EmsBase::new(165, "165 Base - St. Benedict Barangay Nangka", 14.673_727_4, 121.108_795),
        EmsBase::new(169, "169 Base - Pugad Lawin, Barangay Fortune", 14.658_430_6, 121.131_204_8),
    ]
}

// ============================================================================
// Uniqueness
// ============================================================================

pub fn ensure_unique_hospital_ids(hospitals: &[Hospital]) -> Result<(), RegistryError> {
    let mut seen = HashSet::with_capacity(hospitals.len());
    for h in hospitals {
        if !seen.insert(h.id) {
            return Err(RegistryError::DuplicateHospitalId(h.id));
        }
    }
    Ok(())
}

pub fn ensure_unique_base_ids(bases: &[EmsBase]) -> Result<(), RegistryError> {
    let mut seen = HashSet::with_capacity(bases.len());
    for b in bases {
        if !seen.insert(b.base_id) {
            return Err(RegistryError::DuplicateBaseId(b.base_id));
        }
    }
    Ok(())
}
