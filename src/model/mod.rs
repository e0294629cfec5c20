//! Hospital-selection model interface.
//!
//! The dispatch engine treats the trained model as two narrow capabilities:
//!
//! - [`CategoryEncoder`]: category label -> integer code (one per categorical feature)
//! - [`HospitalClassifier`]: [`FeatureVector`] -> hospital id
//!
//! Any model format can sit behind these traits. The formats shipped here
//! are [`LabelEncoder`] (sorted vocabulary) and [`DecisionForest`] (JSON
//! decision trees with majority vote), loaded together by [`ModelSuite::load`].

mod artifacts;
mod forest;
mod label_encoder;

pub use artifacts::ModelSuite;
pub use forest::{DecisionForest, DecisionTree, TreeNode};
pub use label_encoder::LabelEncoder;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::types::HospitalId;

// ============================================================================
// Capabilities
// ============================================================================

/// Maps a categorical value to the integer code the classifier was trained on.
pub trait CategoryEncoder: Send + Sync {
    /// Fails with [`UnknownCategory`] for a value outside the trained vocabulary.
    fn encode(&self, category: &str) -> Result<i64, UnknownCategory>;
}

/// Predicts the receiving hospital for a feature vector.
pub trait HospitalClassifier: Send + Sync {
    fn classify(&self, features: &FeatureVector) -> Result<HospitalId, PredictionError>;
}

// ============================================================================
// Feature Schema
// ============================================================================

/// Named features in the order the classifier was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Latitude,
    Longitude,
    Severity,
    Condition,
    DistanceToHospitalKm,
    ResponseTimeMin,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Latitude,
        Feature::Longitude,
        Feature::Severity,
        Feature::Condition,
        Feature::DistanceToHospitalKm,
        Feature::ResponseTimeMin,
    ];
}

/// Classifier input for one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub latitude: f64,
    pub longitude: f64,
    pub severity: i64,
    pub condition: i64,
    /// Distance to the nearest-ranked hospital
    pub distance_to_hospital_km: f64,
    /// Provisional total response time using the nearest hospital
    pub response_time_min: f64,
}

impl FeatureVector {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Latitude => self.latitude,
            Feature::Longitude => self.longitude,
            Feature::Severity => self.severity as f64,
            Feature::Condition => self.condition as f64,
            Feature::DistanceToHospitalKm => self.distance_to_hospital_km,
            Feature::ResponseTimeMin => self.response_time_min,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// The encoder has never seen this category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unseen category '{value}'")]
pub struct UnknownCategory {
    pub value: String,
}

/// The classifier could not produce a hospital id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PredictionError(pub String);

/// Model artifacts could not be loaded.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read model artifact {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Malformed model artifact {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    Invalid(String),
}
