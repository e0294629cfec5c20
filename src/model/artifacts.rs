//! Model artifact bundle: both encoders plus the classifier.

use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::{CategoryEncoder, DecisionForest, HospitalClassifier, LabelEncoder, ModelError};
use crate::config::defaults::{CLASSIFIER_FILE, CONDITION_ENCODER_FILE, SEVERITY_ENCODER_FILE};

/// The trained components the orchestrator calls into.
///
/// Shared read-only across requests; implementations must not carry
/// per-request state.
#[derive(Clone)]
pub struct ModelSuite {
    pub severity: Arc<dyn CategoryEncoder>,
    pub condition: Arc<dyn CategoryEncoder>,
    pub classifier: Arc<dyn HospitalClassifier>,
}

impl fmt::Debug for ModelSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSuite").finish_non_exhaustive()
    }
}

impl ModelSuite {
    pub fn new(
        severity: impl CategoryEncoder + 'static,
        condition: impl CategoryEncoder + 'static,
        classifier: impl HospitalClassifier + 'static,
    ) -> Self {
        Self {
            severity: Arc::new(severity),
            condition: Arc::new(condition),
            classifier: Arc::new(classifier),
        }
    }

    /// Load `severity_encoder.json`, `condition_encoder.json` and
    /// `hospital_classifier.json` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        let severity: LabelEncoder = read_json(&dir.join(SEVERITY_ENCODER_FILE))?;
        let condition: LabelEncoder = read_json(&dir.join(CONDITION_ENCODER_FILE))?;
        let forest: DecisionForest = read_json(&dir.join(CLASSIFIER_FILE))?;

        info!(
            dir = %dir.display(),
            severity_classes = severity.classes().len(),
            condition_classes = condition.classes().len(),
            trees = forest.tree_count(),
            "Model artifacts loaded"
        );

        Ok(Self::new(severity, condition, forest))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let text =
        std::fs::read_to_string(path).map_err(|e| ModelError::Io(path.to_path_buf(), e))?;
    serde_json::from_str(&text).map_err(|e| ModelError::Parse(path.to_path_buf(), e))
}
