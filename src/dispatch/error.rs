//! Dispatch error taxonomy.

use thiserror::Error;

use crate::registry::RegistryKind;
use crate::types::HospitalId;

/// Which encoder rejected a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Severity,
    Condition,
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryKind::Severity => write!(f, "severity"),
            CategoryKind::Condition => write!(f, "condition"),
        }
    }
}

/// How a transport layer should treat an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Startup or deployment problem; not retryable per request.
    Configuration,
    /// Bad caller input.
    InvalidInput,
    /// A model dependency failed.
    Dependency,
    /// Should be unreachable.
    Internal,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("{0} registry is empty")]
    EmptyRegistry(RegistryKind),

    #[error("Invalid {kind}: unseen category '{value}'")]
    UnknownCategory { kind: CategoryKind, value: String },

    #[error("Prediction error: {0}")]
    PredictionFailed(String),

    #[error("Hospital with ID {0} not found")]
    HospitalNotFound(HospitalId),
}

impl DispatchError {
    pub const fn class(&self) -> ErrorClass {
        match self {
            DispatchError::EmptyRegistry(_) => ErrorClass::Configuration,
            DispatchError::UnknownCategory { .. } => ErrorClass::InvalidInput,
            DispatchError::PredictionFailed(_) => ErrorClass::Dependency,
            DispatchError::HospitalNotFound(_) => ErrorClass::Internal,
        }
    }
}
