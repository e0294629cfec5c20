//! EMS Dispatch: ambulance base selection and hospital destination engine
//!
//! Given a patient location, severity and condition, picks the EMS base that
//! can reach the patient fastest, predicts a destination hospital with a
//! trained classifier, and estimates the end-to-end response time.
//!
//! ## Architecture
//!
//! - **Config**: TOML-driven timing, travel, region and data paths
//! - **Registry**: Fixed EMS base list and the hospital CSV loader
//! - **Geo**: Great-circle distance and constant-speed travel time
//! - **Model**: Label encoders and the decision-forest hospital classifier
//! - **Dispatch**: Nearest base, hospital ranking, response time, orchestration
//! - **Context**: Immutable startup state shared across requests

pub mod config;
pub mod context;
pub mod dispatch;
pub mod geo;
pub mod model;
pub mod registry;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, DispatchConfig};

// Re-export commonly used types
pub use types::{
    Condition, Coordinate, DispatchPlan, DistanceEstimate, EmsBase, Hospital, PatientRequest,
    RegionBounds, RequestError, Severity, TimeBreakdown,
};

// Re-export the engine
pub use context::{ContextError, DispatchContext, HealthReport, MapsSnapshot, RequestFailure};
pub use dispatch::{DispatchError, DispatchOrchestrator, ErrorClass, ResponseTimeModel};
pub use geo::{haversine_km, TravelModel};
pub use model::{CategoryEncoder, HospitalClassifier, ModelSuite};
