//! System-wide default constants.
//!
//! Operational policy values used when no config file overrides them.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Geodesy
// ============================================================================

/// Mean Earth radius used by the haversine formula (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average urban EMS travel speed (km/h).
pub const AVERAGE_SPEED_KMH: f64 = 30.0;

// ============================================================================
// Response-Time Policy
// ============================================================================

/// Call-taking and unit assignment (minutes).
pub const DISPATCH_TIME_MIN: f64 = 2.0;

/// Assessment and stabilization at the scene (minutes).
pub const ON_SCENE_TIME_MIN: f64 = 10.0;

/// Patient transfer at the receiving hospital (minutes).
pub const HANDOVER_TIME_MIN: f64 = 5.0;

// ============================================================================
// Operating Region (Marikina City)
// ============================================================================

pub const REGION_LAT_MIN: f64 = 14.60;
pub const REGION_LAT_MAX: f64 = 14.68;
pub const REGION_LON_MIN: f64 = 121.07;
pub const REGION_LON_MAX: f64 = 121.13;

// ============================================================================
// Data Files
// ============================================================================

/// Hospital dataset, relative to the working directory.
pub const HOSPITALS_CSV: &str = "data/hospitals.csv";

/// Directory holding the encoder and classifier artifacts.
pub const MODEL_DIR: &str = "data/model";

/// File names inside `MODEL_DIR`.
pub const SEVERITY_ENCODER_FILE: &str = "severity_encoder.json";
pub const CONDITION_ENCODER_FILE: &str = "condition_encoder.json";
pub const CLASSIFIER_FILE: &str = "hospital_classifier.json";

// ============================================================================
// Validation
// ============================================================================

/// Speeds above this are accepted but flagged as suspicious (km/h).
pub const MAX_PLAUSIBLE_SPEED_KMH: f64 = 120.0;

/// Fixed time components above this are flagged as suspicious (minutes).
pub const MAX_PLAUSIBLE_FIXED_TIME_MIN: f64 = 120.0;
