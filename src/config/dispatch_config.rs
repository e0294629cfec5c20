//! Dispatch Configuration - operational policy as operator-tunable TOML values
//!
//! Each struct implements `Default` with the values in `config::defaults`,
//! so a missing file or a missing key keeps standard behavior.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::types::RegionBounds;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "EMS_DISPATCH_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "dispatch_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a dispatch deployment.
///
/// Load with `DispatchConfig::load()` which searches:
/// 1. `$EMS_DISPATCH_CONFIG` env var
/// 2. `./dispatch_config.toml`
/// 3. Built-in defaults, only when neither file exists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Service identification
    #[serde(default)]
    pub service: ServiceInfo,

    /// Fixed response-time components
    #[serde(default)]
    pub timing: TimingConfig,

    /// Travel-time model
    #[serde(default)]
    pub travel: TravelConfig,

    /// Operating region for patient coordinates
    #[serde(default)]
    pub region: RegionBounds,

    /// Reference data and model artifact locations
    #[serde(default)]
    pub data: DataConfig,
}

impl DispatchConfig {
    /// Load configuration using the standard search order.
    ///
    /// Defaults apply only when no config file exists. A file that is
    /// present but unreadable, malformed or out of range fails the load.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::load_with(explicit.as_deref(), Path::new(LOCAL_CONFIG_FILE))
    }

    /// Search order with the env override and local file passed in.
    ///
    /// An explicit path must exist; the local file is optional.
    pub fn load_with(explicit: Option<&Path>, local: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!(
                path = %path.display(),
                service = %config.service.name,
                "Loaded dispatch config from {}",
                CONFIG_ENV_VAR
            );
            return Ok(config);
        }

        if local.exists() {
            let config = Self::load_from_file(local)?;
            info!(
                path = %local.display(),
                service = %config.service.name,
                "Loaded dispatch config"
            );
            return Ok(config);
        }

        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    ///
    /// Unknown keys are logged as warnings; range errors fail the load.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate ranges, logging warnings and failing on errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Service Info
// ============================================================================

/// Identification metadata shown in logs and the health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default = "default_service_name")]
    pub name: String,

    #[serde(default = "default_region_name")]
    pub region_name: String,
}

fn default_service_name() -> String {
    "EMS Hospital Dispatch".to_string()
}
fn default_region_name() -> String {
    "Marikina City".to_string()
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            region_name: default_region_name(),
        }
    }
}

// ============================================================================
// Timing
// ============================================================================

/// Fixed operational time components (minutes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Call-taking and unit assignment
    #[serde(default = "default_dispatch_time")]
    pub dispatch_time_min: f64,

    /// Assessment and stabilization on scene
    #[serde(default = "default_on_scene_time")]
    pub on_scene_time_min: f64,

    /// Transfer of care at the hospital
    #[serde(default = "default_handover_time")]
    pub handover_time_min: f64,
}

fn default_dispatch_time() -> f64 {
    defaults::DISPATCH_TIME_MIN
}
fn default_on_scene_time() -> f64 {
    defaults::ON_SCENE_TIME_MIN
}
fn default_handover_time() -> f64 {
    defaults::HANDOVER_TIME_MIN
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            dispatch_time_min: default_dispatch_time(),
            on_scene_time_min: default_on_scene_time(),
            handover_time_min: default_handover_time(),
        }
    }
}

// ============================================================================
// Travel
// ============================================================================

/// Travel-time model parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelConfig {
    /// Average urban EMS speed used to turn distance into minutes
    #[serde(default = "default_average_speed")]
    pub average_speed_kmh: f64,
}

fn default_average_speed() -> f64 {
    defaults::AVERAGE_SPEED_KMH
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: default_average_speed(),
        }
    }
}

// ============================================================================
// Data
// ============================================================================

/// Locations of the hospital dataset and model artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_hospitals_csv")]
    pub hospitals_csv: PathBuf,

    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,
}

fn default_hospitals_csv() -> PathBuf {
    PathBuf::from(defaults::HOSPITALS_CSV)
}
fn default_model_dir() -> PathBuf {
    PathBuf::from(defaults::MODEL_DIR)
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            hospitals_csv: default_hospitals_csv(),
            model_dir: default_model_dir(),
        }
    }
}
