//! Dispatch Context - the immutable state built once at startup
//!
//! Holds the registries, model suite, travel model and timing policy.
//! Callers construct one `DispatchContext` and share it by reference
//! (or `Arc`) across requests; nothing in it changes after construction.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, DispatchConfig};
use crate::dispatch::{DispatchError, DispatchOrchestrator, ResponseTimeModel};
use crate::geo::TravelModel;
use crate::model::{ModelError, ModelSuite};
use crate::registry::{
    ensure_unique_base_ids, ensure_unique_hospital_ids, load_hospitals_csv, marikina_ems_bases,
    RegistryError, RegistryKind,
};
use crate::types::{DispatchPlan, EmsBase, Hospital, PatientRequest, RegionBounds, RequestError};

/// Startup failures.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Errors from a single request: bad input or a dispatch failure.
#[derive(Debug, Error)]
pub enum RequestFailure {
    #[error(transparent)]
    Invalid(#[from] RequestError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

#[derive(Debug)]
pub struct DispatchContext {
    service_name: String,
    bases: Arc<[EmsBase]>,
    hospitals: Arc<[Hospital]>,
    models: ModelSuite,
    travel: TravelModel,
    timing: ResponseTimeModel,
    region: RegionBounds,
    loaded_at: DateTime<Utc>,
}

impl DispatchContext {
    /// Assemble a context from already-loaded parts.
    ///
    /// Empty registries and duplicate ids are rejected here so they surface
    /// at startup rather than per request.
    pub fn new(
        bases: Vec<EmsBase>,
        hospitals: Vec<Hospital>,
        models: ModelSuite,
        config: &DispatchConfig,
    ) -> Result<Self, ContextError> {
        if bases.is_empty() {
            return Err(DispatchError::EmptyRegistry(RegistryKind::EmsBases).into());
        }
        if hospitals.is_empty() {
            return Err(DispatchError::EmptyRegistry(RegistryKind::Hospitals).into());
        }
        ensure_unique_base_ids(&bases)?;
        ensure_unique_hospital_ids(&hospitals)?;
        config.validate()?;

        let outside = hospitals
            .iter()
            .filter(|h| !config.region.contains(&h.coords))
            .count();
        if outside > 0 {
            warn!(
                count = outside,
                region = %config.service.region_name,
                "Hospitals located outside the operating region"
            );
        }

        Ok(Self {
            service_name: config.service.name.clone(),
            bases: bases.into(),
            hospitals: hospitals.into(),
            models,
            travel: TravelModel::new(config.travel.average_speed_kmh),
            timing: ResponseTimeModel::from(&config.timing),
            region: config.region,
            loaded_at: Utc::now(),
        })
    }

    /// Load hospitals and model artifacts from the paths in `config` and
    /// pair them with the fixed base registry.
    pub fn from_config(config: &DispatchConfig) -> Result<Self, ContextError> {
        let hospitals = load_hospitals_csv(&config.data.hospitals_csv)?;
        let models = ModelSuite::load(&config.data.model_dir)?;
        let bases = marikina_ems_bases();

        let ctx = Self::new(bases, hospitals, models, config)?;
        info!(
            service = %ctx.service_name,
            hospitals = ctx.hospitals.len(),
            ems_bases = ctx.bases.len(),
            speed_kmh = ctx.travel.average_speed_kmh(),
            "Dispatch context ready"
        );
        Ok(ctx)
    }

    fn orchestrator(&self) -> DispatchOrchestrator<'_> {
        DispatchOrchestrator {
            bases: &self.bases,
            hospitals: &self.hospitals,
            travel: &self.travel,
            timing: &self.timing,
        }
    }

    /// Plan a dispatch for an already-validated request.
    pub fn dispatch(&self, request: &PatientRequest) -> Result<DispatchPlan, DispatchError> {
        self.orchestrator().dispatch(request, &self.models)
    }

    /// Validate raw request fields against the operating region, then dispatch.
    pub fn dispatch_raw(
        &self,
        latitude: f64,
        longitude: f64,
        severity: &str,
        condition: &str,
    ) -> Result<DispatchPlan, RequestFailure> {
        let request = PatientRequest::new(latitude, longitude, severity, condition, &self.region)?;
        Ok(self.dispatch(&request)?)
    }

    pub fn bases(&self) -> &[EmsBase] {
        &self.bases
    }

    pub fn hospitals(&self) -> &[Hospital] {
        &self.hospitals
    }

    pub const fn region(&self) -> &RegionBounds {
        &self.region
    }

    pub const fn travel(&self) -> &TravelModel {
        &self.travel
    }

    pub const fn timing(&self) -> &ResponseTimeModel {
        &self.timing
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: "healthy",
            service: self.service_name.clone(),
            model_loaded: true,
            encoders_loaded: true,
            hospitals_loaded: !self.hospitals.is_empty(),
            ems_bases_loaded: !self.bases.is_empty(),
            total_hospitals: self.hospitals.len(),
            total_ems_bases: self.bases.len(),
            loaded_at: self.loaded_at,
            checked_at: Utc::now(),
        }
    }

    /// Every hospital and base, for map display.
    pub fn maps(&self) -> MapsSnapshot {
        MapsSnapshot {
            hospitals: self
                .hospitals
                .iter()
                .map(|h| HospitalMarker {
                    id: h.id,
                    name: h.name.clone(),
                    level: h.level.clone(),
                    latitude: h.coords.latitude,
                    longitude: h.coords.longitude,
                    coords: [h.coords.latitude, h.coords.longitude],
                })
                .collect(),
            ems_bases: self
                .bases
                .iter()
                .map(|b| BaseMarker {
                    base_id: b.base_id,
                    base_name: b.base_name.clone(),
                    latitude: b.coords.latitude,
                    longitude: b.coords.longitude,
                    coords: [b.coords.latitude, b.coords.longitude],
                })
                .collect(),
        }
    }
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: String,
    pub model_loaded: bool,
    pub encoders_loaded: bool,
    pub hospitals_loaded: bool,
    pub ems_bases_loaded: bool,
    pub total_hospitals: usize,
    pub total_ems_bases: usize,
    pub loaded_at: DateTime<Utc>,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HospitalMarker {
    pub id: u32,
    pub name: String,
    pub level: String,
    pub latitude: f64,
    pub longitude: f64,
    pub coords: [f64; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct BaseMarker {
    pub base_id: u32,
    pub base_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub coords: [f64; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct MapsSnapshot {
    pub hospitals: Vec<HospitalMarker>,
    pub ems_bases: Vec<BaseMarker>,
}
