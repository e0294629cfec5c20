//! Dispatch Scenario Tests
//!
//! End-to-end dispatches through `DispatchContext` with stub classifiers
//! and the bundled sample data.

use ems_dispatch::dispatch::{rank_hospitals, CategoryKind};
use ems_dispatch::model::{FeatureVector, LabelEncoder, PredictionError};
use ems_dispatch::registry::marikina_ems_bases;
use ems_dispatch::{
    haversine_km, Coordinate, DispatchConfig, DispatchContext, DispatchError, ErrorClass, Hospital,
    HospitalClassifier, ModelSuite, PatientRequest, RegionBounds, RequestError, RequestFailure,
    TravelModel,
};

// ============================================================================
// Fixtures
// ============================================================================

/// Always predicts the same hospital.
struct FixedClassifier(u32);

impl HospitalClassifier for FixedClassifier {
    fn classify(&self, _features: &FeatureVector) -> Result<u32, PredictionError> {
        Ok(self.0)
    }
}

/// Always fails.
struct BrokenClassifier;

impl HospitalClassifier for BrokenClassifier {
    fn classify(&self, _features: &FeatureVector) -> Result<u32, PredictionError> {
        Err(PredictionError("model backend unavailable".to_string()))
    }
}

fn sample_hospitals() -> Vec<Hospital> {
    vec![
        Hospital::new(
            1,
            "Amang Rodriguez Memorial Medical Center",
            "3",
            14.636_102_5,
            121.098_444_5,
        ),
        Hospital::new(2, "Valley Hospital", "2", 14.631_2, 121.097_5),
        Hospital::new(3, "Riverside Clinic", "1", 14.660_0, 121.105_0),
        Hospital::new(4, "Fortune General", "2", 14.662_0, 121.120_0),
        Hospital::new(5, "Nangka Medical", "1", 14.672_0, 121.109_0),
    ]
}

fn severity_encoder() -> LabelEncoder {
    LabelEncoder::new(["low", "medium", "high"]).unwrap()
}

fn condition_encoder() -> LabelEncoder {
    LabelEncoder::new([
        "Minor injury",
        "Fever",
        "Laceration",
        "Fracture",
        "Moderate respiratory distress",
        "Abdominal pain",
        "Heart attack",
        "Major trauma",
        "Stroke",
    ])
    .unwrap()
}

fn context_with(classifier: impl HospitalClassifier + 'static) -> DispatchContext {
    let models = ModelSuite::new(severity_encoder(), condition_encoder(), classifier);
    DispatchContext::new(
        marikina_ems_bases(),
        sample_hospitals(),
        models,
        &DispatchConfig::default(),
    )
    .unwrap()
}

fn request(lat: f64, lon: f64, severity: &str, condition: &str) -> PatientRequest {
    PatientRequest::new(lat, lon, severity, condition, &RegionBounds::default()).unwrap()
}

// ============================================================================
// Base selection
// ============================================================================

#[test]
fn central_patient_is_served_from_base_166() {
    let ctx = context_with(FixedClassifier(1));
    let plan = ctx.dispatch(&request(14.65, 121.10, "high", "Heart attack")).unwrap();

    assert_eq!(plan.ems_base.site.base_id, 166);
    assert!((plan.ems_base.estimate.distance_km - 1.173_340_402_649_673_2).abs() < 1e-9);
    assert!((plan.ems_base.estimate.time_min - 2.346_680_805_299_346).abs() < 1e-9);
    assert!(!plan.ems_base.estimate.is_road_distance);
    assert_eq!(plan.time_components.time_to_patient, plan.ems_base.estimate.time_min);
}

#[test]
fn chosen_base_is_never_slower_than_any_other() {
    let ctx = context_with(FixedClassifier(1));
    let travel = TravelModel::default();
    for (lat, lon) in [(14.60, 121.07), (14.68, 121.13), (14.627, 121.0797), (14.66, 121.12)] {
        let patient = Coordinate::new(lat, lon);
        let plan = ctx.dispatch(&request(lat, lon, "low", "Fever")).unwrap();
        for base in ctx.bases() {
            let t = travel.travel_time_min(haversine_km(base.coords, patient));
            assert!(plan.ems_base.estimate.time_min <= t + 1e-12);
        }
    }
}

// ============================================================================
// Hospital resolution
// ============================================================================

#[test]
fn predicted_hospital_is_used_when_registered() {
    let ctx = context_with(FixedClassifier(4));
    let plan = ctx.dispatch(&request(14.65, 121.10, "medium", "Fracture")).unwrap();

    assert_eq!(plan.hospital.site.id, 4);
    assert!(!plan.is_fallback);

    // Final time_to_hospital is the predicted hospital's travel time,
    // not the nearest hospital's.
    let expected = TravelModel::default().travel_time_min(haversine_km(
        Coordinate::new(14.65, 121.10),
        Coordinate::new(14.662, 121.12),
    ));
    assert!((plan.time_components.time_to_hospital - expected).abs() < 1e-9);
    assert!((plan.hospital.estimate.time_min - expected).abs() < 1e-9);
}

#[test]
fn unknown_prediction_falls_back_to_nearest_hospital() {
    let ctx = context_with(FixedClassifier(9999));
    let patient = Coordinate::new(14.65, 121.10);
    let plan = ctx.dispatch(&request(14.65, 121.10, "high", "Stroke")).unwrap();

    let ranked = rank_hospitals(patient, &sample_hospitals(), &TravelModel::default()).unwrap();
    assert!(plan.is_fallback);
    assert_eq!(plan.hospital, ranked[0]);
    assert_eq!(plan.time_components.time_to_hospital, ranked[0].estimate.time_min);
}

#[test]
fn total_time_is_the_sum_of_components() {
    let ctx = context_with(FixedClassifier(2));
    let plan = ctx.dispatch(&request(14.61, 121.08, "low", "Laceration")).unwrap();
    let t = plan.time_components;

    assert_eq!(t.dispatch_time, 2.0);
    assert_eq!(t.on_scene_time, 10.0);
    assert_eq!(t.handover_time, 5.0);
    let sum = t.dispatch_time
        + t.time_to_patient
        + t.on_scene_time
        + t.time_to_hospital
        + t.handover_time;
    assert!((t.total_time - sum).abs() < 1e-9);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn classifier_failure_is_a_dependency_error() {
    let ctx = context_with(BrokenClassifier);
    let err = ctx.dispatch(&request(14.65, 121.10, "high", "Stroke")).unwrap_err();

    assert_eq!(err, DispatchError::PredictionFailed("model backend unavailable".to_string()));
    assert_eq!(err.class(), ErrorClass::Dependency);
}

#[test]
fn category_missing_from_encoder_vocabulary_is_rejected() {
    // Encoder trained without "Stroke"
    let condition = LabelEncoder::new(["Fever", "Fracture", "Heart attack"]).unwrap();
    let models = ModelSuite::new(severity_encoder(), condition, FixedClassifier(1));
    let ctx = DispatchContext::new(
        marikina_ems_bases(),
        sample_hospitals(),
        models,
        &DispatchConfig::default(),
    )
    .unwrap();

    let err = ctx.dispatch(&request(14.65, 121.10, "high", "Stroke")).unwrap_err();
    assert_eq!(
        err,
        DispatchError::UnknownCategory {
            kind: CategoryKind::Condition,
            value: "Stroke".to_string(),
        }
    );
    assert_eq!(err.class(), ErrorClass::InvalidInput);
}

#[test]
fn invalid_severity_is_rejected_before_dispatch() {
    let ctx = context_with(FixedClassifier(1));
    match ctx.dispatch_raw(14.65, 121.10, "purple", "Stroke") {
        Err(RequestFailure::Invalid(RequestError::InvalidSeverity(s))) => assert_eq!(s, "purple"),
        other => panic!("expected InvalidSeverity, got {other:?}"),
    }
}

#[test]
fn out_of_region_coordinates_are_rejected() {
    let ctx = context_with(FixedClassifier(1));
    match ctx.dispatch_raw(14.70, 121.10, "high", "Stroke") {
        Err(RequestFailure::Invalid(RequestError::OutOfRegion { field, .. })) => {
            assert_eq!(field, "latitude")
        }
        other => panic!("expected OutOfRegion, got {other:?}"),
    }
}

#[test]
fn empty_hospital_registry_fails_at_startup() {
    let models = ModelSuite::new(severity_encoder(), condition_encoder(), FixedClassifier(1));
    let err = DispatchContext::new(
        marikina_ems_bases(),
        Vec::new(),
        models,
        &DispatchConfig::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("hospital registry is empty"));
}

// ============================================================================
// Determinism and concurrency
// ============================================================================

#[test]
fn repeated_dispatch_is_identical() {
    let ctx = context_with(FixedClassifier(3));
    let req = request(14.64, 121.09, "medium", "Abdominal pain");
    let first = ctx.dispatch(&req).unwrap();
    for _ in 0..10 {
        assert_eq!(ctx.dispatch(&req).unwrap(), first);
    }
}

#[test]
fn concurrent_dispatches_match_sequential_results() {
    let ctx = context_with(FixedClassifier(9999));
    let requests: Vec<PatientRequest> = (0..16)
        .map(|i| {
            let step = f64::from(i) / 16.0;
            request(14.60 + 0.08 * step, 121.07 + 0.06 * step, "high", "Major trauma")
        })
        .collect();
    let sequential: Vec<_> = requests.iter().map(|r| ctx.dispatch(r).unwrap()).collect();

    let concurrent: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = requests
            .iter()
            .map(|r| {
                let ctx = &ctx;
                s.spawn(move || ctx.dispatch(r).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, concurrent);
}

// ============================================================================
// Wire shape and bundled data
// ============================================================================

#[test]
fn plan_json_has_downstream_field_names() {
    let ctx = context_with(FixedClassifier(9999));
    let plan = ctx.dispatch(&request(14.65, 121.10, "high", "Heart attack")).unwrap();
    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["ems_base"]["base_id"], 166);
    assert_eq!(json["ems_base"]["is_road_distance"], false);
    assert!(json["hospital"]["coords"].is_array());
    assert!(json["hospital"]["distance_km"].is_number());
    assert!(json["time_components"]["total_time"].is_number());
    assert_eq!(json["is_fallback_calculation"], true);
}

#[test]
fn bundled_data_dispatches_end_to_end() {
    let ctx = DispatchContext::from_config(&DispatchConfig::default()).unwrap();
    let plan = ctx.dispatch_raw(14.65, 121.10, "high", "Heart attack").unwrap();

    assert_eq!(plan.ems_base.site.base_id, 166);
    assert!(ctx.hospitals().iter().any(|h| h.id == plan.hospital.site.id));

    let health = ctx.health();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.total_ems_bases, 6);
    assert_eq!(health.total_hospitals, ctx.hospitals().len());

    let maps = ctx.maps();
    assert_eq!(maps.ems_bases.len(), 6);
    assert_eq!(maps.ems_bases[0].base_id, 163);
}
