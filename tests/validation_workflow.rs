use quote_crosscheck::crosscheck::{
    CategoryStatus, CrossCheckEngine, DriverStatus, ValidationConfig, ValidationReportView,
    ValidationRequest,
};
use std::path::PathBuf;

mod common {
    use super::*;

    pub fn fixture_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/three_drivers.json")
    }

    pub fn load_request() -> ValidationRequest {
        ValidationRequest::from_path(fixture_path()).expect("fixture parses")
    }

    pub fn run(request: ValidationRequest) -> ValidationReportView {
        let engine = CrossCheckEngine::new(ValidationConfig::default());
        engine.validate_inputs(&request.into_inputs()).to_view()
    }
}

#[test]
fn household_bundle_produces_expected_statuses() {
    let view = common::run(common::load_request());

    let statuses: Vec<DriverStatus> = view
        .drivers
        .iter()
        .map(|driver| driver.validation_status)
        .collect();
    assert_eq!(
        statuses,
        vec![DriverStatus::Pass, DriverStatus::Fail, DriverStatus::Warning]
    );

    assert_eq!(view.summary.total_drivers, 3);
    assert_eq!(view.summary.validated_drivers, 2);
    assert_eq!(view.summary.critical_errors, 1);
    assert_eq!(view.summary.warnings, 1);

    let bob = &view.drivers[1];
    assert_eq!(bob.mvr_validation.critical_errors.len(), 1);
    assert!(bob.mvr_validation.critical_errors[0].contains("C5555-12345-67899"));

    let carla = &view.drivers[2];
    assert_eq!(carla.mvr_validation.status, CategoryStatus::NotFound);
    assert_eq!(carla.dash_validation.status, CategoryStatus::Pass);
    assert!(carla.driver_training_validation.warnings[0].starts_with("DTC attachment reminder"));
}

#[test]
fn alice_matches_on_every_document() {
    let view = common::run(common::load_request());
    let alice = &view.drivers[0];

    assert_eq!(alice.driver_name, "Alice Martin");
    assert_eq!(alice.score, 100);
    assert!(alice
        .convictions_validation
        .matches
        .iter()
        .any(|detail| detail.starts_with("Conviction matched")));
    assert!(alice.dash_validation.critical_errors.is_empty());

    assert_eq!(view.vehicles.len(), 1);
    assert_eq!(view.vehicles[0].vin, "1HGCM82633A004352");
    assert_eq!(view.vehicles[0].vin_validation.status, CategoryStatus::Pass);
}

#[test]
fn no_dash_report_skips_dash_for_every_driver() {
    let mut request = common::load_request();
    request.no_dash_report = true;
    let view = common::run(request);

    for driver in &view.drivers {
        assert_eq!(driver.dash_validation.status, CategoryStatus::NotFound);
        assert_eq!(driver.dash_validation.score, 0);
    }
    // The licence typo is an MVR finding and survives without DASH.
    assert_eq!(view.summary.critical_errors, 1);
}

#[test]
fn repeated_runs_are_identical() {
    let first = common::run(common::load_request());
    let second = common::run(common::load_request());
    assert_eq!(first, second);
}

#[test]
fn report_serializes_with_reviewer_facing_labels() {
    let view = common::run(common::load_request());
    let json = serde_json::to_value(&view).expect("report serializes");

    assert_eq!(json["summary"]["total_drivers"], 3);
    assert_eq!(json["drivers"][1]["validation_status"], "FAIL");
    assert_eq!(json["drivers"][2]["mvr_validation"]["status"], "NOT_FOUND");
    assert_eq!(json["vehicles"][0]["vehicle_type"], "Sedan");
}

#[test]
fn malformed_bundle_is_an_intake_error() {
    let result = ValidationRequest::from_reader("{\"quote\": [".as_bytes());
    assert!(result.is_err());
}
