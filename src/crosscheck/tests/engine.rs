use super::common::*;
use crate::crosscheck::config::{ValidationConfig, ValidationOptions};
use crate::crosscheck::domain::QuoteRecords;
use crate::crosscheck::engine::{validate, CrossCheckEngine};
use crate::crosscheck::rules::{Category, CategoryStatus, CheckField, CheckOutcome};
use crate::crosscheck::scoring::DriverStatus;

fn run(options: &ValidationOptions) -> crate::crosscheck::report::ValidationReport {
    validate(
        &household_quote(),
        &household_mvrs(),
        &household_dashes(),
        options,
    )
}

#[test]
fn household_statuses_follow_the_worst_finding() {
    let report = run(&ValidationOptions::default());

    let statuses: Vec<DriverStatus> = report.drivers().iter().map(|d| d.status()).collect();
    assert_eq!(
        statuses,
        vec![DriverStatus::Pass, DriverStatus::Fail, DriverStatus::Warning]
    );

    let summary = report.summary();
    assert_eq!(summary.total_drivers, 3);
    assert_eq!(summary.validated_drivers, 2);
    assert_eq!(summary.critical_errors, 1);
    assert_eq!(summary.warnings, 1);
}

#[test]
fn licence_typo_is_the_only_critical_finding() {
    let report = run(&ValidationOptions::default());
    let bob = &report.drivers()[1];

    let mvr = bob.category(Category::Mvr).expect("mvr category present");
    let critical: Vec<_> = mvr.critical_errors().collect();
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0].field, CheckField::LicenceNumber);
    assert!(critical[0].detail.contains("C5555-12345-67890"));
    assert!(critical[0].detail.contains("C5555-12345-67899"));
    assert_eq!(bob.critical_count(), 1);
}

#[test]
fn missing_mvr_leaves_dependent_categories_not_found() {
    let report = run(&ValidationOptions::default());
    let carla = &report.drivers()[2];

    for category in [Category::Mvr, Category::LicenceProgression, Category::Convictions] {
        let result = carla.category(category).expect("category present");
        assert_eq!(result.status, CategoryStatus::NotFound);
        assert!(result.checks.is_empty());
    }
    assert_eq!(
        carla.category(Category::Dash).map(|r| r.status),
        Some(CategoryStatus::Pass)
    );
    // Only DASH and driver training are scored.
    assert_eq!(carla.score(), 100);
}

#[test]
fn skipped_dash_is_excluded_from_the_driver_mean() {
    let mut bob = bob_quote();
    bob.driver_training_completed = Some(false);
    let quote = QuoteRecords {
        drivers: vec![bob],
        vehicles: Vec::new(),
    };
    let options = ValidationOptions {
        no_dash_report: true,
        ..ValidationOptions::default()
    };

    let report = validate(&quote, &[bob_mvr()], &[bob_dash()], &options);
    let driver = &report.drivers()[0];

    assert_eq!(
        driver.category(Category::Dash).map(|r| r.status),
        Some(CategoryStatus::NotFound)
    );
    // MVR 3 of 4 (75), progression, convictions, and training at 100; divided by 4.
    assert_eq!(driver.score(), 94);
}

#[test]
fn vehicle_on_dash_is_validated_separately_from_drivers() {
    let report = run(&ValidationOptions::default());
    let vehicles = report.vehicles();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].vin(), VIN);
    assert_eq!(vehicles[0].result().status, CategoryStatus::Pass);
}

#[test]
fn pre_graduated_licence_with_quote_g1_warns_once() {
    let mut quote = alice_quote();
    quote.g2_date = None;
    quote.g_date = Some("06/01/1993".to_string());
    let mut mvr = alice_mvr();
    mvr.license_issue_date = Some("01/06/1993".to_string());
    let records = QuoteRecords {
        drivers: vec![quote],
        vehicles: Vec::new(),
    };

    let report = CrossCheckEngine::new(ValidationConfig::default()).validate(
        &records,
        &[mvr],
        &[],
        false,
    );
    let progression = report.drivers()[0]
        .category(Category::LicenceProgression)
        .expect("progression present");

    let g1: Vec<_> = progression.checks_for(CheckField::G1Date).collect();
    assert_eq!(g1.len(), 1);
    assert_eq!(g1[0].outcome, CheckOutcome::Warning);
    assert_eq!(progression.critical_count(), 0);
}

#[test]
fn no_quote_drivers_yields_an_empty_report() {
    let report = validate(
        &QuoteRecords::default(),
        &household_mvrs(),
        &household_dashes(),
        &ValidationOptions::default(),
    );
    assert_eq!(report.summary().total_drivers, 0);
    assert_eq!(report.summary().overall_score, 0);
    assert!(report.drivers().is_empty());
}

#[test]
fn repeated_runs_are_identical() {
    let options = ValidationOptions::default();
    let first = run(&options);
    for _ in 0..5 {
        assert_eq!(run(&options), first);
    }
}

#[test]
fn quote_garaging_location_is_checked_against_the_mvr_address() {
    let mut vehicle = household_quote().vehicles.remove(0);
    vehicle.garaging_location = Some("Toronto ON M5H 1A1".to_string());
    let mut mvr = bob_mvr();
    mvr.address = Some("99 Elsewhere Rd, Ottawa ON K1A 0B1".to_string());
    let quote = QuoteRecords {
        drivers: vec![alice_quote(), bob_quote()],
        vehicles: vec![vehicle],
    };

    let report = validate(
        &quote,
        &[alice_mvr(), mvr],
        &[],
        &ValidationOptions::default(),
    );

    // Alice's own quote address takes precedence over the garaging location.
    let alice = report.drivers()[0]
        .category(Category::Mvr)
        .expect("mvr category present");
    let address: Vec<_> = alice.checks_for(CheckField::Address).collect();
    assert_eq!(address[0].detail, "Address matches between Quote and MVR");

    let bob = report.drivers()[1]
        .category(Category::Mvr)
        .expect("mvr category present");
    let address: Vec<_> = bob.checks_for(CheckField::Address).collect();
    assert_eq!(address.len(), 1);
    assert_eq!(address[0].outcome, CheckOutcome::Critical);
    assert!(address[0].detail.contains("Quote garaging location (Toronto ON M5H 1A1)"));
}
