use tracing::{debug, info};

use super::config::{ValidationConfig, ValidationOptions};
use super::domain::{DashHistory, DriverRecord, QuoteRecords};
use super::intake::ValidationInputs;
use super::matcher::{match_drivers, match_vehicles};
use super::report::{DriverValidationResult, ValidationReport, VehicleValidationResult};
use super::rules::{self, normalize_vin};

/// Stateless validator that applies one configuration to any number of document sets.
#[derive(Debug, Clone, Default)]
pub struct CrossCheckEngine {
    config: ValidationConfig,
}

impl CrossCheckEngine {
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn validate(
        &self,
        quote: &QuoteRecords,
        mvrs: &[DriverRecord],
        dashes: &[DashHistory],
        no_dash_report: bool,
    ) -> ValidationReport {
        // Reports supplied alongside `no_dash_report` are ignored.
        let dashes: &[DashHistory] = if no_dash_report { &[] } else { dashes };

        let garaging_location = quote.garaging_location().map(str::to_string);
        let drivers: Vec<DriverValidationResult> =
            match_drivers(&quote.drivers, mvrs, dashes, &self.config)
                .into_iter()
                .map(|mut driver| {
                    driver.garaging_location = garaging_location.clone();
                    debug!(
                        driver = driver.quote.display_name(),
                        mvr = driver.mvr.is_some(),
                        dash = driver.dash.is_some(),
                        "validating driver"
                    );
                    DriverValidationResult::new(
                        driver.quote.display_name(),
                        driver.quote.display_licence(),
                        rules::validate_driver(&driver, &self.config),
                    )
                })
                .collect();

        let dash_lists_vehicles = dashes.iter().any(|history| !history.vehicles.is_empty());
        let vehicles: Vec<VehicleValidationResult> = match_vehicles(quote, dashes)
            .iter()
            .map(|vehicle| {
                let vin = vehicle
                    .quote
                    .vin
                    .as_deref()
                    .map(normalize_vin)
                    .unwrap_or_else(|| "Unknown".to_string());
                VehicleValidationResult::new(
                    vin,
                    vehicle.quote.vehicle_type.clone(),
                    rules::validate_vehicle(vehicle, dash_lists_vehicles),
                )
            })
            .collect();

        let report = ValidationReport::new(drivers, vehicles);
        let summary = report.summary();
        info!(
            total_drivers = summary.total_drivers,
            validated_drivers = summary.validated_drivers,
            critical_errors = summary.critical_errors,
            warnings = summary.warnings,
            overall_score = summary.overall_score,
            "validation run complete"
        );
        report
    }

    pub fn validate_inputs(&self, inputs: &ValidationInputs) -> ValidationReport {
        self.validate(&inputs.quote, &inputs.mvrs, &inputs.dashes, inputs.no_dash_report)
    }
}

/// Validate one set of documents. Pure: the same inputs always produce the same report.
pub fn validate(
    quote: &QuoteRecords,
    mvrs: &[DriverRecord],
    dashes: &[DashHistory],
    options: &ValidationOptions,
) -> ValidationReport {
    CrossCheckEngine::new(options.config.clone()).validate(
        quote,
        mvrs,
        dashes,
        options.no_dash_report,
    )
}
