use super::super::rules::{Category, CategoryResult, Check};
use super::super::scoring::{
    category_score, driver_score, driver_status, overall_score, DriverStatus,
};
use super::views::{
    CategoryView, DriverView, ReportSummaryView, ValidationReportView, VehicleView,
};

/// Outcome of every category for one quote driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverValidationResult {
    driver_name: String,
    driver_license: String,
    categories: [CategoryResult; 5],
    status: DriverStatus,
    score: u8,
}

impl DriverValidationResult {
    pub(crate) fn new(
        driver_name: impl Into<String>,
        driver_license: impl Into<String>,
        categories: [CategoryResult; 5],
    ) -> Self {
        let status = driver_status(&categories);
        let score = driver_score(&categories);
        Self {
            driver_name: driver_name.into(),
            driver_license: driver_license.into(),
            categories,
            status,
            score,
        }
    }

    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    pub fn driver_license(&self) -> &str {
        &self.driver_license
    }

    pub fn status(&self) -> DriverStatus {
        self.status
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    /// Categories in report order: MVR, licence progression, convictions, DASH, training.
    pub fn categories(&self) -> &[CategoryResult] {
        &self.categories
    }

    pub fn category(&self, category: Category) -> Option<&CategoryResult> {
        self.categories
            .iter()
            .find(|result| result.category == category)
    }

    pub fn critical_count(&self) -> usize {
        self.categories.iter().map(CategoryResult::critical_count).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.categories.iter().map(CategoryResult::warning_count).sum()
    }

    pub fn to_view(&self) -> DriverView {
        let [mvr, progression, convictions, dash, training] = &self.categories;
        DriverView {
            driver_name: self.driver_name.clone(),
            driver_license: self.driver_license.clone(),
            validation_status: self.status,
            score: self.score,
            mvr_validation: category_view(mvr),
            license_progression_validation: category_view(progression),
            convictions_validation: category_view(convictions),
            dash_validation: category_view(dash),
            driver_training_validation: category_view(training),
        }
    }
}

/// VIN checks for one quote vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleValidationResult {
    vin: String,
    vehicle_type: Option<String>,
    result: CategoryResult,
}

impl VehicleValidationResult {
    pub(crate) fn new(
        vin: impl Into<String>,
        vehicle_type: Option<String>,
        result: CategoryResult,
    ) -> Self {
        Self {
            vin: vin.into(),
            vehicle_type,
            result,
        }
    }

    pub fn vin(&self) -> &str {
        &self.vin
    }

    pub fn result(&self) -> &CategoryResult {
        &self.result
    }

    pub fn to_view(&self) -> VehicleView {
        VehicleView {
            vin: self.vin.clone(),
            vehicle_type: self.vehicle_type.clone(),
            vin_validation: category_view(&self.result),
        }
    }
}

/// Totals over the driver results. Vehicle findings are reported separately and do not
/// count here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub total_drivers: usize,
    /// Drivers whose status is not FAIL.
    pub validated_drivers: usize,
    pub critical_errors: usize,
    pub warnings: usize,
    pub overall_score: u8,
}

impl ReportSummary {
    fn from_drivers(drivers: &[DriverValidationResult]) -> Self {
        let scores: Vec<u8> = drivers.iter().map(DriverValidationResult::score).collect();
        Self {
            total_drivers: drivers.len(),
            validated_drivers: drivers
                .iter()
                .filter(|driver| driver.status() != DriverStatus::Fail)
                .count(),
            critical_errors: drivers.iter().map(DriverValidationResult::critical_count).sum(),
            warnings: drivers.iter().map(DriverValidationResult::warning_count).sum(),
            overall_score: overall_score(&scores),
        }
    }

    pub fn to_view(&self) -> ReportSummaryView {
        ReportSummaryView {
            total_drivers: self.total_drivers,
            validated_drivers: self.validated_drivers,
            critical_errors: self.critical_errors,
            warnings: self.warnings,
            overall_score: self.overall_score,
        }
    }
}

/// Result of one validation run. Built once and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    summary: ReportSummary,
    drivers: Vec<DriverValidationResult>,
    vehicles: Vec<VehicleValidationResult>,
}

impl ValidationReport {
    pub(crate) fn new(
        drivers: Vec<DriverValidationResult>,
        vehicles: Vec<VehicleValidationResult>,
    ) -> Self {
        Self {
            summary: ReportSummary::from_drivers(&drivers),
            drivers,
            vehicles,
        }
    }

    pub fn summary(&self) -> &ReportSummary {
        &self.summary
    }

    pub fn drivers(&self) -> &[DriverValidationResult] {
        &self.drivers
    }

    pub fn vehicles(&self) -> &[VehicleValidationResult] {
        &self.vehicles
    }

    pub fn to_view(&self) -> ValidationReportView {
        ValidationReportView {
            summary: self.summary.to_view(),
            drivers: self.drivers.iter().map(DriverValidationResult::to_view).collect(),
            vehicles: self.vehicles.iter().map(VehicleValidationResult::to_view).collect(),
        }
    }
}

fn details<'a>(checks: impl Iterator<Item = &'a Check>) -> Vec<String> {
    checks.map(|check| check.detail.clone()).collect()
}

fn category_view(result: &CategoryResult) -> CategoryView {
    CategoryView {
        status: result.status,
        score: category_score(result),
        matches: details(result.confirmations()),
        warnings: details(result.warnings()),
        critical_errors: details(result.critical_errors()),
    }
}
