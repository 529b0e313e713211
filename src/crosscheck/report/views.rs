use serde::{Deserialize, Serialize};

use super::super::rules::CategoryStatus;
use super::super::scoring::DriverStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryView {
    pub status: CategoryStatus,
    pub score: u8,
    pub matches: Vec<String>,
    pub warnings: Vec<String>,
    pub critical_errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverView {
    pub driver_name: String,
    pub driver_license: String,
    pub validation_status: DriverStatus,
    pub score: u8,
    pub mvr_validation: CategoryView,
    pub license_progression_validation: CategoryView,
    pub convictions_validation: CategoryView,
    pub dash_validation: CategoryView,
    pub driver_training_validation: CategoryView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleView {
    pub vin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    pub vin_validation: CategoryView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummaryView {
    pub total_drivers: usize,
    pub validated_drivers: usize,
    pub critical_errors: usize,
    pub warnings: usize,
    pub overall_score: u8,
}

/// Serialized shape returned by the CLI `--json` output and the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReportView {
    pub summary: ReportSummaryView,
    pub drivers: Vec<DriverView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vehicles: Vec<VehicleView>,
}
