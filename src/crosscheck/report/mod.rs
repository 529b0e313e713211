mod summary;
pub mod views;

pub use summary::{
    DriverValidationResult, ReportSummary, ValidationReport, VehicleValidationResult,
};
pub use views::{CategoryView, DriverView, ReportSummaryView, ValidationReportView, VehicleView};
