//! Cross-document validation engine.
//!
//! Quote drivers anchor every run: each is linked to its MVR and DASH records by the
//! [`matcher`], checked by the category [`rules`], and scored into an immutable
//! [`ValidationReport`]. The engine performs no I/O and holds no shared state, so
//! independent runs may execute concurrently.

pub mod compare;
pub mod config;
pub mod domain;
pub mod engine;
pub mod intake;
pub mod matcher;
pub mod progression;
pub mod report;
pub mod rules;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use config::{ValidationConfig, ValidationOptions};
pub use domain::{
    Claim, Conviction, DashHistory, DeclaredClaim, DriverIdentity, DriverRecord,
    LicenceClassEntry, MatchedDriver, MatchedVehicle, PolicyPeriod, PolicyStatus, QuoteRecords,
    SourceDocument, VehicleRecord,
};
pub use engine::{validate, CrossCheckEngine};
pub use intake::{IntakeError, ValidationInputs, ValidationRequest};
pub use report::{
    DriverValidationResult, ReportSummary, ValidationReport, ValidationReportView,
    VehicleValidationResult,
};
pub use rules::{Category, CategoryResult, CategoryStatus, Check, CheckField, CheckOutcome};
pub use scoring::DriverStatus;
