//! Category validators. Each rule set reads one [`MatchedDriver`] (or vehicle) and
//! produces a [`CategoryResult`]; none of them mutate their input or share state.

mod convictions;
mod dash;
pub mod finding;
mod identity;
mod licensing;
mod training;
mod vehicle;

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, error};

pub use finding::{Category, CategoryResult, CategoryStatus, Check, CheckField, CheckOutcome};
pub use vehicle::normalize_vin;

use super::config::ValidationConfig;
use super::domain::{MatchedDriver, MatchedVehicle};

/// Run one rule set, converting a fault into a single critical entry for that category so
/// the other categories and drivers are still reported.
pub(crate) fn run_isolated<F>(category: Category, rule: F) -> CategoryResult
where
    F: FnOnce() -> CategoryResult,
{
    match catch_unwind(AssertUnwindSafe(rule)) {
        Ok(result) => {
            debug!(
                category = category.label(),
                status = result.status.label(),
                checks = result.checks.len(),
                "category evaluated"
            );
            result
        }
        Err(_) => {
            error!(category = category.label(), "validator faulted");
            CategoryResult::internal_error(category)
        }
    }
}

/// The five driver categories, in report order.
pub(crate) fn validate_driver(
    driver: &MatchedDriver,
    config: &ValidationConfig,
) -> [CategoryResult; 5] {
    [
        run_isolated(Category::Mvr, || identity::validate_mvr(driver, config)),
        run_isolated(Category::LicenceProgression, || {
            licensing::validate_licence_progression(driver, config)
        }),
        run_isolated(Category::Convictions, || {
            convictions::validate_convictions(driver, config)
        }),
        run_isolated(Category::Dash, || dash::validate_dash(driver, config)),
        run_isolated(Category::DriverTraining, || {
            training::validate_driver_training(driver)
        }),
    ]
}

pub(crate) fn validate_vehicle(vehicle: &MatchedVehicle, dash_lists_vehicles: bool) -> CategoryResult {
    run_isolated(Category::Vehicle, || {
        vehicle::validate_vehicle(vehicle, dash_lists_vehicles)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faulting_rule_becomes_single_internal_error() {
        let result = run_isolated(Category::Convictions, || panic!("index out of bounds"));
        assert_eq!(result.category, Category::Convictions);
        assert_eq!(result.status, CategoryStatus::Fail);
        assert_eq!(result.checks.len(), 1);
        assert_eq!(
            result.checks[0].detail,
            "Validation internal error: convictions validation"
        );
    }
}
