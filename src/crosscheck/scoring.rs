//! Scores derived from category results.
//!
//! A category scores `matches / (matches + critical errors)` as a percentage; warnings
//! never enter the denominator. Categories without source data are excluded from the
//! driver mean rather than counted as zero.

use serde::{Deserialize, Serialize};

use super::rules::{CategoryResult, CategoryStatus};

/// Overall standing of one driver across every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    Pass,
    Warning,
    Fail,
}

impl DriverStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DriverStatus::Pass => "PASS",
            DriverStatus::Warning => "WARNING",
            DriverStatus::Fail => "FAIL",
        }
    }
}

pub fn category_score(result: &CategoryResult) -> u8 {
    if result.status == CategoryStatus::NotFound {
        return 0;
    }
    let matches = result.match_count();
    let denominator = matches + result.critical_count();
    if denominator == 0 {
        return 100;
    }
    percentage(matches as f64 / denominator as f64)
}

/// Mean of the scores of categories that had source data; zero when none did.
pub fn driver_score(categories: &[CategoryResult]) -> u8 {
    let scored: Vec<u8> = categories
        .iter()
        .filter(|result| result.status != CategoryStatus::NotFound)
        .map(category_score)
        .collect();
    mean(&scored)
}

pub fn overall_score(driver_scores: &[u8]) -> u8 {
    mean(driver_scores)
}

pub fn driver_status(categories: &[CategoryResult]) -> DriverStatus {
    if categories.iter().any(|result| result.critical_count() > 0) {
        DriverStatus::Fail
    } else if categories.iter().any(|result| result.warning_count() > 0) {
        DriverStatus::Warning
    } else {
        DriverStatus::Pass
    }
}

fn mean(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let total: u32 = scores.iter().map(|score| u32::from(*score)).sum();
    clamp_score(f64::from(total) / scores.len() as f64)
}

fn percentage(ratio: f64) -> u8 {
    clamp_score(ratio * 100.0)
}

fn clamp_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
