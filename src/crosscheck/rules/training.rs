use crate::crosscheck::compare::parse_date;
use crate::crosscheck::domain::{MatchedDriver, SourceDocument};

use super::finding::{Category, CategoryResult, CheckField, CheckLog};
use super::identity::present;

/// Driver training flag, completion date, and DTC certificate attachment on the quote.
pub(crate) fn validate_driver_training(driver: &MatchedDriver) -> CategoryResult {
    let quote = &driver.quote;
    let completed = quote.driver_training_completed;
    let date = present(&quote.driver_training_date);
    let certificate = quote.training_certificate_attached;

    if completed.is_none() && date.is_none() && certificate.is_none() {
        return CategoryResult::not_found(Category::DriverTraining);
    }

    let mut log = CheckLog::default();
    if completed.is_none() && date.is_none() {
        // Only the certificate flag is known; training itself was never claimed.
        if certificate != Some(true) {
            return CategoryResult::not_found(Category::DriverTraining);
        }
        log.warn(
            CheckField::TrainingCertificate,
            "DTC certificate attached but driver training is not declared on the quote",
        );
        return log.finish(Category::DriverTraining);
    }

    match completed {
        Some(false) => {
            if let Some(date) = date {
                log.critical(
                    CheckField::DriverTraining,
                    format!("Driver training marked No but a completion date ({date}) is provided"),
                );
            }
            if certificate == Some(true) {
                log.critical(
                    CheckField::TrainingCertificate,
                    "Driver training marked No but a DTC certificate is attached",
                );
            }
            if date.is_none() && certificate != Some(true) {
                log.pass(CheckField::DriverTraining, "No driver training declared");
            }
            return log.finish(Category::DriverTraining);
        }
        Some(true) => log.pass(CheckField::DriverTraining, "Driver training detected"),
        None => log.warn(
            CheckField::DriverTraining,
            "Driver training date provided without a completion flag; treated as completed",
        ),
    }

    if let Some(raw) = date {
        match parse_date(raw, Some(SourceDocument::Quote)) {
            None => log.critical(
                CheckField::DriverTraining,
                format!("Driver training date unparseable ({raw})"),
            ),
            Some(completed_on) => {
                let g1 = present(&quote.g1_date)
                    .and_then(|g1| parse_date(g1, Some(SourceDocument::Quote)).map(|d| (g1, d)));
                match g1 {
                    Some((g1_raw, g1_date)) if completed_on < g1_date => log.critical(
                        CheckField::DriverTraining,
                        format!("Driver training date ({raw}) precedes G1 date ({g1_raw})"),
                    ),
                    _ => log.pass(
                        CheckField::DriverTraining,
                        format!("Driver training completed on {raw}"),
                    ),
                }
            }
        }
    }

    if certificate == Some(true) {
        log.pass(CheckField::TrainingCertificate, "DTC certificate attached");
    } else {
        log.warn(
            CheckField::TrainingCertificate,
            "DTC attachment reminder: driver training claimed but no certificate is attached",
        );
    }

    log.finish(Category::DriverTraining)
}
