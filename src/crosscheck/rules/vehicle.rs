use crate::crosscheck::domain::MatchedVehicle;

use super::finding::{Category, CategoryResult, CheckField, CheckLog};
use super::identity::present;

const VIN_LENGTH: usize = 17;
const CHECK_DIGIT_WEIGHTS: [u32; VIN_LENGTH] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

/// Uppercased VIN with whitespace and dashes removed.
pub fn normalize_vin(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_ascii_uppercase()
}

fn well_formed(vin: &str) -> bool {
    vin.len() == VIN_LENGTH
        && vin
            .chars()
            .all(|c| c.is_ascii_alphanumeric() && !matches!(c, 'I' | 'O' | 'Q'))
}

fn transliterate(c: char) -> Option<u32> {
    if let Some(digit) = c.to_digit(10) {
        return Some(digit);
    }
    let value = match c {
        'A' | 'J' => 1,
        'B' | 'K' | 'S' => 2,
        'C' | 'L' | 'T' => 3,
        'D' | 'M' | 'U' => 4,
        'E' | 'N' | 'V' => 5,
        'F' | 'W' => 6,
        'G' | 'P' | 'X' => 7,
        'H' | 'Y' => 8,
        'R' | 'Z' => 9,
        _ => return None,
    };
    Some(value)
}

/// North American check digit in position 9. Expects a well-formed VIN.
fn check_digit_valid(vin: &str) -> bool {
    let mut sum = 0;
    for (c, weight) in vin.chars().zip(CHECK_DIGIT_WEIGHTS) {
        match transliterate(c) {
            Some(value) => sum += value * weight,
            None => return false,
        }
    }
    let expected = match sum % 11 {
        10 => 'X',
        digit => char::from_digit(digit, 10).unwrap_or('X'),
    };
    vin.chars().nth(8) == Some(expected)
}

pub(crate) fn validate_vehicle(vehicle: &MatchedVehicle, dash_lists_vehicles: bool) -> CategoryResult {
    let mut log = CheckLog::default();

    let Some(raw) = present(&vehicle.quote.vin) else {
        log.critical(CheckField::Vin, "VIN missing from Quote");
        return log.finish(Category::Vehicle);
    };
    let vin = normalize_vin(raw);

    if !well_formed(&vin) {
        log.critical(
            CheckField::Vin,
            format!("VIN malformed ({raw}): expected 17 characters excluding I, O, and Q"),
        );
        return log.finish(Category::Vehicle);
    }
    log.pass(CheckField::Vin, format!("VIN {vin} is well-formed"));

    if !check_digit_valid(&vin) {
        log.warn(
            CheckField::Vin,
            format!("VIN {vin} check digit does not validate; confirm against the ownership"),
        );
    }

    if vehicle.dash.is_some() {
        log.pass(CheckField::Vin, format!("VIN {vin} listed on DASH"));
    } else if dash_lists_vehicles {
        log.warn(CheckField::Vin, format!("VIN {vin} not listed on DASH"));
    }

    log.finish(Category::Vehicle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crosscheck::domain::{SourceDocument, VehicleRecord};
    use crate::crosscheck::rules::finding::{CategoryStatus, CheckOutcome};

    fn vehicle(vin: Option<&str>, on_dash: bool) -> MatchedVehicle {
        let record = |source| VehicleRecord {
            source_document: source,
            vin: vin.map(str::to_string),
            vehicle_type: Some("Sedan".to_string()),
            fuel_type: None,
            primary_use: None,
            garaging_location: None,
        };
        MatchedVehicle {
            quote: record(SourceDocument::Quote),
            dash: on_dash.then(|| record(SourceDocument::Dash)),
        }
    }

    #[test]
    fn valid_vin_on_dash_passes() {
        let result = validate_vehicle(&vehicle(Some("1HGCM82633A004352"), true), true);
        assert_eq!(result.status, CategoryStatus::Pass, "{:?}", result.checks);
        assert_eq!(result.match_count(), 2);
    }

    #[test]
    fn malformed_vin_is_critical() {
        let result = validate_vehicle(&vehicle(Some("1HGCM82633A00435O"), false), false);
        assert_eq!(result.status, CategoryStatus::Fail);
        assert_eq!(result.checks.len(), 1);
    }

    #[test]
    fn vin_absent_from_dash_warns_only_when_dash_lists_vehicles() {
        let listed = validate_vehicle(&vehicle(Some("1HGCM82633A004352"), false), true);
        assert_eq!(listed.status, CategoryStatus::Warning);

        let unlisted = validate_vehicle(&vehicle(Some("1HGCM82633A004352"), false), false);
        assert_eq!(unlisted.status, CategoryStatus::Pass);
    }

    #[test]
    fn bad_check_digit_is_a_warning() {
        let result = validate_vehicle(&vehicle(Some("1HGCM82643A004352"), true), true);
        let warnings: Vec<_> = result.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].detail.contains("check digit"));
        assert!(result.checks.iter().all(|c| c.outcome != CheckOutcome::Critical));
    }

    #[test]
    fn vin_normalization_ignores_case_and_separators() {
        assert_eq!(normalize_vin(" 1hgcm-8263 3a004352 "), "1HGCM82633A004352");
    }
}
