use crate::crosscheck::compare::{
    address_match, compare_dates, fuzzy_match, licence_numbers_match, DateComparison,
    TextComparison,
};
use crate::crosscheck::config::ValidationConfig;
use crate::crosscheck::domain::{DriverRecord, MatchedDriver, SourceDocument};

use super::finding::{Category, CategoryResult, CheckField, CheckLog};

/// MVR-vs-Quote identity checks.
pub(crate) fn validate_mvr(driver: &MatchedDriver, config: &ValidationConfig) -> CategoryResult {
    let Some(mvr) = driver.mvr.as_ref() else {
        return CategoryResult::not_found(Category::Mvr);
    };
    let quote = &driver.quote;
    let mut log = CheckLog::default();

    compare_names(&mut log, quote, mvr, config);
    compare_licences(&mut log, quote, mvr);
    compare_addresses(&mut log, quote, mvr, driver.garaging_location.as_deref(), config);
    compare_birth_dates(&mut log, quote, mvr);
    compare_gender(&mut log, quote, mvr);
    compare_licence_class(&mut log, quote, mvr);

    log.finish(Category::Mvr)
}

pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Both sides of a field, or a warning naming the side that left it blank.
pub(crate) fn paired<'a>(
    log: &mut CheckLog,
    field: CheckField,
    what: &str,
    quote: &'a Option<String>,
    other: &'a Option<String>,
    other_source: SourceDocument,
) -> Option<(&'a str, &'a str)> {
    match (present(quote), present(other)) {
        (Some(q), Some(o)) => Some((q, o)),
        (Some(_), None) => {
            log.warn(field, format!("{what} missing from {}", other_source.label()));
            None
        }
        (None, Some(_)) => {
            log.warn(field, format!("{what} missing from Quote"));
            None
        }
        (None, None) => None,
    }
}

pub(crate) fn compare_names(
    log: &mut CheckLog,
    quote: &DriverRecord,
    other: &DriverRecord,
    config: &ValidationConfig,
) {
    let source = other.source_document.label();
    let Some((q, o)) = paired(
        log,
        CheckField::Name,
        "Name",
        &quote.full_name,
        &other.full_name,
        other.source_document,
    ) else {
        return;
    };

    match fuzzy_match(q, o, config.name_similarity_threshold) {
        TextComparison::Match => {
            log.pass(CheckField::Name, format!("Name matches between Quote and {source}"))
        }
        TextComparison::FormatDifference => log.warn(
            CheckField::Name,
            format!("Name format differs between Quote ({q}) and {source} ({o})"),
        ),
        TextComparison::Mismatch => log.critical(
            CheckField::Name,
            format!("Name mismatch between Quote ({q}) and {source} ({o})"),
        ),
    }
}

pub(crate) fn compare_licences(log: &mut CheckLog, quote: &DriverRecord, other: &DriverRecord) {
    let source = other.source_document.label();
    let Some((q, o)) = paired(
        log,
        CheckField::LicenceNumber,
        "License number",
        &quote.license_number,
        &other.license_number,
        other.source_document,
    ) else {
        return;
    };

    if licence_numbers_match(q, o) {
        log.pass(
            CheckField::LicenceNumber,
            format!("License number matches between Quote and {source}"),
        );
    } else {
        log.critical(
            CheckField::LicenceNumber,
            format!("License number mismatch between Quote ({q}) and {source} ({o})"),
        );
    }
}

pub(crate) fn compare_birth_dates(log: &mut CheckLog, quote: &DriverRecord, other: &DriverRecord) {
    let source = other.source_document.label();
    let Some((q, o)) = paired(
        log,
        CheckField::DateOfBirth,
        "Date of birth",
        &quote.date_of_birth,
        &other.date_of_birth,
        other.source_document,
    ) else {
        return;
    };

    match compare_dates(q, Some(SourceDocument::Quote), o, Some(other.source_document)) {
        DateComparison::Equal => log.pass(
            CheckField::DateOfBirth,
            format!("Date of birth matches between Quote and {source}"),
        ),
        DateComparison::Different => log.critical(
            CheckField::DateOfBirth,
            format!("Date of birth mismatch between Quote ({q}) and {source} ({o})"),
        ),
        DateComparison::Unparseable => log.critical(
            CheckField::DateOfBirth,
            format!("Date of birth unparseable: Quote ({q}), {source} ({o})"),
        ),
    }
}

/// The quote driver's own address when present, otherwise the quote garaging location.
fn compare_addresses(
    log: &mut CheckLog,
    quote: &DriverRecord,
    mvr: &DriverRecord,
    garaging_location: Option<&str>,
    config: &ValidationConfig,
) {
    if present(&quote.address).is_none() {
        let garaging = garaging_location
            .map(str::trim)
            .filter(|location| !location.is_empty());
        match (garaging, present(&mvr.address)) {
            (Some(location), mvr_address) => {
                compare_garaging_location(log, location, mvr_address, config)
            }
            (None, Some(m)) => log.critical(
                CheckField::Address,
                format!("MVR has address ({m}) but Quote has no address or garaging location"),
            ),
            (None, None) => {}
        }
        return;
    }

    let Some((q, m)) = paired(
        log,
        CheckField::Address,
        "Address",
        &quote.address,
        &mvr.address,
        SourceDocument::Mvr,
    ) else {
        return;
    };

    match address_match(q, m, config.address_similarity_threshold) {
        TextComparison::Match => {
            log.pass(CheckField::Address, "Address matches between Quote and MVR")
        }
        TextComparison::FormatDifference => log.warn(
            CheckField::Address,
            format!("Address format differs between Quote ({q}) and MVR ({m})"),
        ),
        TextComparison::Mismatch => log.critical(
            CheckField::Address,
            format!("Address mismatch between Quote ({q}) and MVR ({m})"),
        ),
    }
}

/// Garaging locations are often only a city and postal code, so any address form that
/// names the same place counts as a match.
fn compare_garaging_location(
    log: &mut CheckLog,
    location: &str,
    mvr_address: Option<&str>,
    config: &ValidationConfig,
) {
    let Some(m) = mvr_address else {
        log.warn(
            CheckField::Address,
            format!("Quote garaging location ({location}) provided but MVR has no address"),
        );
        return;
    };

    if address_match(location, m, config.address_similarity_threshold).is_same_entity() {
        log.pass(
            CheckField::Address,
            "Address matches between MVR and Quote garaging location",
        );
    } else {
        log.critical(
            CheckField::Address,
            format!("Address mismatch between MVR ({m}) and Quote garaging location ({location})"),
        );
    }
}

fn normalize_gender(value: &str) -> String {
    match value.trim().to_ascii_lowercase().as_str() {
        "m" | "male" => "male".to_string(),
        "f" | "female" => "female".to_string(),
        other => other.to_string(),
    }
}

fn compare_gender(log: &mut CheckLog, quote: &DriverRecord, mvr: &DriverRecord) {
    let (Some(q), Some(m)) = (present(&quote.gender), present(&mvr.gender)) else {
        return;
    };
    if normalize_gender(q) == normalize_gender(m) {
        log.pass(CheckField::Gender, "Gender matches between Quote and MVR");
    } else {
        log.warn(
            CheckField::Gender,
            format!("Gender mismatch between Quote ({q}) and MVR ({m})"),
        );
    }
}

fn compare_licence_class(log: &mut CheckLog, quote: &DriverRecord, mvr: &DriverRecord) {
    let (Some(q), Some(m)) = (present(&quote.license_class), present(&mvr.license_class)) else {
        return;
    };
    if q.eq_ignore_ascii_case(m) {
        log.pass(
            CheckField::LicenceClass,
            format!("License class {m} matches between Quote and MVR"),
        );
    } else {
        log.warn(
            CheckField::LicenceClass,
            format!("License class differs between Quote ({q}) and MVR ({m})"),
        );
    }
}
