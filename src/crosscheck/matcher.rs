//! Links each quote driver and vehicle to the MVR and DASH records describing the same
//! person or vehicle.

use tracing::{debug, warn};

use super::compare::{date_equal, fuzzy_match, normalize_licence, parse_date};
use super::config::ValidationConfig;
use super::domain::{
    Claim, DashHistory, DeclaredClaim, DriverIdentity, DriverRecord, MatchedDriver,
    MatchedVehicle, QuoteRecords, SourceDocument,
};
use super::rules::normalize_vin;

/// One entry per quote driver, in quote order.
pub fn match_drivers(
    quote_drivers: &[DriverRecord],
    mvrs: &[DriverRecord],
    dashes: &[DashHistory],
    config: &ValidationConfig,
) -> Vec<MatchedDriver> {
    quote_drivers
        .iter()
        .map(|quote| {
            let mvr = best_match(
                quote,
                mvrs,
                |record| record,
                DriverRecord::populated_fields,
                config,
            );
            let dash = best_match(
                quote,
                dashes,
                |history| &history.driver,
                DashHistory::populated_fields,
                config,
            );

            let identity = resolve_identity(
                quote,
                mvr.as_ref().map(|(_, how)| *how),
                dash.as_ref().map(|(_, how)| *how),
            );
            if mvr.is_none() {
                warn!(driver = quote.display_name(), "no MVR matched quote driver");
            }
            if dash.is_none() && !dashes.is_empty() {
                warn!(driver = quote.display_name(), "no DASH report matched quote driver");
            }

            let dash = dash.map(|(history, _)| {
                let mut history = history.clone();
                mark_declared_claims(&mut history.claims, &quote.declared_claims);
                history
            });

            MatchedDriver {
                identity,
                quote: quote.clone(),
                mvr: mvr.map(|(record, _)| record.clone()),
                dash,
                garaging_location: None,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchedBy {
    Licence,
    NameAndBirthDate,
}

/// Licence number first, then fuzzy name plus identical birth date. Among several
/// candidates the most complete record wins; ties go to the first seen.
fn best_match<'a, T>(
    quote: &DriverRecord,
    candidates: &'a [T],
    driver_of: impl Fn(&'a T) -> &'a DriverRecord,
    completeness: impl Fn(&T) -> usize,
    config: &ValidationConfig,
) -> Option<(&'a T, MatchedBy)> {
    let pick = |matches: Vec<&'a T>| -> Option<&'a T> {
        let mut best: Option<&'a T> = None;
        for candidate in matches {
            match best {
                Some(current) if completeness(current) >= completeness(candidate) => {}
                _ => best = Some(candidate),
            }
        }
        best
    };

    if let Some(licence) = licence_key(quote) {
        let by_licence: Vec<&'a T> = candidates
            .iter()
            .filter(|candidate| {
                licence_key(driver_of(*candidate)).as_deref() == Some(licence.as_str())
            })
            .collect();
        if let Some(found) = pick(by_licence) {
            debug!(driver = quote.display_name(), "matched by licence number");
            return Some((found, MatchedBy::Licence));
        }
    }

    let by_name: Vec<&'a T> = candidates
        .iter()
        .filter(|candidate| same_person(quote, driver_of(*candidate), config))
        .collect();
    let found = pick(by_name)?;
    debug!(driver = quote.display_name(), "matched by name and date of birth");
    Some((found, MatchedBy::NameAndBirthDate))
}

fn licence_key(record: &DriverRecord) -> Option<String> {
    record
        .license_number
        .as_deref()
        .map(normalize_licence)
        .filter(|licence| !licence.is_empty())
}

fn same_person(quote: &DriverRecord, other: &DriverRecord, config: &ValidationConfig) -> bool {
    let (Some(quote_name), Some(other_name)) =
        (quote.full_name.as_deref(), other.full_name.as_deref())
    else {
        return false;
    };
    let (Some(quote_birth), Some(other_birth)) =
        (quote.date_of_birth.as_deref(), other.date_of_birth.as_deref())
    else {
        return false;
    };

    let same_birth = match (
        parse_date(quote_birth, Some(SourceDocument::Quote)),
        parse_date(other_birth, Some(other.source_document)),
    ) {
        (Some(left), Some(right)) => left == right,
        _ => date_equal(quote_birth, other_birth),
    };

    same_birth
        && fuzzy_match(quote_name, other_name, config.name_similarity_threshold).is_same_entity()
}

fn resolve_identity(
    quote: &DriverRecord,
    mvr: Option<MatchedBy>,
    dash: Option<MatchedBy>,
) -> DriverIdentity {
    let licence = licence_key(quote);
    let matched_by = [mvr, dash];
    if matched_by.contains(&Some(MatchedBy::Licence)) {
        if let Some(licence) = licence {
            return DriverIdentity::LicenceNumber { licence };
        }
    }
    if matched_by.contains(&Some(MatchedBy::NameAndBirthDate)) {
        if let (Some(name), Some(birth_date)) = (&quote.full_name, &quote.date_of_birth) {
            return DriverIdentity::NameAndBirthDate {
                name: name.clone(),
                birth_date: birth_date.clone(),
            };
        }
    }
    match licence {
        Some(licence) => DriverIdentity::LicenceNumber { licence },
        None => DriverIdentity::Unresolved,
    }
}

/// A declared claim refers to a DASH claim when the claim numbers or the dates agree.
pub(crate) fn claim_matches(declared: &DeclaredClaim, claim: &Claim) -> bool {
    let same_id = match (declared.claim_id.as_deref(), claim.claim_id.as_deref()) {
        (Some(left), Some(right)) => {
            !left.trim().is_empty() && left.trim().eq_ignore_ascii_case(right.trim())
        }
        _ => false,
    };
    if same_id {
        return true;
    }

    match (declared.date.as_deref(), claim.date.as_deref()) {
        (Some(left), Some(right)) => match (
            parse_date(left, Some(SourceDocument::Quote)),
            parse_date(right, Some(SourceDocument::Dash)),
        ) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        _ => false,
    }
}

fn mark_declared_claims(claims: &mut [Claim], declared: &[DeclaredClaim]) {
    for claim in claims.iter_mut() {
        claim.declared_in_quote =
            claim.declared_in_quote || declared.iter().any(|entry| claim_matches(entry, claim));
    }
}

/// Quote vehicles paired with the DASH listing carrying the same VIN.
pub fn match_vehicles(quote: &QuoteRecords, dashes: &[DashHistory]) -> Vec<MatchedVehicle> {
    quote
        .vehicles
        .iter()
        .map(|vehicle| {
            let vin = vehicle.vin.as_deref().map(normalize_vin).filter(|v| !v.is_empty());
            let dash = vin.and_then(|vin| {
                dashes
                    .iter()
                    .flat_map(|history| history.vehicles.iter())
                    .find(|listed| {
                        listed.vin.as_deref().map(normalize_vin).as_deref() == Some(vin.as_str())
                    })
                    .cloned()
            });
            MatchedVehicle {
                quote: vehicle.clone(),
                dash,
            }
        })
        .collect()
}
