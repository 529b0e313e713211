use crate::crosscheck::compare::{compare_dates, descriptions_match, parse_date, DateComparison};
use crate::crosscheck::config::ValidationConfig;
use crate::crosscheck::domain::{Conviction, MatchedDriver, SourceDocument};

use super::finding::{Category, CategoryResult, CheckField, CheckLog};

/// Every MVR conviction must be disclosed on the quote; extra quote convictions only warn.
pub(crate) fn validate_convictions(
    driver: &MatchedDriver,
    config: &ValidationConfig,
) -> CategoryResult {
    let Some(mvr) = driver.mvr.as_ref() else {
        return CategoryResult::not_found(Category::Convictions);
    };
    let mut log = CheckLog::default();
    let declared = &driver.quote.convictions;

    if mvr.convictions.is_empty() {
        log.pass(CheckField::Conviction, "No convictions found in MVR");
    }

    let mut consumed = vec![false; declared.len()];
    for conviction in &mvr.convictions {
        let found = declared.iter().enumerate().find(|(index, candidate)| {
            !consumed[*index]
                && same_conviction(conviction, candidate, config.conviction_similarity_threshold)
        });

        match found {
            Some((index, _)) => {
                consumed[index] = true;
                log.pass(
                    CheckField::Conviction,
                    format!("Conviction matched: {}", conviction.summary()),
                );
            }
            None if mvr_date_unparseable(conviction) => log.critical(
                CheckField::Conviction,
                format!(
                    "MVR conviction not found in Quote (offence date unparseable): {}",
                    conviction.summary()
                ),
            ),
            None => log.critical(
                CheckField::Conviction,
                format!("MVR conviction not found in Quote: {}", conviction.summary()),
            ),
        }
    }

    for (conviction, used) in declared.iter().zip(&consumed) {
        if !used {
            log.warn(
                CheckField::Conviction,
                format!("Quote conviction not found in MVR: {}", conviction.summary()),
            );
        }
    }

    log.finish(Category::Convictions)
}

fn same_conviction(mvr: &Conviction, quote: &Conviction, threshold: f32) -> bool {
    let (Some(mvr_date), Some(quote_date)) =
        (mvr.offence_date.as_deref(), quote.offence_date.as_deref())
    else {
        return false;
    };
    if compare_dates(
        mvr_date,
        Some(SourceDocument::Mvr),
        quote_date,
        Some(SourceDocument::Quote),
    ) != DateComparison::Equal
    {
        return false;
    }

    match (mvr.description.as_deref(), quote.description.as_deref()) {
        (Some(left), Some(right)) => descriptions_match(left, right, threshold),
        // A dated entry with no description on either side is matched on the date alone.
        (None, None) => true,
        _ => false,
    }
}

fn mvr_date_unparseable(conviction: &Conviction) -> bool {
    match conviction.offence_date.as_deref() {
        Some(raw) => parse_date(raw, Some(SourceDocument::Mvr)).is_none(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crosscheck::domain::{DriverIdentity, DriverRecord};
    use crate::crosscheck::rules::finding::{CategoryStatus, CheckOutcome};

    fn conviction(date: &str, description: &str) -> Conviction {
        Conviction {
            offence_date: Some(date.to_string()),
            description: Some(description.to_string()),
            raw_text: None,
        }
    }

    fn driver(mvr: Option<Vec<Conviction>>, quote: Vec<Conviction>) -> MatchedDriver {
        let mut quote_record = DriverRecord::new(SourceDocument::Quote);
        quote_record.convictions = quote;
        MatchedDriver {
            identity: DriverIdentity::Unresolved,
            quote: quote_record,
            mvr: mvr.map(|convictions| {
                let mut record = DriverRecord::new(SourceDocument::Mvr);
                record.convictions = convictions;
                record
            }),
            dash: None,
            garaging_location: None,
        }
    }

    #[test]
    fn undisclosed_mvr_conviction_is_critical() {
        let result = validate_convictions(
            &driver(Some(vec![conviction("14/02/2022", "SPEEDING 80/60")]), vec![]),
            &ValidationConfig::default(),
        );
        assert_eq!(result.status, CategoryStatus::Fail);
        assert_eq!(result.critical_count(), 1);
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn extra_quote_conviction_is_only_a_warning() {
        let result = validate_convictions(
            &driver(Some(vec![]), vec![conviction("02/14/2022", "Speeding")]),
            &ValidationConfig::default(),
        );
        assert_eq!(result.status, CategoryStatus::Warning);
        assert_eq!(result.critical_count(), 0);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.match_count(), 1);
    }

    #[test]
    fn matching_uses_date_and_description_across_formats() {
        let result = validate_convictions(
            &driver(
                Some(vec![
                    conviction("14/02/2022", "SPEEDING 80 KM/H IN 60 ZONE"),
                    conviction("03/09/2023", "DRIVE HANDHELD COMMUNICATION DEVICE"),
                ]),
                vec![
                    conviction("09/03/2023", "Distracted driving - cell phone"),
                    conviction("02/14/2022", "Speeding"),
                ],
            ),
            &ValidationConfig::default(),
        );
        assert_eq!(result.status, CategoryStatus::Pass);
        assert_eq!(result.match_count(), 2);
        assert!(result
            .checks
            .iter()
            .all(|check| check.outcome == CheckOutcome::Match));
    }

    #[test]
    fn one_quote_entry_cannot_satisfy_two_mvr_convictions() {
        let result = validate_convictions(
            &driver(
                Some(vec![
                    conviction("14/02/2022", "Speeding"),
                    conviction("14/02/2022", "Speeding"),
                ]),
                vec![conviction("02/14/2022", "Speeding")],
            ),
            &ValidationConfig::default(),
        );
        assert_eq!(result.match_count(), 1);
        assert_eq!(result.critical_count(), 1);
    }

    #[test]
    fn unparseable_mvr_date_is_reported() {
        let result = validate_convictions(
            &driver(Some(vec![conviction("sometime", "Speeding")]), vec![]),
            &ValidationConfig::default(),
        );
        let critical: Vec<_> = result.critical_errors().collect();
        assert!(critical[0].detail.contains("unparseable"));
    }

    #[test]
    fn missing_mvr_is_not_found() {
        let result = validate_convictions(
            &driver(None, vec![conviction("02/14/2022", "Speeding")]),
            &ValidationConfig::default(),
        );
        assert_eq!(result.status, CategoryStatus::NotFound);
    }
}
