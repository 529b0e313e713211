use chrono::NaiveDate;

use crate::crosscheck::compare::{format_date, parse_date};
use crate::crosscheck::config::ValidationConfig;
use crate::crosscheck::domain::{DriverRecord, MatchedDriver, SourceDocument};
use crate::crosscheck::progression::{expected_progression, LicenceStage, ProgressionPlan};

use super::finding::{Category, CategoryResult, CheckField, CheckLog};

fn stage_field(stage: LicenceStage) -> CheckField {
    match stage {
        LicenceStage::G1 => CheckField::G1Date,
        LicenceStage::G2 => CheckField::G2Date,
        LicenceStage::G => CheckField::GDate,
    }
}

/// Graduated licensing dates stated on the quote against those derived from the MVR.
pub(crate) fn validate_licence_progression(
    driver: &MatchedDriver,
    config: &ValidationConfig,
) -> CategoryResult {
    let Some(mvr) = driver.mvr.as_ref() else {
        return CategoryResult::not_found(Category::LicenceProgression);
    };
    let quote = &driver.quote;
    let mut log = CheckLog::default();

    match expected_progression(mvr, config.graduated_licensing_start) {
        Err(err) => log.critical(
            CheckField::IssueDate,
            format!("Could not calculate expected license dates from MVR data: {err}"),
        ),
        Ok(ProgressionPlan::PreGraduated { issue_date }) => {
            pre_graduated(&mut log, quote, issue_date, config.graduated_licensing_start)
        }
        Ok(ProgressionPlan::Graduated { stages }) => {
            for expected in &stages {
                compare_stage(&mut log, quote, expected.stage, expected.date, "calculated");
            }
            for stage in LicenceStage::ordered() {
                if stages.iter().any(|expected| expected.stage == stage) {
                    continue;
                }
                if let Some(stated) = stage.stated_on(quote) {
                    log.warn(
                        stage_field(stage),
                        format!(
                            "{} date ({stated}) provided but MVR license class is {}",
                            stage.label(),
                            mvr.license_class.as_deref().unwrap_or("unknown")
                        ),
                    );
                }
            }
            check_stage_order(&mut log, quote);
        }
    }

    log.finish(Category::LicenceProgression)
}

/// Licences issued before graduated licensing carry no G1/G2 history; only the G date is
/// checked and any G1/G2 dates on the quote are flagged as unnecessary.
fn pre_graduated(log: &mut CheckLog, quote: &DriverRecord, issue_date: NaiveDate, cutoff: NaiveDate) {
    let cutoff_label = cutoff.format("%B %-d, %Y");
    log.note(
        CheckField::IssueDate,
        format!(
            "Pre-{cutoff_label} license detected: issued {}; G1/G2 classes did not exist and the issue date is the effective G date",
            format_date(issue_date)
        ),
    );

    compare_stage(log, quote, LicenceStage::G, issue_date, "MVR issue date");

    for stage in [LicenceStage::G1, LicenceStage::G2] {
        if let Some(stated) = stage.stated_on(quote) {
            log.warn(
                stage_field(stage),
                format!(
                    "{} date ({stated}) provided but not required for pre-{cutoff_label} licenses",
                    stage.label()
                ),
            );
        }
    }
}

fn compare_stage(
    log: &mut CheckLog,
    quote: &DriverRecord,
    stage: LicenceStage,
    expected: NaiveDate,
    basis: &str,
) {
    let field = stage_field(stage);
    let label = stage.label();
    let expected_label = format_date(expected);

    let Some(stated) = stage.stated_on(quote) else {
        log.critical(
            field,
            format!("Quote missing {label} date, expected: {expected_label}"),
        );
        return;
    };

    match parse_date(stated, Some(SourceDocument::Quote)) {
        Some(date) if date == expected => log.pass(
            field,
            format!("{label} date matches: Quote ({stated}) = {basis} ({expected_label})"),
        ),
        Some(_) => log.critical(
            field,
            format!("{label} date mismatch: Quote ({stated}) vs {basis} ({expected_label})"),
        ),
        None => log.critical(
            field,
            format!("{label} date unparseable in Quote ({stated}), expected: {expected_label}"),
        ),
    }
}

fn check_stage_order(log: &mut CheckLog, quote: &DriverRecord) {
    let stated: Vec<(LicenceStage, &str, NaiveDate)> = LicenceStage::ordered()
        .into_iter()
        .filter_map(|stage| {
            let raw = stage.stated_on(quote)?;
            let date = parse_date(raw, Some(SourceDocument::Quote))?;
            Some((stage, raw, date))
        })
        .collect();

    for pair in stated.windows(2) {
        let (earlier, earlier_raw, earlier_date) = pair[0];
        let (later, later_raw, later_date) = pair[1];
        if earlier_date >= later_date {
            log.critical(
                CheckField::StageOrder,
                format!(
                    "{} date ({earlier_raw}) should be before {} date ({later_raw})",
                    earlier.label(),
                    later.label()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crosscheck::domain::DriverIdentity;
    use crate::crosscheck::rules::finding::{CategoryStatus, CheckOutcome};
    use crate::crosscheck::scoring::category_score;

    fn mvr(issue: &str, expiry: &str, birth: &str) -> DriverRecord {
        let mut record = DriverRecord::new(SourceDocument::Mvr);
        record.license_issue_date = Some(issue.to_string());
        record.license_expiry_date = Some(expiry.to_string());
        record.date_of_birth = Some(birth.to_string());
        record.license_class = Some("G".to_string());
        record
    }

    fn quote(g1: Option<&str>, g2: Option<&str>, g: Option<&str>) -> DriverRecord {
        let mut record = DriverRecord::new(SourceDocument::Quote);
        record.g1_date = g1.map(str::to_string);
        record.g2_date = g2.map(str::to_string);
        record.g_date = g.map(str::to_string);
        record
    }

    fn run(quote: DriverRecord, mvr: DriverRecord) -> CategoryResult {
        let driver = MatchedDriver {
            identity: DriverIdentity::Unresolved,
            quote,
            mvr: Some(mvr),
            dash: None,
            garaging_location: None,
        };
        validate_licence_progression(&driver, &ValidationConfig::default())
    }

    #[test]
    fn pre_1994_licence_skips_g1_and_g2_checks() {
        let result = run(
            quote(None, None, Some("12/01/1993")),
            mvr("01/12/1993", "15/06/2027", "15/06/1970"),
        );

        assert_eq!(result.status, CategoryStatus::Pass);
        assert_eq!(result.checks_for(CheckField::G1Date).count(), 0);
        assert_eq!(result.checks_for(CheckField::G2Date).count(), 0);
        let g: Vec<_> = result.checks_for(CheckField::GDate).collect();
        assert_eq!(g[0].outcome, CheckOutcome::Match);
    }

    #[test]
    fn pre_1994_licence_with_g1_on_quote_yields_one_warning() {
        let result = run(
            quote(Some("12/01/1993"), None, Some("12/01/1993")),
            mvr("01/12/1993", "15/06/2027", "15/06/1970"),
        );

        let g1: Vec<_> = result.checks_for(CheckField::G1Date).collect();
        assert_eq!(g1.len(), 1);
        assert_eq!(g1[0].outcome, CheckOutcome::Warning);
        assert!(g1[0].detail.contains("not required for pre-April 1, 1994 licenses"));
        assert_eq!(result.critical_count(), 0);
        assert_eq!(result.status, CategoryStatus::Warning);
    }

    #[test]
    fn pre_1994_notice_is_listed_but_not_scored() {
        let result = run(
            quote(None, None, Some("12/01/1995")),
            mvr("01/12/1993", "15/06/2027", "15/06/1970"),
        );

        let issue: Vec<_> = result.checks_for(CheckField::IssueDate).collect();
        assert_eq!(issue.len(), 1);
        assert_eq!(issue[0].outcome, CheckOutcome::Note);
        assert_eq!(result.match_count(), 0);
        assert_eq!(result.critical_count(), 1);
        assert_eq!(category_score(&result), 0);
        assert_eq!(result.confirmations().count(), 1);
    }

    #[test]
    fn post_1994_dates_are_compared_independently() {
        let result = run(
            quote(Some("03/10/2015"), Some("03/10/2016"), Some("05/20/2017")),
            mvr("10/03/2015", "22/07/2026", "22/07/1997"),
        );

        let outcomes: Vec<(CheckField, CheckOutcome)> = result
            .checks
            .iter()
            .map(|check| (check.field, check.outcome))
            .collect();
        assert_eq!(
            outcomes,
            vec![
                (CheckField::G1Date, CheckOutcome::Match),
                (CheckField::G2Date, CheckOutcome::Match),
                (CheckField::GDate, CheckOutcome::Critical),
            ]
        );
    }

    #[test]
    fn missing_and_unparseable_quote_dates_are_critical() {
        let result = run(
            quote(Some("03/10/2015"), Some("not a date"), None),
            mvr("10/03/2015", "22/07/2026", "22/07/1997"),
        );

        let g2: Vec<_> = result.checks_for(CheckField::G2Date).collect();
        assert_eq!(g2[0].outcome, CheckOutcome::Critical);
        assert!(g2[0].detail.contains("unparseable"));
        let g: Vec<_> = result.checks_for(CheckField::GDate).collect();
        assert!(g[0].detail.starts_with("Quote missing G date"));
    }

    #[test]
    fn out_of_order_quote_dates_are_critical() {
        let result = run(
            quote(Some("03/10/2016"), Some("03/10/2015"), None),
            mvr("10/03/2015", "22/07/2026", "22/07/1997"),
        );
        assert_eq!(result.checks_for(CheckField::StageOrder).count(), 1);
    }

    #[test]
    fn missing_issue_date_is_a_single_critical() {
        let mut record = mvr("", "22/07/2026", "22/07/1997");
        record.license_issue_date = None;
        let result = run(quote(None, None, None), record);
        assert_eq!(result.checks.len(), 1);
        assert_eq!(result.critical_count(), 1);
    }
}
