use chrono::NaiveDate;

use crate::crosscheck::compare::{compare_dates, format_date, fuzzy_match, parse_date, DateComparison};
use crate::crosscheck::config::ValidationConfig;
use crate::crosscheck::domain::{
    DashHistory, DriverRecord, MatchedDriver, PolicyPeriod, PolicyStatus, SourceDocument,
};
use crate::crosscheck::matcher::claim_matches;

use super::finding::{Category, CategoryResult, CheckField, CheckLog};
use super::identity::{compare_birth_dates, compare_licences, compare_names, present};

/// DASH-vs-Quote identity, insurance history, and claims disclosure.
pub(crate) fn validate_dash(driver: &MatchedDriver, config: &ValidationConfig) -> CategoryResult {
    let Some(dash) = driver.dash.as_ref() else {
        return CategoryResult::not_found(Category::Dash);
    };
    let quote = &driver.quote;
    let mut log = CheckLog::default();

    compare_names(&mut log, quote, &dash.driver, config);
    compare_licences(&mut log, quote, &dash.driver);
    compare_birth_dates(&mut log, quote, &dash.driver);
    compare_first_policy_date(&mut log, quote, dash);
    check_active_policy(&mut log, dash);
    check_policy_gaps(&mut log, dash, config.policy_gap_tolerance_days);
    compare_current_carrier(&mut log, quote, dash, config);
    check_claims(&mut log, quote, dash);

    log.finish(Category::Dash)
}

fn dash_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|value| parse_date(value, Some(SourceDocument::Dash)))
}

/// The first policy date printed on the report, or the earliest effective date listed.
fn first_policy_date(dash: &DashHistory) -> Option<String> {
    if let Some(stated) = present(&dash.first_policy_date) {
        return Some(stated.to_string());
    }
    dash.policy_periods
        .iter()
        .filter_map(|period| {
            let raw = period.effective_date.as_deref()?;
            Some((dash_date(Some(raw))?, raw))
        })
        .min_by_key(|(date, _)| *date)
        .map(|(_, raw)| raw.to_string())
}

fn compare_first_policy_date(log: &mut CheckLog, quote: &DriverRecord, dash: &DashHistory) {
    let Some(dash_first) = first_policy_date(dash) else {
        return;
    };
    let Some(quote_first) = present(&quote.first_insured_date) else {
        log.warn(
            CheckField::FirstPolicyDate,
            format!("First insured date missing from Quote; DASH shows {dash_first}"),
        );
        return;
    };

    match compare_dates(
        quote_first,
        Some(SourceDocument::Quote),
        &dash_first,
        Some(SourceDocument::Dash),
    ) {
        DateComparison::Equal => log.pass(
            CheckField::FirstPolicyDate,
            format!("First insured date matches DASH first policy date ({dash_first})"),
        ),
        DateComparison::Different => log.critical(
            CheckField::FirstPolicyDate,
            format!(
                "First insured date mismatch: Quote ({quote_first}) vs DASH first policy ({dash_first})"
            ),
        ),
        DateComparison::Unparseable => log.critical(
            CheckField::FirstPolicyDate,
            format!(
                "First insured date unparseable: Quote ({quote_first}), DASH ({dash_first})"
            ),
        ),
    }
}

fn active_policy(dash: &DashHistory) -> Option<&PolicyPeriod> {
    dash.policy_periods
        .iter()
        .filter(|period| period.status == PolicyStatus::Active)
        .max_by_key(|period| dash_date(period.effective_date.as_deref()))
}

fn check_active_policy(log: &mut CheckLog, dash: &DashHistory) {
    if dash.policy_periods.is_empty() {
        log.warn(CheckField::ActivePolicy, "No policy periods listed on DASH");
        return;
    }
    match active_policy(dash) {
        Some(period) => log.pass(
            CheckField::ActivePolicy,
            format!(
                "Active policy on DASH with {}",
                period.insurer.as_deref().unwrap_or("unknown insurer")
            ),
        ),
        None => log.warn(CheckField::ActivePolicy, "No active policy on DASH"),
    }
}

/// Gaps between consecutive policy terms, ordered by effective date.
fn check_policy_gaps(log: &mut CheckLog, dash: &DashHistory, tolerance_days: u32) {
    let mut periods: Vec<(NaiveDate, Option<NaiveDate>)> = dash
        .policy_periods
        .iter()
        .filter_map(|period| {
            let effective = dash_date(period.effective_date.as_deref())?;
            Some((effective, dash_date(period.expiry_date.as_deref())))
        })
        .collect();
    if periods.len() < 2 {
        return;
    }
    periods.sort_by_key(|(effective, _)| *effective);

    let mut gaps = 0;
    let mut covered_until: Option<NaiveDate> = None;
    for (effective, expiry) in periods {
        if let Some(previous_end) = covered_until {
            let gap = (effective - previous_end).num_days();
            if gap > i64::from(tolerance_days) {
                gaps += 1;
                log.warn(
                    CheckField::PolicyGap,
                    format!(
                        "Insurance gap of {gap} days between {} and {}",
                        format_date(previous_end),
                        format_date(effective)
                    ),
                );
            }
        }
        covered_until = match (covered_until, expiry) {
            (Some(current), Some(end)) => Some(current.max(end)),
            (_, end) => end.or(covered_until),
        };
    }

    if gaps == 0 {
        log.pass(CheckField::PolicyGap, "Continuous insurance history on DASH");
    }
}

fn compare_current_carrier(
    log: &mut CheckLog,
    quote: &DriverRecord,
    dash: &DashHistory,
    config: &ValidationConfig,
) {
    let Some(declared) = present(&quote.current_carrier) else {
        return;
    };
    let Some(insurer) = active_policy(dash).and_then(|period| period.insurer.as_deref()) else {
        return;
    };

    let left = declared.to_lowercase();
    let right = insurer.to_lowercase();
    if left.contains(&right)
        || right.contains(&left)
        || fuzzy_match(declared, insurer, config.name_similarity_threshold).is_same_entity()
    {
        log.pass(
            CheckField::CurrentCarrier,
            format!("Current carrier matches DASH active policy ({insurer})"),
        );
    } else {
        log.warn(
            CheckField::CurrentCarrier,
            format!("Current carrier differs: Quote ({declared}) vs DASH ({insurer})"),
        );
    }
}

fn check_claims(log: &mut CheckLog, quote: &DriverRecord, dash: &DashHistory) {
    if dash.claims.is_empty() {
        log.pass(CheckField::Claim, "No claims found in DASH");
    }

    for claim in &dash.claims {
        let date = claim.date.as_deref().unwrap_or("unknown date");
        match (claim.at_fault, claim.declared_in_quote) {
            (true, false) => log.critical(
                CheckField::Claim,
                format!("At-fault claim {} ({date}) not declared in Quote", claim.label()),
            ),
            (true, true) => log.pass(
                CheckField::Claim,
                format!("At-fault claim {} ({date}) declared in Quote", claim.label()),
            ),
            (false, _) => log.pass(
                CheckField::Claim,
                format!("Not-at-fault claim {} ({date}) on DASH", claim.label()),
            ),
        }
    }

    for declared in &quote.declared_claims {
        if !dash.claims.iter().any(|claim| claim_matches(declared, claim)) {
            log.warn(
                CheckField::Claim,
                format!(
                    "Claim declared in Quote not found on DASH: {} ({})",
                    declared.claim_id.as_deref().unwrap_or("no claim number"),
                    declared.date.as_deref().unwrap_or("unknown date")
                ),
            );
        }
    }
}
