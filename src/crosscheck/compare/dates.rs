use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::crosscheck::domain::SourceDocument;

/// Outcome of comparing two extracted dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateComparison {
    Equal,
    Different,
    /// At least one side could not be read as a calendar date.
    Unparseable,
}

const TEXTUAL_FORMATS: [&str; 5] = ["%b %d, %Y", "%b %d %Y", "%d %b %Y", "%d %b, %Y", "%d-%b-%Y"];

/// Parse an extracted date into a calendar date.
///
/// Slash-separated dates are ambiguous, so the source document decides the field order:
/// MVRs print `DD/MM/YYYY`, DASH reports `YYYY/MM/DD`, and quotes `MM/DD/YYYY`. Without a
/// hint the order is inferred from the values. ISO dates and written month names
/// (`Apr 01, 1994`, `April 1, 1994`, `01-Apr-1994`) are accepted from any source.
pub fn parse_date(raw: &str, hint: Option<SourceDocument>) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let date_part = match trimmed.split_once('T') {
        Some((head, _)) if head.len() == 10 && head.contains('-') => head,
        _ => trimmed,
    };

    if date_part.contains('/') {
        return parse_slash_date(date_part, hint);
    }

    if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return Some(date);
    }

    let cleaned = date_part.replace('.', "");
    TEXTUAL_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
}

fn parse_slash_date(value: &str, hint: Option<SourceDocument>) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.split('/').map(str::trim).collect();
    if parts.len() != 3 || parts.iter().any(|part| part.is_empty()) {
        return None;
    }
    let year_first = parts[0].len() == 4;
    let year_last = parts[2].len() == 4;
    if !year_first && !year_last {
        return None;
    }

    let hinted = match hint {
        Some(SourceDocument::Mvr) if year_last => Some("%d/%m/%Y"),
        Some(SourceDocument::Dash) if year_first => Some("%Y/%m/%d"),
        Some(SourceDocument::Quote) if year_last => Some("%m/%d/%Y"),
        _ => None,
    };
    if let Some(format) = hinted {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    if year_first {
        return NaiveDate::parse_from_str(value, "%Y/%m/%d").ok();
    }

    let first: u32 = parts[0].parse().ok()?;
    let second: u32 = parts[1].parse().ok()?;
    let format = if first > 12 && second <= 12 {
        "%d/%m/%Y"
    } else {
        "%m/%d/%Y"
    };

    NaiveDate::parse_from_str(value, format).ok()
}

/// Compare two extracted dates with their source hints.
pub fn compare_dates(
    left: &str,
    left_hint: Option<SourceDocument>,
    right: &str,
    right_hint: Option<SourceDocument>,
) -> DateComparison {
    match (parse_date(left, left_hint), parse_date(right, right_hint)) {
        (Some(a), Some(b)) if a == b => DateComparison::Equal,
        (Some(_), Some(_)) => DateComparison::Different,
        _ => DateComparison::Unparseable,
    }
}

/// True when both values resolve to the same calendar date, whatever their formats.
pub fn date_equal(left: &str, right: &str) -> bool {
    compare_dates(left, None, right, None) == DateComparison::Equal
}

/// Calendar-aware year arithmetic; Feb 29 clamps to Feb 28 in non-leap years.
pub fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let months = Months::new(years.unsigned_abs().checked_mul(12)?);
    if years >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
