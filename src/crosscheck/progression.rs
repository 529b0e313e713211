//! Expected graduated-licensing dates derived from MVR data.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::compare::{add_years, parse_date};
use super::domain::{DriverRecord, SourceDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenceStage {
    G1,
    G2,
    G,
}

impl LicenceStage {
    pub const fn ordered() -> [LicenceStage; 3] {
        [LicenceStage::G1, LicenceStage::G2, LicenceStage::G]
    }

    pub const fn label(self) -> &'static str {
        match self {
            LicenceStage::G1 => "G1",
            LicenceStage::G2 => "G2",
            LicenceStage::G => "G",
        }
    }

    pub fn from_class(class: &str) -> Option<Self> {
        match class.trim().to_ascii_uppercase().as_str() {
            "G1" => Some(LicenceStage::G1),
            "G2" => Some(LicenceStage::G2),
            "G" => Some(LicenceStage::G),
            _ => None,
        }
    }

    /// Date the quote states for this stage.
    pub fn stated_on(self, record: &DriverRecord) -> Option<&str> {
        let value = match self {
            LicenceStage::G1 => record.g1_date.as_deref(),
            LicenceStage::G2 => record.g2_date.as_deref(),
            LicenceStage::G => record.g_date.as_deref(),
        };
        value.filter(|raw| !raw.trim().is_empty())
    }

    /// Stages a holder of `class` has passed through. Non-graduated or unknown classes are
    /// treated as a full licence.
    pub fn required_for_class(class: Option<&str>) -> &'static [LicenceStage] {
        match class.and_then(LicenceStage::from_class) {
            Some(LicenceStage::G1) => &[LicenceStage::G1],
            Some(LicenceStage::G2) => &[LicenceStage::G1, LicenceStage::G2],
            _ => &[LicenceStage::G1, LicenceStage::G2, LicenceStage::G],
        }
    }
}

/// Where an expected stage date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionBasis {
    /// Printed in the MVR class history.
    ClassHistory,
    /// Expiry falls on the birthday, so G1 was issued on the licence issue date.
    ExpiryMatchesBirthday,
    /// G1 is five years before the expiry date.
    ExpiryOffset,
    /// No expiry date; G1 is the issue date.
    IssueDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedStage {
    pub stage: LicenceStage,
    pub date: NaiveDate,
    pub basis: ProgressionBasis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionPlan {
    /// Issued before graduated licensing existed; the issue date is the G date.
    PreGraduated { issue_date: NaiveDate },
    Graduated { stages: Vec<ExpectedStage> },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("MVR has no licence issue date")]
    MissingIssueDate,
    #[error("MVR licence issue date '{0}' is unparseable")]
    UnparseableIssueDate(String),
    #[error("expected licence dates fall outside the supported calendar")]
    OutOfRange,
}

/// Derive the expected G1/G2/G dates for an MVR record.
pub fn expected_progression(
    mvr: &DriverRecord,
    graduated_licensing_start: NaiveDate,
) -> Result<ProgressionPlan, ProgressionError> {
    let history: Vec<(LicenceStage, NaiveDate)> = mvr
        .class_history
        .iter()
        .filter_map(|entry| {
            let stage = LicenceStage::from_class(&entry.class)?;
            let date = parse_date(entry.date.as_deref()?, Some(SourceDocument::Mvr))?;
            Some((stage, date))
        })
        .collect();
    let earliest_history = history.iter().map(|(_, date)| *date).min();

    let issue_date = match mvr.license_issue_date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => match parse_date(raw, Some(SourceDocument::Mvr)) {
            Some(date) => date,
            None => earliest_history
                .ok_or_else(|| ProgressionError::UnparseableIssueDate(raw.to_string()))?,
        },
        _ => earliest_history.ok_or(ProgressionError::MissingIssueDate)?,
    };

    if issue_date < graduated_licensing_start {
        return Ok(ProgressionPlan::PreGraduated { issue_date });
    }

    let (derived_g1, basis) = derive_g1(mvr, issue_date)?;

    let mut stages = Vec::new();
    let mut previous: Option<NaiveDate> = None;
    for stage in LicenceStage::ordered() {
        let from_history = history
            .iter()
            .find(|(candidate, _)| *candidate == stage)
            .map(|(_, date)| *date);

        let expected = match (from_history, previous) {
            (Some(date), _) => ExpectedStage {
                stage,
                date,
                basis: ProgressionBasis::ClassHistory,
            },
            (None, None) => ExpectedStage {
                stage,
                date: derived_g1,
                basis,
            },
            (None, Some(prior)) => ExpectedStage {
                stage,
                date: add_years(prior, 1).ok_or(ProgressionError::OutOfRange)?,
                basis,
            },
        };
        previous = Some(expected.date);
        stages.push(expected);
    }

    let required = LicenceStage::required_for_class(mvr.license_class.as_deref());
    stages.retain(|expected| required.contains(&expected.stage));

    Ok(ProgressionPlan::Graduated { stages })
}

fn derive_g1(
    mvr: &DriverRecord,
    issue_date: NaiveDate,
) -> Result<(NaiveDate, ProgressionBasis), ProgressionError> {
    let expiry = mvr
        .license_expiry_date
        .as_deref()
        .and_then(|raw| parse_date(raw, Some(SourceDocument::Mvr)));
    let birth = mvr
        .date_of_birth
        .as_deref()
        .and_then(|raw| parse_date(raw, Some(SourceDocument::Mvr)));

    match (expiry, birth) {
        (Some(expiry), Some(birth)) if expiry.day() == birth.day() && expiry.month() == birth.month() => {
            Ok((issue_date, ProgressionBasis::ExpiryMatchesBirthday))
        }
        (Some(expiry), _) => Ok((
            add_years(expiry, -5).ok_or(ProgressionError::OutOfRange)?,
            ProgressionBasis::ExpiryOffset,
        )),
        (None, _) => Ok((issue_date, ProgressionBasis::IssueDate)),
    }
}
