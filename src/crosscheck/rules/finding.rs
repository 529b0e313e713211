use serde::{Deserialize, Serialize};

/// Validation categories reported for every driver, plus the vehicle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Mvr,
    LicenceProgression,
    Convictions,
    Dash,
    DriverTraining,
    Vehicle,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::Mvr => "MVR validation",
            Category::LicenceProgression => "license progression validation",
            Category::Convictions => "convictions validation",
            Category::Dash => "DASH validation",
            Category::DriverTraining => "driver training validation",
            Category::Vehicle => "vehicle validation",
        }
    }

    /// The five categories scored per driver, in report order.
    pub const fn driver_categories() -> [Category; 5] {
        [
            Category::Mvr,
            Category::LicenceProgression,
            Category::Convictions,
            Category::Dash,
            Category::DriverTraining,
        ]
    }
}

/// Field or concern a single check looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckField {
    Name,
    LicenceNumber,
    Address,
    DateOfBirth,
    Gender,
    LicenceClass,
    IssueDate,
    G1Date,
    G2Date,
    GDate,
    StageOrder,
    Conviction,
    FirstPolicyDate,
    ActivePolicy,
    PolicyGap,
    CurrentCarrier,
    Claim,
    DriverTraining,
    TrainingCertificate,
    Vin,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    Match,
    /// Context for the reviewer, listed with the matches but never scored.
    Note,
    Warning,
    Critical,
}

/// One comparison performed by a rule set. `detail` is the human-readable sentence shown
/// to reviewers; the structured `field` and `outcome` are what the engine reasons about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub field: CheckField,
    pub outcome: CheckOutcome,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryStatus {
    NotFound,
    Pass,
    Warning,
    Fail,
}

impl CategoryStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CategoryStatus::NotFound => "NOT_FOUND",
            CategoryStatus::Pass => "PASS",
            CategoryStatus::Warning => "WARNING",
            CategoryStatus::Fail => "FAIL",
        }
    }
}

/// Result of one category for one driver (or vehicle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: Category,
    pub status: CategoryStatus,
    pub checks: Vec<Check>,
}

impl CategoryResult {
    /// The source document this category depends on was not available.
    pub fn not_found(category: Category) -> Self {
        Self {
            category,
            status: CategoryStatus::NotFound,
            checks: Vec::new(),
        }
    }

    pub fn from_checks(category: Category, checks: Vec<Check>) -> Self {
        let status = if checks.iter().any(|c| c.outcome == CheckOutcome::Critical) {
            CategoryStatus::Fail
        } else if checks.iter().any(|c| c.outcome == CheckOutcome::Warning) {
            CategoryStatus::Warning
        } else {
            CategoryStatus::Pass
        };
        Self {
            category,
            status,
            checks,
        }
    }

    /// Replacement result for a rule set that faulted.
    pub fn internal_error(category: Category) -> Self {
        Self::from_checks(
            category,
            vec![Check {
                field: CheckField::Internal,
                outcome: CheckOutcome::Critical,
                detail: format!("Validation internal error: {}", category.label()),
            }],
        )
    }

    pub fn outcomes(&self, outcome: CheckOutcome) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(move |check| check.outcome == outcome)
    }

    pub fn matches(&self) -> impl Iterator<Item = &Check> {
        self.outcomes(CheckOutcome::Match)
    }

    /// Matches and notes in evaluation order, as listed for the reviewer.
    pub fn confirmations(&self) -> impl Iterator<Item = &Check> {
        self.checks
            .iter()
            .filter(|check| matches!(check.outcome, CheckOutcome::Match | CheckOutcome::Note))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Check> {
        self.outcomes(CheckOutcome::Warning)
    }

    pub fn critical_errors(&self) -> impl Iterator<Item = &Check> {
        self.outcomes(CheckOutcome::Critical)
    }

    pub fn match_count(&self) -> usize {
        self.matches().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn critical_count(&self) -> usize {
        self.critical_errors().count()
    }

    pub fn checks_for(&self, field: CheckField) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(move |check| check.field == field)
    }
}

/// Ordered collector used by the rule sets; insertion order is evaluation order.
#[derive(Debug, Default)]
pub(crate) struct CheckLog {
    checks: Vec<Check>,
}

impl CheckLog {
    pub(crate) fn pass(&mut self, field: CheckField, detail: impl Into<String>) {
        self.push(field, CheckOutcome::Match, detail);
    }

    pub(crate) fn note(&mut self, field: CheckField, detail: impl Into<String>) {
        self.push(field, CheckOutcome::Note, detail);
    }

    pub(crate) fn warn(&mut self, field: CheckField, detail: impl Into<String>) {
        self.push(field, CheckOutcome::Warning, detail);
    }

    pub(crate) fn critical(&mut self, field: CheckField, detail: impl Into<String>) {
        self.push(field, CheckOutcome::Critical, detail);
    }

    pub(crate) fn push(&mut self, field: CheckField, outcome: CheckOutcome, detail: impl Into<String>) {
        self.checks.push(Check {
            field,
            outcome,
            detail: detail.into(),
        });
    }

    pub(crate) fn finish(self, category: Category) -> CategoryResult {
        CategoryResult::from_checks(category, self.checks)
    }
}
