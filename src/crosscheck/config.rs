use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME_THRESHOLD: f32 = 0.85;
pub const DEFAULT_ADDRESS_THRESHOLD: f32 = 0.75;
pub const DEFAULT_CONVICTION_THRESHOLD: f32 = 0.6;
pub const DEFAULT_POLICY_GAP_DAYS: u32 = 30;

/// Tunable thresholds and policy dates used by the comparators and rule sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum normalized similarity for two names to be treated as the same person.
    pub name_similarity_threshold: f32,
    pub address_similarity_threshold: f32,
    pub conviction_similarity_threshold: f32,
    /// Days between consecutive DASH policy terms tolerated before a gap is reported.
    pub policy_gap_tolerance_days: u32,
    /// Licences issued before this date predate graduated licensing.
    pub graduated_licensing_start: NaiveDate,
}

impl ValidationConfig {
    /// Replace out-of-range thresholds with defaults so a bad override cannot disable matching.
    pub fn sanitized(mut self) -> Self {
        self.name_similarity_threshold =
            sanitize_ratio(self.name_similarity_threshold, DEFAULT_NAME_THRESHOLD);
        self.address_similarity_threshold =
            sanitize_ratio(self.address_similarity_threshold, DEFAULT_ADDRESS_THRESHOLD);
        self.conviction_similarity_threshold = sanitize_ratio(
            self.conviction_similarity_threshold,
            DEFAULT_CONVICTION_THRESHOLD,
        );
        self
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            name_similarity_threshold: DEFAULT_NAME_THRESHOLD,
            address_similarity_threshold: DEFAULT_ADDRESS_THRESHOLD,
            conviction_similarity_threshold: DEFAULT_CONVICTION_THRESHOLD,
            policy_gap_tolerance_days: DEFAULT_POLICY_GAP_DAYS,
            graduated_licensing_start: graduated_licensing_start(),
        }
    }
}

pub(crate) fn graduated_licensing_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1994, 4, 1).unwrap_or(NaiveDate::MIN)
}

fn sanitize_ratio(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        value
    } else {
        fallback
    }
}

/// Per-run switches supplied by the caller alongside the documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// The operator chose not to provide a DASH report for this run.
    #[serde(default)]
    pub no_dash_report: bool,
    #[serde(default)]
    pub config: ValidationConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_replaces_out_of_range_thresholds() {
        let config = ValidationConfig {
            name_similarity_threshold: 1.7,
            address_similarity_threshold: f32::NAN,
            conviction_similarity_threshold: 0.5,
            ..ValidationConfig::default()
        }
        .sanitized();

        assert_eq!(config.name_similarity_threshold, DEFAULT_NAME_THRESHOLD);
        assert_eq!(config.address_similarity_threshold, DEFAULT_ADDRESS_THRESHOLD);
        assert_eq!(config.conviction_similarity_threshold, 0.5);
    }

    #[test]
    fn graduated_licensing_starts_april_first_1994() {
        let config = ValidationConfig::default();
        assert_eq!(
            config.graduated_licensing_start,
            NaiveDate::from_ymd_opt(1994, 4, 1).expect("valid date")
        );
    }
}
