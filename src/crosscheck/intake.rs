//! Extractor payloads and their conversion into normalized records.
//!
//! Extractors are loose about field names and value types, so the payloads accept the
//! spellings seen in practice (`licence_number`/`license_number`, `dln`, `date_g1`,
//! `Yes`/`No` flags, percentage fault values) and normalize them here.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{
    Claim, Conviction, DashHistory, DeclaredClaim, DriverRecord, LicenceClassEntry,
    PolicyPeriod, PolicyStatus, QuoteRecords, SourceDocument, VehicleRecord,
};

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("failed to read validation input: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed validation input: {0}")]
    Json(#[from] serde_json::Error),
}

/// Address as a single line or as separate lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressField {
    Line(String),
    Lines(Vec<String>),
}

impl AddressField {
    fn into_line(self) -> Option<String> {
        let line = match self {
            AddressField::Line(line) => line,
            AddressField::Lines(lines) => lines
                .into_iter()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        };
        non_empty(Some(line))
    }
}

/// Yes/No answers arrive as booleans or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagField {
    Bool(bool),
    Text(String),
}

impl FlagField {
    fn as_bool(&self) -> Option<bool> {
        match self {
            FlagField::Bool(value) => Some(*value),
            FlagField::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "yes" | "y" | "true" | "1" | "x" => Some(true),
                "no" | "n" | "false" | "0" => Some(false),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvictionPayload {
    #[serde(default, alias = "date")]
    pub offence_date: Option<String>,
    #[serde(default, alias = "charge")]
    pub description: Option<String>,
    #[serde(default)]
    pub raw_text: Option<String>,
}

impl From<ConvictionPayload> for Conviction {
    fn from(payload: ConvictionPayload) -> Self {
        Conviction {
            offence_date: non_empty(payload.offence_date),
            description: non_empty(payload.description),
            raw_text: non_empty(payload.raw_text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassHistoryPayload {
    pub class: String,
    #[serde(default, alias = "date_issued")]
    pub date: Option<String>,
}

/// MVR extractor output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MvrDocument {
    #[serde(default, alias = "full_name")]
    pub name: Option<String>,
    #[serde(default, alias = "license_number")]
    pub licence_number: Option<String>,
    #[serde(default, alias = "date_of_birth")]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub address: Option<AddressField>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, alias = "license_class", alias = "class")]
    pub licence_class: Option<String>,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub class_history: Vec<ClassHistoryPayload>,
    #[serde(default)]
    pub convictions: Vec<ConvictionPayload>,
}

impl MvrDocument {
    pub fn into_record(self) -> DriverRecord {
        let mut record = DriverRecord::new(SourceDocument::Mvr);
        record.full_name = non_empty(self.name);
        record.license_number = non_empty(self.licence_number);
        record.date_of_birth = non_empty(self.birth_date);
        record.address = self.address.and_then(AddressField::into_line);
        record.gender = non_empty(self.gender);
        record.license_class = non_empty(self.licence_class);
        record.license_issue_date = non_empty(self.issue_date);
        record.license_expiry_date = non_empty(self.expiry_date);
        record.class_history = self
            .class_history
            .into_iter()
            .map(|entry| LicenceClassEntry {
                class: entry.class,
                date: non_empty(entry.date),
            })
            .collect();
        record.convictions = self.convictions.into_iter().map(Conviction::from).collect();
        record
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyPayload {
    #[serde(default, alias = "company")]
    pub insurer: Option<String>,
    #[serde(default, alias = "start_date")]
    pub effective_date: Option<String>,
    #[serde(default, alias = "end_date")]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<PolicyPayload> for PolicyPeriod {
    fn from(payload: PolicyPayload) -> Self {
        let status = match payload.status.as_deref().map(str::trim) {
            Some(status) if status.eq_ignore_ascii_case("active") => PolicyStatus::Active,
            Some(status) if !status.is_empty() => PolicyStatus::Lapsed,
            // Open-ended terms are the current policy.
            _ if non_empty(payload.expiry_date.clone()).is_none() => PolicyStatus::Active,
            _ => PolicyStatus::Lapsed,
        };
        PolicyPeriod {
            insurer: non_empty(payload.insurer),
            effective_date: non_empty(payload.effective_date),
            expiry_date: non_empty(payload.expiry_date),
            status,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimPayload {
    #[serde(default, alias = "claim_number")]
    pub claim_id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// `true`/`false`, `Yes`/`No`, or a fault percentage such as `"100%"` or `50`.
    #[serde(default, alias = "at_fault_percentage")]
    pub at_fault: Option<Value>,
}

fn fault_from_value(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_f64().map(|pct| pct > 0.0),
        Value::String(text) => {
            let trimmed = text.trim().trim_end_matches('%').trim();
            match trimmed.parse::<f64>() {
                Ok(pct) => Some(pct > 0.0),
                Err(_) => FlagField::Text(trimmed.to_string()).as_bool(),
            }
        }
        _ => None,
    }
}

impl From<ClaimPayload> for Claim {
    fn from(payload: ClaimPayload) -> Self {
        Claim {
            claim_id: non_empty(payload.claim_id),
            date: non_empty(payload.date),
            at_fault: fault_from_value(payload.at_fault.as_ref()).unwrap_or(false),
            declared_in_quote: false,
        }
    }
}

impl From<ClaimPayload> for DeclaredClaim {
    fn from(payload: ClaimPayload) -> Self {
        DeclaredClaim {
            claim_id: non_empty(payload.claim_id),
            date: non_empty(payload.date),
            at_fault: fault_from_value(payload.at_fault.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehiclePayload {
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub primary_use: Option<String>,
    #[serde(default)]
    pub garaging_location: Option<String>,
}

impl VehiclePayload {
    fn into_record(self, source: SourceDocument) -> VehicleRecord {
        VehicleRecord {
            source_document: source,
            vin: non_empty(self.vin),
            vehicle_type: non_empty(self.vehicle_type),
            fuel_type: non_empty(self.fuel_type),
            primary_use: non_empty(self.primary_use),
            garaging_location: non_empty(self.garaging_location),
        }
    }
}

/// DASH extractor output for one driver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashDocument {
    #[serde(default, alias = "full_name")]
    pub name: Option<String>,
    #[serde(default, alias = "licence_number", alias = "license_number")]
    pub dln: Option<String>,
    #[serde(default, alias = "date_of_birth")]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub address: Option<AddressField>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub first_policy_date: Option<String>,
    #[serde(default, alias = "policies")]
    pub policy_periods: Vec<PolicyPayload>,
    #[serde(default)]
    pub claims: Vec<ClaimPayload>,
    #[serde(default)]
    pub vehicles: Vec<VehiclePayload>,
}

impl DashDocument {
    pub fn into_history(self) -> DashHistory {
        let mut driver = DriverRecord::new(SourceDocument::Dash);
        driver.full_name = non_empty(self.name);
        driver.license_number = non_empty(self.dln);
        driver.date_of_birth = non_empty(self.birth_date);
        driver.address = self.address.and_then(AddressField::into_line);
        driver.gender = non_empty(self.gender);

        DashHistory {
            driver,
            first_policy_date: non_empty(self.first_policy_date),
            policy_periods: self.policy_periods.into_iter().map(PolicyPeriod::from).collect(),
            claims: self.claims.into_iter().map(Claim::from).collect(),
            vehicles: self
                .vehicles
                .into_iter()
                .map(|vehicle| vehicle.into_record(SourceDocument::Dash))
                .collect(),
        }
    }
}

/// One driver listed on a quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteDriverPayload {
    #[serde(default, alias = "name")]
    pub full_name: Option<String>,
    #[serde(default, alias = "license_number")]
    pub licence_number: Option<String>,
    #[serde(default, alias = "date_of_birth")]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub address: Option<AddressField>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, alias = "license_class")]
    pub licence_class: Option<String>,
    #[serde(default, alias = "date_g1")]
    pub g1_date: Option<String>,
    #[serde(default, alias = "date_g2")]
    pub g2_date: Option<String>,
    #[serde(default, alias = "date_g")]
    pub g_date: Option<String>,
    #[serde(default)]
    pub convictions: Vec<ConvictionPayload>,
    #[serde(default)]
    pub driver_training: Option<FlagField>,
    #[serde(default)]
    pub driver_training_date: Option<String>,
    #[serde(default)]
    pub training_certificate_attached: Option<FlagField>,
    #[serde(default, alias = "first_insured_date")]
    pub date_insured: Option<String>,
    #[serde(default)]
    pub current_carrier: Option<String>,
    #[serde(default)]
    pub claims: Vec<ClaimPayload>,
}

impl QuoteDriverPayload {
    pub fn into_record(self) -> DriverRecord {
        let mut record = DriverRecord::new(SourceDocument::Quote);
        record.full_name = non_empty(self.full_name);
        record.license_number = non_empty(self.licence_number);
        record.date_of_birth = non_empty(self.birth_date);
        record.address = self.address.and_then(AddressField::into_line);
        record.gender = non_empty(self.gender);
        record.license_class = non_empty(self.licence_class);
        record.g1_date = non_empty(self.g1_date);
        record.g2_date = non_empty(self.g2_date);
        record.g_date = non_empty(self.g_date);
        record.convictions = self.convictions.into_iter().map(Conviction::from).collect();
        record.driver_training_completed =
            self.driver_training.as_ref().and_then(FlagField::as_bool);
        record.driver_training_date = non_empty(self.driver_training_date);
        record.training_certificate_attached = self
            .training_certificate_attached
            .as_ref()
            .and_then(FlagField::as_bool);
        record.first_insured_date = non_empty(self.date_insured);
        record.current_carrier = non_empty(self.current_carrier);
        record.declared_claims = self.claims.into_iter().map(DeclaredClaim::from).collect();
        record
    }
}

/// Quote extractor output. `applicant_info` and `policy_info` are carried through
/// untouched; the engine does not read them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteDocument {
    #[serde(default)]
    pub drivers: Vec<QuoteDriverPayload>,
    #[serde(default)]
    pub vehicles: Vec<VehiclePayload>,
    /// Convictions listed at quote level rather than under a driver.
    #[serde(default)]
    pub convictions: Vec<ConvictionPayload>,
    #[serde(default)]
    pub applicant_info: Option<Value>,
    #[serde(default)]
    pub policy_info: Option<Value>,
}

impl QuoteDocument {
    pub fn into_records(self) -> QuoteRecords {
        let mut drivers: Vec<DriverRecord> = self
            .drivers
            .into_iter()
            .map(QuoteDriverPayload::into_record)
            .collect();

        // Quote-level convictions can only be attributed when there is a single driver.
        if let [driver] = drivers.as_mut_slice() {
            driver
                .convictions
                .extend(self.convictions.into_iter().map(Conviction::from));
        }

        QuoteRecords {
            drivers,
            vehicles: self
                .vehicles
                .into_iter()
                .map(|vehicle| vehicle.into_record(SourceDocument::Quote))
                .collect(),
        }
    }
}

/// Everything one validation run needs, as submitted to the CLI or the HTTP API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    #[serde(default)]
    pub quote: QuoteDocument,
    #[serde(default, alias = "mvr")]
    pub mvrs: Vec<MvrDocument>,
    #[serde(default, alias = "dash")]
    pub dashes: Vec<DashDocument>,
    #[serde(default)]
    pub no_dash_report: bool,
}

/// Normalized inputs ready for the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationInputs {
    pub quote: QuoteRecords,
    pub mvrs: Vec<DriverRecord>,
    pub dashes: Vec<DashHistory>,
    pub no_dash_report: bool,
}

impl ValidationRequest {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, IntakeError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn into_inputs(self) -> ValidationInputs {
        ValidationInputs {
            quote: self.quote.into_records(),
            mvrs: self.mvrs.into_iter().map(MvrDocument::into_record).collect(),
            dashes: self
                .dashes
                .into_iter()
                .map(DashDocument::into_history)
                .collect(),
            no_dash_report: self.no_dash_report,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
