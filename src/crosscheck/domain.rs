use serde::{Deserialize, Serialize};

/// Document a record was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceDocument {
    #[serde(rename = "MVR")]
    Mvr,
    #[serde(rename = "DASH")]
    Dash,
    #[serde(rename = "Quote")]
    Quote,
}

impl SourceDocument {
    pub const fn label(self) -> &'static str {
        match self {
            SourceDocument::Mvr => "MVR",
            SourceDocument::Dash => "DASH",
            SourceDocument::Quote => "Quote",
        }
    }
}

/// Conviction entry as listed on an MVR or declared on a quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conviction {
    pub offence_date: Option<String>,
    pub description: Option<String>,
    pub raw_text: Option<String>,
}

impl Conviction {
    pub fn summary(&self) -> String {
        format!(
            "{} - {}",
            self.offence_date.as_deref().unwrap_or("unknown date"),
            self.description.as_deref().unwrap_or("no description")
        )
    }
}

/// One step of the licence class history printed on an MVR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenceClassEntry {
    pub class: String,
    pub date: Option<String>,
}

/// Claim the applicant disclosed on the quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredClaim {
    pub claim_id: Option<String>,
    pub date: Option<String>,
    pub at_fault: Option<bool>,
}

/// Normalized driver record produced from any of the three documents.
///
/// Dates stay in their extracted textual form; they are parsed by the comparators so that a
/// malformed value only affects the checks that read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRecord {
    pub source_document: SourceDocument,
    pub full_name: Option<String>,
    pub license_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub license_class: Option<String>,
    pub license_issue_date: Option<String>,
    pub license_expiry_date: Option<String>,
    pub g1_date: Option<String>,
    pub g2_date: Option<String>,
    pub g_date: Option<String>,
    pub class_history: Vec<LicenceClassEntry>,
    pub convictions: Vec<Conviction>,
    pub driver_training_completed: Option<bool>,
    pub driver_training_date: Option<String>,
    pub training_certificate_attached: Option<bool>,
    pub first_insured_date: Option<String>,
    pub current_carrier: Option<String>,
    pub declared_claims: Vec<DeclaredClaim>,
}

impl DriverRecord {
    pub fn new(source_document: SourceDocument) -> Self {
        Self {
            source_document,
            full_name: None,
            license_number: None,
            date_of_birth: None,
            address: None,
            gender: None,
            license_class: None,
            license_issue_date: None,
            license_expiry_date: None,
            g1_date: None,
            g2_date: None,
            g_date: None,
            class_history: Vec::new(),
            convictions: Vec::new(),
            driver_training_completed: None,
            driver_training_date: None,
            training_certificate_attached: None,
            first_insured_date: None,
            current_carrier: None,
            declared_claims: Vec::new(),
        }
    }

    /// Number of populated fields, used to rank duplicate records of the same person.
    pub fn populated_fields(&self) -> usize {
        let optional = [
            &self.full_name,
            &self.license_number,
            &self.date_of_birth,
            &self.address,
            &self.gender,
            &self.license_class,
            &self.license_issue_date,
            &self.license_expiry_date,
            &self.g1_date,
            &self.g2_date,
            &self.g_date,
            &self.driver_training_date,
            &self.first_insured_date,
            &self.current_carrier,
        ];

        let text = optional
            .iter()
            .filter(|value| value.as_deref().is_some_and(|v| !v.trim().is_empty()))
            .count();
        let flags = [
            self.driver_training_completed,
            self.training_certificate_attached,
        ]
        .iter()
        .filter(|flag| flag.is_some())
        .count();
        let lists = [
            !self.class_history.is_empty(),
            !self.convictions.is_empty(),
            !self.declared_claims.is_empty(),
        ]
        .iter()
        .filter(|present| **present)
        .count();

        text + flags + lists
    }

    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("Unknown")
    }

    pub fn display_licence(&self) -> &str {
        self.license_number.as_deref().unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStatus {
    Active,
    Lapsed,
}

/// Policy term listed on a DASH report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyPeriod {
    pub insurer: Option<String>,
    pub effective_date: Option<String>,
    pub expiry_date: Option<String>,
    pub status: PolicyStatus,
}

/// Claim listed on a DASH report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_id: Option<String>,
    pub date: Option<String>,
    pub at_fault: bool,
    pub declared_in_quote: bool,
}

impl Claim {
    pub fn label(&self) -> &str {
        self.claim_id.as_deref().unwrap_or("(no claim number)")
    }
}

/// Everything a DASH report says about one driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashHistory {
    pub driver: DriverRecord,
    pub first_policy_date: Option<String>,
    pub policy_periods: Vec<PolicyPeriod>,
    pub claims: Vec<Claim>,
    pub vehicles: Vec<VehicleRecord>,
}

impl DashHistory {
    pub fn populated_fields(&self) -> usize {
        self.driver.populated_fields()
            + usize::from(self.first_policy_date.is_some())
            + usize::from(!self.policy_periods.is_empty())
            + usize::from(!self.claims.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub source_document: SourceDocument,
    pub vin: Option<String>,
    pub vehicle_type: Option<String>,
    pub fuel_type: Option<String>,
    pub primary_use: Option<String>,
    /// Where the vehicle is kept overnight; quote vehicles only.
    pub garaging_location: Option<String>,
}

/// Drivers and vehicles enumerated by the quote; the quote is the anchor document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecords {
    pub drivers: Vec<DriverRecord>,
    pub vehicles: Vec<VehicleRecord>,
}

impl QuoteRecords {
    /// First garaging location listed on a quote vehicle.
    pub fn garaging_location(&self) -> Option<&str> {
        self.vehicles
            .iter()
            .filter_map(|vehicle| vehicle.garaging_location.as_deref())
            .map(str::trim)
            .find(|location| !location.is_empty())
    }
}

/// How a quote driver was linked to the other documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DriverIdentity {
    LicenceNumber { licence: String },
    NameAndBirthDate { name: String, birth_date: String },
    Unresolved,
}

/// One person as seen across the quote, MVR, and DASH documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedDriver {
    pub identity: DriverIdentity,
    pub quote: DriverRecord,
    pub mvr: Option<DriverRecord>,
    pub dash: Option<DashHistory>,
    /// Quote garaging location, compared with the MVR address when the quote driver
    /// carries no address of their own.
    pub garaging_location: Option<String>,
}

/// A quote vehicle and the DASH listing with the same VIN, when one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedVehicle {
    pub quote: VehicleRecord,
    pub dash: Option<VehicleRecord>,
}
