use crate::crosscheck::domain::{
    Conviction, DashHistory, DriverRecord, PolicyPeriod, PolicyStatus, QuoteRecords,
    SourceDocument, VehicleRecord,
};

pub(super) const VIN: &str = "1HGCM82633A004352";

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn person(
    source: SourceDocument,
    name: &str,
    licence: &str,
    birth: &str,
    class: Option<&str>,
) -> DriverRecord {
    let mut record = DriverRecord::new(source);
    record.full_name = text(name);
    record.license_number = text(licence);
    record.date_of_birth = text(birth);
    record.license_class = class.map(str::to_string);
    record
}

fn conviction(date: &str, description: &str) -> Conviction {
    Conviction {
        offence_date: text(date),
        description: text(description),
        raw_text: None,
    }
}

fn active_policy(insurer: &str, effective: &str) -> PolicyPeriod {
    PolicyPeriod {
        insurer: text(insurer),
        effective_date: text(effective),
        expiry_date: None,
        status: PolicyStatus::Active,
    }
}

fn vehicle(source: SourceDocument) -> VehicleRecord {
    VehicleRecord {
        source_document: source,
        vin: text(VIN),
        vehicle_type: text("Sedan"),
        fuel_type: text("Gasoline"),
        primary_use: text("Pleasure"),
        garaging_location: None,
    }
}

/// Every document agrees for this driver.
pub(super) fn alice_quote() -> DriverRecord {
    let mut quote = person(
        SourceDocument::Quote,
        "Alice Martin",
        "M1234-56789-00001",
        "04/12/1985",
        Some("G"),
    );
    quote.address = text("45 Queen St E, Toronto ON M5C 1R5");
    quote.gender = text("F");
    quote.g1_date = text("06/01/2003");
    quote.g2_date = text("06/01/2004");
    quote.g_date = text("06/01/2005");
    quote.convictions = vec![conviction("03/15/2021", "Speeding")];
    quote.driver_training_completed = Some(false);
    quote.first_insured_date = text("06/15/2005");
    quote.current_carrier = text("Aviva");
    quote
}

pub(super) fn alice_mvr() -> DriverRecord {
    let mut mvr = person(
        SourceDocument::Mvr,
        "Alice Martin",
        "M1234-56789-00001",
        "12/04/1985",
        Some("G"),
    );
    mvr.address = text("45 Queen St E, Toronto ON M5C 1R5");
    mvr.gender = text("F");
    mvr.license_issue_date = text("01/06/2003");
    mvr.license_expiry_date = text("12/04/2028");
    mvr.convictions = vec![conviction("15/03/2021", "SPEEDING 75 KM/H IN 50 ZONE")];
    mvr
}

pub(super) fn alice_dash() -> DashHistory {
    DashHistory {
        driver: person(
            SourceDocument::Dash,
            "Alice Martin",
            "M1234-56789-00001",
            "1985/04/12",
            None,
        ),
        first_policy_date: text("2005/06/15"),
        policy_periods: vec![active_policy("Aviva", "2005/06/15")],
        claims: Vec::new(),
        vehicles: vec![vehicle(SourceDocument::Dash)],
    }
}

/// The MVR licence number carries a one-digit typo; matched through name and birth date.
pub(super) fn bob_quote() -> DriverRecord {
    let mut quote = person(
        SourceDocument::Quote,
        "Bob Chen",
        "C5555-12345-67890",
        "09/30/1990",
        Some("G"),
    );
    quote.g1_date = text("08/15/2008");
    quote.g2_date = text("08/15/2009");
    quote.g_date = text("08/15/2010");
    quote.first_insured_date = text("09/01/2010");
    quote.current_carrier = text("Intact Insurance");
    quote
}

pub(super) fn bob_mvr() -> DriverRecord {
    let mut mvr = person(
        SourceDocument::Mvr,
        "Bob Chen",
        "C5555-12345-67899",
        "30/09/1990",
        Some("G"),
    );
    mvr.license_issue_date = text("15/08/2008");
    mvr.license_expiry_date = text("30/09/2027");
    mvr
}

pub(super) fn bob_dash() -> DashHistory {
    DashHistory {
        driver: person(
            SourceDocument::Dash,
            "Bob Chen",
            "C5555-12345-67890",
            "1990/09/30",
            None,
        ),
        first_policy_date: text("2010/09/01"),
        policy_periods: vec![active_policy("Intact", "2010/09/01")],
        claims: Vec::new(),
        vehicles: Vec::new(),
    }
}

/// No MVR on file; driver training claimed without a certificate.
pub(super) fn carla_quote() -> DriverRecord {
    let mut quote = person(
        SourceDocument::Quote,
        "Carla Diaz",
        "D7777-00000-11111",
        "01/20/1995",
        Some("G2"),
    );
    quote.g1_date = text("02/01/2013");
    quote.driver_training_completed = Some(true);
    quote.first_insured_date = text("03/01/2015");
    quote.current_carrier = text("Economical");
    quote
}

pub(super) fn carla_dash() -> DashHistory {
    DashHistory {
        driver: person(
            SourceDocument::Dash,
            "Carla Diaz",
            "D7777-00000-11111",
            "1995/01/20",
            None,
        ),
        first_policy_date: text("2015/03/01"),
        policy_periods: vec![active_policy("Economical", "2015/03/01")],
        claims: Vec::new(),
        vehicles: Vec::new(),
    }
}

pub(super) fn household_quote() -> QuoteRecords {
    QuoteRecords {
        drivers: vec![alice_quote(), bob_quote(), carla_quote()],
        vehicles: vec![vehicle(SourceDocument::Quote)],
    }
}

pub(super) fn household_mvrs() -> Vec<DriverRecord> {
    vec![alice_mvr(), bob_mvr()]
}

pub(super) fn household_dashes() -> Vec<DashHistory> {
    vec![alice_dash(), bob_dash(), carla_dash()]
}
