use clap::Args;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::crosscheck::{
    Category, CategoryResult, CrossCheckEngine, ValidationReport, ValidationRequest,
};
use crate::error::AppError;
use crate::telemetry::{self, LogTarget};

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// JSON bundle holding the quote, MVR, and DASH extractor output
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Client has no DASH report; skip DASH checks even if documents are present
    #[arg(long)]
    pub(crate) no_dash_report: bool,
    /// Print the report as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let ValidateArgs {
        input,
        no_dash_report,
        json,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogTarget::Stderr)?;

    let mut request = ValidationRequest::from_path(&input)?;
    request.no_dash_report |= no_dash_report;

    let engine = CrossCheckEngine::new(config.validation);
    let report = engine.validate_inputs(&request.into_inputs());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &report.to_view()).map_err(std::io::Error::from)?;
        writeln!(out)?;
    } else {
        out.write_all(render_report(&report).as_bytes())?;
    }
    Ok(())
}

pub(crate) fn render_report(report: &ValidationReport) -> String {
    let mut text = String::new();
    let summary = report.summary();

    let _ = writeln!(text, "Validation summary");
    let _ = writeln!(
        text,
        "  drivers: {} ({} validated)",
        summary.total_drivers, summary.validated_drivers
    );
    let _ = writeln!(text, "  critical errors: {}", summary.critical_errors);
    let _ = writeln!(text, "  warnings: {}", summary.warnings);
    let _ = writeln!(text, "  overall score: {}", summary.overall_score);

    for driver in report.drivers() {
        let _ = writeln!(
            text,
            "\n{} [{}] {} (score {})",
            driver.driver_name(),
            driver.driver_license(),
            driver.status().label(),
            driver.score()
        );
        for category in Category::driver_categories() {
            if let Some(result) = driver.category(category) {
                render_category(&mut text, result);
            }
        }
    }

    if !report.vehicles().is_empty() {
        let _ = writeln!(text, "\nVehicles");
        for vehicle in report.vehicles() {
            let _ = writeln!(text, "  {}", vehicle.vin());
            render_category(&mut text, vehicle.result());
        }
    }

    text
}

fn render_category(text: &mut String, result: &CategoryResult) {
    let _ = writeln!(
        text,
        "  - {}: {}",
        result.category.label(),
        result.status.label()
    );
    for check in result.critical_errors() {
        let _ = writeln!(text, "      ! {}", check.detail);
    }
    for check in result.warnings() {
        let _ = writeln!(text, "      ? {}", check.detail);
    }
}
