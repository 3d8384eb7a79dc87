use std::process::ExitCode;

use chrono::Utc;
use serde::Serialize;
use tracing::debug;
use zoneshift_core::{DetectionSource, ZoneCatalog, detect};

use crate::cli::DetectArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};

pub fn run_detect(_args: DetectArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let catalog = ZoneCatalog::build(Utc::now());
    let detection = detect(&catalog);
    debug!(zone = detection.zone.name(), source = %detection.source, "Detection finished");

    let report = DetectReport {
        zone: detection.zone.name().to_string(),
        source: detection.source,
    };

    match output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("Zone: {}", report.zone);
            println!("Source: {}", report.source);
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct DetectReport {
    zone: String,
    source: DetectionSource,
}
