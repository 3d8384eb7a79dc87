use std::process::ExitCode;

use chrono::Utc;
use serde::Serialize;
use zoneshift_core::{ZoneCatalog, format_offset};

use crate::cli::ZonesArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};

pub fn run_zones(args: ZonesArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let catalog = ZoneCatalog::build(Utc::now());
    let filter = args.filter.as_deref().map(str::to_lowercase);

    let rows: Vec<ZoneRow> = catalog
        .zones()
        .iter()
        .filter(|tz| {
            filter
                .as_deref()
                .is_none_or(|needle| tz.name().to_lowercase().contains(needle))
        })
        .map(|&tz| ZoneRow {
            zone: tz.name().to_string(),
            offset: format_offset(catalog.snapshot_offset(tz)),
        })
        .collect();

    match output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for row in &rows {
                println!("{}  {}", row.offset, row.zone);
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct ZoneRow {
    zone: String,
    offset: String,
}
