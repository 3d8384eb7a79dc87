use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{CliError, CliResult, OutputFormat};
use zoneshift_core::{
    Conversion, FoldPolicy, GapPolicy, LocalizedTime, ZoneCatalog, ZoneShiftError, detect,
};

pub fn parse_fold_policy(s: &str) -> CliResult<FoldPolicy> {
    match s.to_lowercase().as_str() {
        "earlier" => Ok(FoldPolicy::Earlier),
        "later" => Ok(FoldPolicy::Later),
        _ => Err(CliError::input(format!(
            "Invalid fold '{}'. Expected: earlier, later",
            s
        ))),
    }
}

pub fn parse_gap_policy(s: &str) -> CliResult<GapPolicy> {
    match s.to_lowercase().as_str() {
        "shift-forward" => Ok(GapPolicy::ShiftForward),
        "shift-backward" => Ok(GapPolicy::ShiftBackward),
        _ => Err(CliError::input(format!(
            "Invalid gap '{}'. Expected: shift-forward, shift-backward",
            s
        ))),
    }
}

pub fn parse_local_time(s: &str) -> CliResult<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    for fmt in &formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    Err(CliError::input(format!(
        "Invalid local time format '{}'. Expected: YYYY-MM-DDTHH:MM:SS",
        s
    )))
}

/// Pick the source zone: an explicit `--from` validated against the catalog,
/// or the detected home zone when none was given.
pub fn resolve_source(catalog: &ZoneCatalog, from: &Option<String>) -> CliResult<String> {
    match from {
        Some(name) => {
            let tz = catalog.resolve(name).map_err(core_error)?;
            Ok(tz.name().to_string())
        }
        None => {
            let detection = detect(catalog);
            debug!(
                zone = detection.zone.name(),
                source = %detection.source,
                "Detected home zone"
            );
            Ok(detection.zone.name().to_string())
        }
    }
}

pub fn core_error(err: ZoneShiftError) -> CliError {
    match err {
        ZoneShiftError::UnknownZone(_) | ZoneShiftError::ParseError(_) => {
            CliError::input(err.to_string())
        }
        ZoneShiftError::UnresolvedLocalTime(_) => CliError::runtime(err.to_string()),
    }
}

pub fn print_conversion(conversion: &Conversion, output_format: OutputFormat) -> CliResult<()> {
    match output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(conversion)
                .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            print_card("Source", &conversion.source);
            println!("Instant: {} (epoch {})", conversion.instant_utc, conversion.epoch_seconds);
            println!("Resolution: {}", conversion.resolution);
            for target in &conversion.targets {
                print_card("Target", target);
            }
        }
    }

    Ok(())
}

fn print_card(title: &str, localized: &LocalizedTime) {
    println!("{}: {} ({})", title, localized.zone, localized.abbreviation);
    println!("  Local time: {} ({})", localized.civil, localized.weekday);
    println!("  Offset: {}", localized.offset);
}
