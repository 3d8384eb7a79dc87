use std::process::ExitCode;

use chrono::{DateTime, NaiveDateTime, Offset, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use zoneshift_core::{LocalInterpretation, ZoneCatalog, format_instant, format_offset, interpret};

use crate::cli::ExplainArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{core_error, parse_local_time};

pub fn run_explain(args: ExplainArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let catalog = ZoneCatalog::build(Utc::now());
    let tz = catalog.resolve(&args.tz).map_err(core_error)?;
    let local = parse_local_time(&args.local)?;

    let result = explain_local_time(local, tz);

    match output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("Local time: {}", result.local_time);
            println!("Timezone: {}", result.tz);
            println!("Status: {}", result.status);
            if let Some(instant) = &result.instant {
                println!("Instant: {}", instant);
            }
            if let Some(earlier) = &result.earlier {
                println!("Earlier: {} ({})", earlier.instant, earlier.offset);
            }
            if let Some(later) = &result.later {
                println!("Later: {} ({})", later.instant, later.offset);
            }
            if let Some(gap) = &result.gap {
                println!("Skipped range: {} to {}", gap.start, gap.end);
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct ExplainResult {
    local_time: String,
    tz: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    instant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    earlier: Option<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    later: Option<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gap: Option<GapRange>,
}

#[derive(Debug, Serialize)]
struct Candidate {
    instant: String,
    offset: String,
}

#[derive(Debug, Serialize)]
struct GapRange {
    start: String,
    end: String,
}

fn candidate(dt: DateTime<Tz>) -> Candidate {
    Candidate {
        instant: format_instant(dt.with_timezone(&Utc)),
        offset: format_offset(dt.offset().fix().local_minus_utc()),
    }
}

fn explain_local_time(local: NaiveDateTime, tz: Tz) -> ExplainResult {
    let mut result = ExplainResult {
        local_time: local.format("%Y-%m-%dT%H:%M:%S").to_string(),
        tz: tz.to_string(),
        status: String::new(),
        instant: None,
        earlier: None,
        later: None,
        gap: None,
    };

    match interpret(local, tz) {
        LocalInterpretation::Unique(dt) => {
            result.status = "normal".to_string();
            result.instant = Some(format_instant(dt.with_timezone(&Utc)));
        }
        LocalInterpretation::Ambiguous { earlier, later } => {
            result.status = "ambiguous".to_string();
            result.earlier = Some(candidate(earlier));
            result.later = Some(candidate(later));
        }
        LocalInterpretation::Gap { start, end } => {
            result.status = "nonexistent".to_string();
            result.gap = Some(GapRange {
                start: start.format("%Y-%m-%dT%H:%M:%S").to_string(),
                end: end.format("%Y-%m-%dT%H:%M:%S").to_string(),
            });
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_york() -> Tz {
        "America/New_York".parse().unwrap()
    }

    #[test]
    fn explain_normal_time() {
        let local = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        let result = explain_local_time(local, new_york());

        assert_eq!(result.status, "normal");
        assert_eq!(result.instant.as_deref(), Some("2024-06-01T19:00:00Z"));
        assert!(result.earlier.is_none());
        assert!(result.gap.is_none());
    }

    #[test]
    fn explain_ambiguous_time() {
        let local = NaiveDate::from_ymd_opt(2023, 11, 5)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        let result = explain_local_time(local, new_york());

        assert_eq!(result.status, "ambiguous");
        let earlier = result.earlier.unwrap();
        let later = result.later.unwrap();
        assert_eq!(earlier.instant, "2023-11-05T05:30:00Z");
        assert_eq!(earlier.offset, "UTC-04:00");
        assert_eq!(later.instant, "2023-11-05T06:30:00Z");
        assert_eq!(later.offset, "UTC-05:00");
    }

    #[test]
    fn explain_nonexistent_time() {
        let local = NaiveDate::from_ymd_opt(2023, 3, 12)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let result = explain_local_time(local, new_york());

        assert_eq!(result.status, "nonexistent");
        let gap = result.gap.unwrap();
        assert_eq!(gap.start, "2023-03-12T02:00:00");
        assert_eq!(gap.end, "2023-03-12T03:00:00");
    }
}
