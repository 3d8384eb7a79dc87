//! Civil-time conversion with explicit DST handling.
//!
//! Converting a wall-clock reading into an instant has three outcomes, and
//! this module makes all three explicit before choosing an interpretation:
//!
//! - **Unique**: exactly one offset applies.
//! - **Ambiguous**: the reading occurred twice (clocks moved backward);
//!   a [`FoldPolicy`] picks the occurrence.
//! - **Gap**: the reading never occurred (clocks moved forward past it);
//!   a [`GapPolicy`] shifts it one hour and retries.
//!
//! The reverse direction, projecting an instant into a zone's civil
//! representation, is total and deterministic.

use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::catalog::ZoneCatalog;
use crate::error::{Result, ZoneShiftError};
use crate::models::{Conversion, FoldPolicy, GapPolicy, LocalizedTime, Resolution};

/// How a civil time maps onto a zone's timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalInterpretation {
    /// Exactly one offset applies.
    Unique(DateTime<Tz>),
    /// The civil time occurred twice (DST fold).
    Ambiguous {
        /// The first occurrence (offset in effect before the transition).
        earlier: DateTime<Tz>,
        /// The second occurrence (offset in effect after the transition).
        later: DateTime<Tz>,
    },
    /// The civil time was skipped (DST gap).
    Gap {
        /// First skipped wall-clock second.
        start: NaiveDateTime,
        /// First valid wall-clock second after the gap.
        end: NaiveDateTime,
    },
}

/// Classify a civil time against a zone's offset rules.
///
/// This is the pure three-way branch that localization builds on: callers
/// decide what to do with an anomaly instead of the classifier guessing.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use zoneshift_core::convert::{LocalInterpretation, interpret};
///
/// let civil = NaiveDate::from_ymd_opt(2023, 3, 12)
///     .unwrap()
///     .and_hms_opt(2, 30, 0)
///     .unwrap();
/// let tz = "America/New_York".parse().unwrap();
///
/// assert!(matches!(interpret(civil, tz), LocalInterpretation::Gap { .. }));
/// ```
pub fn interpret(civil: NaiveDateTime, tz: Tz) -> LocalInterpretation {
    match tz.from_local_datetime(&civil) {
        LocalResult::Single(dt) => LocalInterpretation::Unique(dt),
        LocalResult::Ambiguous(earlier, later) => LocalInterpretation::Ambiguous { earlier, later },
        LocalResult::None => {
            let start = previous_valid_local(civil, tz)
                .map(|dt| dt.naive_local() + Duration::seconds(1))
                .unwrap_or(civil);
            let end = next_valid_local(civil, tz)
                .map(|dt| dt.naive_local())
                .unwrap_or(civil);
            LocalInterpretation::Gap { start, end }
        }
    }
}

/// Resolve a civil time in a zone to an instant, applying the supplied
/// policies to DST anomalies.
///
/// # Arguments
///
/// * `civil` - The wall-clock reading
/// * `tz` - The zone to interpret it in
/// * `fold` - Tie break when the reading occurred twice
/// * `gap` - Shift direction when the reading was skipped
///
/// # Returns
///
/// The resolved instant and a [`Resolution`] tag describing how any anomaly
/// was handled.
///
/// # Errors
///
/// [`ZoneShiftError::UnresolvedLocalTime`] if the reading still falls in a
/// gap after the one-hour shift. Not reachable with current zone data.
pub fn localize(
    civil: NaiveDateTime,
    tz: Tz,
    fold: FoldPolicy,
    gap: GapPolicy,
) -> Result<(DateTime<Utc>, Resolution)> {
    match interpret(civil, tz) {
        LocalInterpretation::Unique(dt) => Ok((dt.with_timezone(&Utc), Resolution::Normal)),
        LocalInterpretation::Ambiguous { earlier, later } => {
            let (dt, resolution) = match fold {
                FoldPolicy::Earlier => (earlier, Resolution::EarlierOccurrence),
                FoldPolicy::Later => (later, Resolution::LaterOccurrence),
            };
            Ok((dt.with_timezone(&Utc), resolution))
        }
        LocalInterpretation::Gap { .. } => {
            let (shifted, resolution) = match gap {
                GapPolicy::ShiftForward => {
                    (civil + Duration::hours(1), Resolution::ShiftedForward)
                }
                GapPolicy::ShiftBackward => {
                    (civil - Duration::hours(1), Resolution::ShiftedBackward)
                }
            };

            match interpret(shifted, tz) {
                LocalInterpretation::Unique(dt) => Ok((dt.with_timezone(&Utc), resolution)),
                // A one-hour shift can land on the far side of a fold.
                LocalInterpretation::Ambiguous { earlier, later } => {
                    let dt = match fold {
                        FoldPolicy::Earlier => earlier,
                        FoldPolicy::Later => later,
                    };
                    Ok((dt.with_timezone(&Utc), resolution))
                }
                LocalInterpretation::Gap { .. } => Err(ZoneShiftError::UnresolvedLocalTime(
                    format!(
                        "'{}' in timezone '{}' is still skipped after shifting one hour",
                        shifted.format("%Y-%m-%d %H:%M:%S"),
                        tz
                    ),
                )),
            }
        }
    }
}

/// Project an instant into a zone's civil representation.
///
/// Total and deterministic: identical inputs yield identical output.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use zoneshift_core::convert::project;
///
/// let instant = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).single().unwrap();
/// let localized = project(instant, "America/Los_Angeles".parse().unwrap());
///
/// assert_eq!(localized.civil, "2024-06-01 02:30:00");
/// assert_eq!(localized.abbreviation, "PDT");
/// assert_eq!(localized.offset, "UTC-07:00");
/// ```
pub fn project(instant: DateTime<Utc>, tz: Tz) -> LocalizedTime {
    let local = instant.with_timezone(&tz);

    LocalizedTime {
        zone: tz.name().to_string(),
        civil: local.format("%Y-%m-%d %H:%M:%S").to_string(),
        weekday: local.format("%A").to_string(),
        abbreviation: local.format("%Z").to_string(),
        offset: format_offset(local.offset().fix().local_minus_utc()),
        epoch_seconds: instant.timestamp(),
        instant_utc: format_instant(instant),
    }
}

/// Resolve a civil time in the home zone and project the resulting instant
/// into the home zone and every target zone.
///
/// # Errors
///
/// [`ZoneShiftError::UnknownZone`] for any unrecognized zone identifier;
/// the localize errors for unresolvable civil times.
pub fn convert_civil(
    catalog: &ZoneCatalog,
    home: &str,
    targets: &[String],
    civil: NaiveDateTime,
    fold: FoldPolicy,
    gap: GapPolicy,
) -> Result<Conversion> {
    let home_tz = catalog.resolve(home)?;
    let target_tzs = resolve_targets(catalog, targets)?;

    let (instant, resolution) = localize(civil, home_tz, fold, gap)?;
    Ok(assemble(instant, resolution, home_tz, &target_tzs))
}

/// Project an instant into the home zone and every target zone.
///
/// Used for current-time conversion, where the instant is already absolute
/// and no disambiguation is involved.
///
/// # Errors
///
/// [`ZoneShiftError::UnknownZone`] for any unrecognized zone identifier.
pub fn convert_instant(
    catalog: &ZoneCatalog,
    home: &str,
    targets: &[String],
    instant: DateTime<Utc>,
) -> Result<Conversion> {
    let home_tz = catalog.resolve(home)?;
    let target_tzs = resolve_targets(catalog, targets)?;

    Ok(assemble(instant, Resolution::Normal, home_tz, &target_tzs))
}

fn resolve_targets(catalog: &ZoneCatalog, targets: &[String]) -> Result<Vec<Tz>> {
    targets.iter().map(|name| catalog.resolve(name)).collect()
}

fn assemble(
    instant: DateTime<Utc>,
    resolution: Resolution,
    home_tz: Tz,
    target_tzs: &[Tz],
) -> Conversion {
    Conversion {
        instant_utc: format_instant(instant),
        epoch_seconds: instant.timestamp(),
        resolution,
        source: project(instant, home_tz),
        targets: target_tzs.iter().map(|&tz| project(instant, tz)).collect(),
    }
}

/// Format an offset in seconds as `UTC±HH:MM`.
///
/// Sign is `+` for zero and positive offsets; zero formats as `UTC+00:00`.
pub fn format_offset(seconds: i32) -> String {
    let sign = if seconds >= 0 { '+' } else { '-' };
    let magnitude = seconds.unsigned_abs();
    let hours = magnitude / 3600;
    let minutes = (magnitude % 3600) / 60;
    format!("UTC{sign}{hours:02}:{minutes:02}")
}

/// Parse a `UTC±HH:MM` string back into offset seconds.
///
/// # Errors
///
/// [`ZoneShiftError::ParseError`] for anything not in that exact shape.
pub fn parse_offset(s: &str) -> Result<i32> {
    let err = || {
        ZoneShiftError::ParseError(format!("Invalid offset '{}'. Expected UTC+HH:MM or UTC-HH:MM", s))
    };

    let rest = s.strip_prefix("UTC").ok_or_else(err)?;
    let (sign, digits) = match rest.chars().next() {
        Some('+') => (1, &rest[1..]),
        Some('-') => (-1, &rest[1..]),
        _ => return Err(err()),
    };

    let (hours, minutes) = digits.split_once(':').ok_or_else(err)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(err());
    }
    let hours: i32 = hours.parse().map_err(|_| err())?;
    let minutes: i32 = minutes.parse().map_err(|_| err())?;
    if hours >= 24 || minutes >= 60 {
        return Err(err());
    }

    Ok(sign * (hours * 3600 + minutes * 60))
}

/// Format an instant as ISO-8601 UTC with Z suffix.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn next_valid_local(civil: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    // Search forward second-by-second for the first representable local time.
    // The wide bound handles rare historical transitions with large gaps.
    let max_seconds = 2 * 24 * 60 * 60;

    for seconds in 1..=max_seconds {
        let candidate = civil + Duration::seconds(i64::from(seconds));
        let local_result = tz.from_local_datetime(&candidate);

        if let Some(dt) = local_result.single().or_else(|| local_result.earliest()) {
            return Some(dt);
        }
    }

    None
}

fn previous_valid_local(civil: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    let max_seconds = 2 * 24 * 60 * 60;

    for seconds in 1..=max_seconds {
        let candidate = civil - Duration::seconds(i64::from(seconds));
        let local_result = tz.from_local_datetime(&candidate);

        if let Some(dt) = local_result.single().or_else(|| local_result.latest()) {
            return Some(dt);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_york() -> Tz {
        "America/New_York".parse().unwrap()
    }

    fn civil(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn interpret_unique() {
        let result = interpret(civil(2024, 6, 1, 15, 0, 0), new_york());
        assert!(matches!(result, LocalInterpretation::Unique(_)));
    }

    #[test]
    fn interpret_ambiguous_fall_back() {
        // Clocks in New York fell back 02:00 -> 01:00 on 2023-11-05
        let result = interpret(civil(2023, 11, 5, 1, 30, 0), new_york());

        match result {
            LocalInterpretation::Ambiguous { earlier, later } => {
                assert_eq!(later.with_timezone(&Utc) - earlier.with_timezone(&Utc),
                    Duration::hours(1));
            }
            other => panic!("Expected Ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn interpret_gap_spring_forward() {
        // Clocks in New York sprang forward 02:00 -> 03:00 on 2023-03-12
        let result = interpret(civil(2023, 3, 12, 2, 30, 0), new_york());

        match result {
            LocalInterpretation::Gap { start, end } => {
                assert_eq!(start, civil(2023, 3, 12, 2, 0, 0));
                assert_eq!(end, civil(2023, 3, 12, 3, 0, 0));
            }
            other => panic!("Expected Gap, got {:?}", other),
        }
    }

    #[test]
    fn localize_normal() {
        let (instant, resolution) = localize(
            civil(2024, 6, 1, 15, 0, 0),
            "Asia/Kolkata".parse().unwrap(),
            FoldPolicy::default(),
            GapPolicy::default(),
        )
        .unwrap();

        assert_eq!(resolution, Resolution::Normal);
        assert_eq!(format_instant(instant), "2024-06-01T09:30:00Z");
    }

    #[test]
    fn localize_ambiguous_defaults_to_earlier() {
        let (earlier_instant, resolution) = localize(
            civil(2023, 11, 5, 1, 30, 0),
            new_york(),
            FoldPolicy::default(),
            GapPolicy::default(),
        )
        .unwrap();

        assert_eq!(resolution, Resolution::EarlierOccurrence);
        assert_eq!(format_instant(earlier_instant), "2023-11-05T05:30:00Z");

        let (later_instant, resolution) = localize(
            civil(2023, 11, 5, 1, 30, 0),
            new_york(),
            FoldPolicy::Later,
            GapPolicy::default(),
        )
        .unwrap();

        assert_eq!(resolution, Resolution::LaterOccurrence);
        assert_eq!(later_instant - earlier_instant, Duration::hours(1));
    }

    #[test]
    fn localize_gap_shifts_forward_by_default() {
        let (instant, resolution) = localize(
            civil(2023, 3, 12, 2, 30, 0),
            new_york(),
            FoldPolicy::default(),
            GapPolicy::default(),
        )
        .unwrap();

        assert_eq!(resolution, Resolution::ShiftedForward);

        // Equal to localizing 03:30:00 the same day
        let (expected, _) = localize(
            civil(2023, 3, 12, 3, 30, 0),
            new_york(),
            FoldPolicy::default(),
            GapPolicy::default(),
        )
        .unwrap();
        assert_eq!(instant, expected);
    }

    #[test]
    fn localize_gap_shift_backward() {
        let (instant, resolution) = localize(
            civil(2023, 3, 12, 2, 30, 0),
            new_york(),
            FoldPolicy::default(),
            GapPolicy::ShiftBackward,
        )
        .unwrap();

        assert_eq!(resolution, Resolution::ShiftedBackward);
        // 01:30 EST = 06:30 UTC
        assert_eq!(format_instant(instant), "2023-03-12T06:30:00Z");
    }

    #[test]
    fn project_scenario_kolkata_to_los_angeles() {
        let (instant, _) = localize(
            civil(2024, 6, 1, 15, 0, 0),
            "Asia/Kolkata".parse().unwrap(),
            FoldPolicy::default(),
            GapPolicy::default(),
        )
        .unwrap();

        let localized = project(instant, "America/Los_Angeles".parse().unwrap());

        assert_eq!(localized.civil, "2024-06-01 02:30:00");
        assert_eq!(localized.weekday, "Saturday");
        assert_eq!(localized.abbreviation, "PDT");
        assert_eq!(localized.offset, "UTC-07:00");
        assert_eq!(localized.epoch_seconds, 1717234200);
        assert_eq!(localized.instant_utc, "2024-06-01T09:30:00Z");
    }

    #[test]
    fn project_is_deterministic() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).single().unwrap();
        let tz = "Europe/Berlin".parse().unwrap();

        assert_eq!(project(instant, tz), project(instant, tz));
    }

    #[test]
    fn round_trip_preserves_instant() {
        let tz: Tz = "Europe/Berlin".parse().unwrap();
        let instants = [
            Utc.with_ymd_and_hms(2024, 1, 15, 18, 45, 12).single().unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).single().unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 29, 12, 0, 0).single().unwrap(),
        ];

        for instant in instants {
            let localized = project(instant, tz);
            let civil = NaiveDateTime::parse_from_str(&localized.civil, "%Y-%m-%d %H:%M:%S")
                .unwrap();
            let (recovered, resolution) =
                localize(civil, tz, FoldPolicy::default(), GapPolicy::default()).unwrap();

            assert_eq!(resolution, Resolution::Normal);
            assert_eq!(recovered, instant);
        }
    }

    #[test]
    fn convert_civil_full_result() {
        let catalog = ZoneCatalog::build(
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single().unwrap(),
        );
        let conversion = convert_civil(
            &catalog,
            "Asia/Kolkata",
            &["America/Los_Angeles".to_string(), "Europe/Berlin".to_string()],
            civil(2024, 6, 1, 15, 0, 0),
            FoldPolicy::default(),
            GapPolicy::default(),
        )
        .unwrap();

        assert_eq!(conversion.instant_utc, "2024-06-01T09:30:00Z");
        assert_eq!(conversion.epoch_seconds, 1717234200);
        assert_eq!(conversion.resolution, Resolution::Normal);
        assert_eq!(conversion.source.zone, "Asia/Kolkata");
        assert_eq!(conversion.source.abbreviation, "IST");
        assert_eq!(conversion.source.offset, "UTC+05:30");
        assert_eq!(conversion.targets.len(), 2);
        assert_eq!(conversion.targets[0].civil, "2024-06-01 02:30:00");
        assert_eq!(conversion.targets[1].civil, "2024-06-01 11:30:00");
        assert_eq!(conversion.targets[1].abbreviation, "CEST");
    }

    #[test]
    fn convert_rejects_unknown_zones() {
        let catalog = ZoneCatalog::build(
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single().unwrap(),
        );

        let bad_home = convert_civil(
            &catalog,
            "Nowhere/City",
            &[],
            civil(2024, 6, 1, 15, 0, 0),
            FoldPolicy::default(),
            GapPolicy::default(),
        );
        assert!(matches!(bad_home, Err(ZoneShiftError::UnknownZone(_))));

        let bad_target = convert_instant(
            &catalog,
            "UTC",
            &["Nowhere/City".to_string()],
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single().unwrap(),
        );
        assert!(matches!(bad_target, Err(ZoneShiftError::UnknownZone(_))));
    }

    #[test]
    fn offset_format() {
        assert_eq!(format_offset(19800), "UTC+05:30");
        assert_eq!(format_offset(-25200), "UTC-07:00");
        assert_eq!(format_offset(0), "UTC+00:00");
        assert_eq!(format_offset(-12600), "UTC-03:30");
        assert_eq!(format_offset(45900), "UTC+12:45");
    }

    #[test]
    fn offset_format_round_trip() {
        for s in ["UTC+05:30", "UTC-07:00", "UTC+00:00", "UTC-09:30", "UTC+13:00"] {
            assert_eq!(format_offset(parse_offset(s).unwrap()), s);
        }
    }

    #[test]
    fn offset_parse_rejects_malformed_input() {
        for s in ["GMT+05:30", "UTC05:30", "UTC+5:30", "UTC+05:3", "UTC+25:00", "UTC+05:75", "UTC+aa:bb"] {
            assert!(parse_offset(s).is_err(), "expected error for {:?}", s);
        }
    }
}
