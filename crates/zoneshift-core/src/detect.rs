//! Home-zone detection.
//!
//! A strictly ordered, short-circuiting chain of heuristics, each backed by
//! a probe that may abstain. The chain never fails: if every probe abstains
//! or produces a name the catalog rejects, detection terminates at UTC.
//!
//! Priority order:
//! 1. `TZ` environment variable ([`DetectionSource::Env`])
//! 2. Platform-reported IANA zone name ([`DetectionSource::PlatformName`])
//! 3. Local-time abbreviation via a static table ([`DetectionSource::AbbrevMap`])
//! 4. Current UTC offset matched against the catalog ([`DetectionSource::OffsetMatch`])
//! 5. UTC ([`DetectionSource::Fallback`])

use chrono::{Local, Offset};
use chrono_tz::Tz;

use crate::catalog::ZoneCatalog;
use crate::models::{Detection, DetectionSource};

/// Environment variable consulted by the override probe.
pub const ENV_ZONE_VAR: &str = "TZ";

/// Abbreviation to preferred canonical zone.
///
/// Common abbreviations are not unique in the real world (IST is India,
/// Israel, and Ireland); each entry picks one default. A deliberately
/// incomplete table: anything not listed falls through to offset matching.
pub const ABBREVIATION_ZONES: &[(&str, &str)] = &[
    ("EST", "America/New_York"),
    ("EDT", "America/New_York"),
    ("PST", "America/Los_Angeles"),
    ("PDT", "America/Los_Angeles"),
    ("CST", "America/Chicago"),
    ("CDT", "America/Chicago"),
    ("MST", "America/Denver"),
    ("MDT", "America/Denver"),
    ("GMT", "Europe/London"),
    ("BST", "Europe/London"),
    ("UTC", "UTC"),
    ("CET", "Europe/Paris"),
    ("CEST", "Europe/Paris"),
    ("JST", "Asia/Tokyo"),
    ("KST", "Asia/Seoul"),
    ("IST", "Asia/Kolkata"),
    ("AEST", "Australia/Sydney"),
    ("AEDT", "Australia/Sydney"),
    ("NZST", "Pacific/Auckland"),
    ("NZDT", "Pacific/Auckland"),
];

/// Same-offset tie break: the zone preferred whenever it matches.
const PREFERRED_OFFSET_ZONE: &str = "Asia/Kolkata";

/// Same-offset tie break: failing the preferred zone, take the first match
/// under a major continental prefix before falling back to catalog order.
const CONTINENTAL_PREFIXES: &[&str] = &[
    "Africa/",
    "America/",
    "Asia/",
    "Australia/",
    "Europe/",
    "Pacific/",
];

/// Environmental signals feeding the detection chain.
///
/// Each probe may abstain by returning `None`; probe failures must be
/// absorbed into abstention, never propagated. Implemented by
/// [`SystemProbes`] for the real host and by test doubles for the chain's
/// unit tests.
pub trait Probes {
    /// Value of the `TZ` override variable, if set.
    fn env_zone(&self) -> Option<String>;
    /// The platform's configured IANA zone name, if it exposes one.
    fn platform_zone(&self) -> Option<String>;
    /// The host's current local-time abbreviation (e.g., "PST"), if the
    /// platform exposes a name rather than a bare offset.
    fn local_abbreviation(&self) -> Option<String>;
    /// The host's current UTC offset in seconds.
    fn local_offset_seconds(&self) -> Option<i32>;
}

/// Probes backed by the real host environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbes;

impl Probes for SystemProbes {
    fn env_zone(&self) -> Option<String> {
        std::env::var(ENV_ZONE_VAR).ok()
    }

    fn platform_zone(&self) -> Option<String> {
        iana_time_zone::get_timezone().ok()
    }

    fn local_abbreviation(&self) -> Option<String> {
        // chrono renders a numeric offset ("+05:30") where no name is
        // available; only an alphabetic rendering counts as an abbreviation.
        let name = Local::now().format("%Z").to_string();
        (!name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic())).then_some(name)
    }

    fn local_offset_seconds(&self) -> Option<i32> {
        Some(Local::now().offset().fix().local_minus_utc())
    }
}

/// Detect the home zone from the real host environment.
///
/// Total function: always returns a zone present in the catalog.
pub fn detect(catalog: &ZoneCatalog) -> Detection {
    detect_with(catalog, &SystemProbes)
}

/// Detect the home zone from the supplied probes.
///
/// The first heuristic producing a catalog member wins; a probe that
/// abstains or names an unknown zone falls through to the next.
pub fn detect_with(catalog: &ZoneCatalog, probes: &dyn Probes) -> Detection {
    if let Some(zone) = probes.env_zone().and_then(|name| catalog.find(&name)) {
        return Detection {
            zone,
            source: DetectionSource::Env,
        };
    }

    if let Some(zone) = probes.platform_zone().and_then(|name| catalog.find(&name)) {
        return Detection {
            zone,
            source: DetectionSource::PlatformName,
        };
    }

    if let Some(zone) = probes
        .local_abbreviation()
        .and_then(|abbrev| zone_for_abbreviation(catalog, &abbrev))
    {
        return Detection {
            zone,
            source: DetectionSource::AbbrevMap,
        };
    }

    if let Some(zone) = probes
        .local_offset_seconds()
        .and_then(|offset| zone_for_offset(catalog, offset))
    {
        return Detection {
            zone,
            source: DetectionSource::OffsetMatch,
        };
    }

    Detection {
        zone: Tz::UTC,
        source: DetectionSource::Fallback,
    }
}

fn zone_for_abbreviation(catalog: &ZoneCatalog, abbreviation: &str) -> Option<Tz> {
    let upper = abbreviation.to_ascii_uppercase();
    ABBREVIATION_ZONES
        .iter()
        .find(|(known, _)| upper == *known)
        .and_then(|(_, zone)| catalog.find(zone))
}

fn zone_for_offset(catalog: &ZoneCatalog, offset_seconds: i32) -> Option<Tz> {
    let matches: Vec<Tz> = catalog
        .zones()
        .iter()
        .copied()
        .filter(|&tz| catalog.snapshot_offset(tz) == offset_seconds)
        .collect();

    if let Some(&preferred) = matches
        .iter()
        .find(|tz| tz.name() == PREFERRED_OFFSET_ZONE)
    {
        return Some(preferred);
    }

    matches
        .iter()
        .copied()
        .find(|tz| {
            CONTINENTAL_PREFIXES
                .iter()
                .any(|prefix| tz.name().starts_with(prefix))
        })
        .or_else(|| matches.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// Test double: every probe answer is pinned.
    #[derive(Default)]
    struct StubProbes {
        env: Option<String>,
        platform: Option<String>,
        abbreviation: Option<String>,
        offset: Option<i32>,
    }

    impl Probes for StubProbes {
        fn env_zone(&self) -> Option<String> {
            self.env.clone()
        }
        fn platform_zone(&self) -> Option<String> {
            self.platform.clone()
        }
        fn local_abbreviation(&self) -> Option<String> {
            self.abbreviation.clone()
        }
        fn local_offset_seconds(&self) -> Option<i32> {
            self.offset
        }
    }

    fn catalog() -> ZoneCatalog {
        ZoneCatalog::build(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().unwrap())
    }

    #[test]
    fn env_override_wins() {
        let probes = StubProbes {
            env: Some("Europe/Berlin".to_string()),
            platform: Some("Asia/Tokyo".to_string()),
            ..Default::default()
        };

        let detection = detect_with(&catalog(), &probes);
        assert_eq!(detection.zone.name(), "Europe/Berlin");
        assert_eq!(detection.source, DetectionSource::Env);
    }

    #[test]
    fn unknown_env_value_falls_through() {
        let probes = StubProbes {
            env: Some("Not/AZone".to_string()),
            platform: Some("Asia/Tokyo".to_string()),
            ..Default::default()
        };

        let detection = detect_with(&catalog(), &probes);
        assert_eq!(detection.zone.name(), "Asia/Tokyo");
        assert_eq!(detection.source, DetectionSource::PlatformName);
    }

    #[test]
    fn abbreviation_maps_to_preferred_zone() {
        let probes = StubProbes {
            abbreviation: Some("IST".to_string()),
            ..Default::default()
        };

        let detection = detect_with(&catalog(), &probes);
        assert_eq!(detection.zone.name(), "Asia/Kolkata");
        assert_eq!(detection.source, DetectionSource::AbbrevMap);
    }

    #[test]
    fn abbreviation_lookup_is_case_insensitive() {
        let probes = StubProbes {
            abbreviation: Some("pdt".to_string()),
            ..Default::default()
        };

        let detection = detect_with(&catalog(), &probes);
        assert_eq!(detection.zone.name(), "America/Los_Angeles");
        assert_eq!(detection.source, DetectionSource::AbbrevMap);
    }

    #[test]
    fn unmapped_abbreviation_falls_through_to_offset() {
        let probes = StubProbes {
            abbreviation: Some("XYZT".to_string()),
            offset: Some(19800),
            ..Default::default()
        };

        let detection = detect_with(&catalog(), &probes);
        assert_eq!(detection.source, DetectionSource::OffsetMatch);
    }

    #[test]
    fn offset_match_prefers_kolkata() {
        // +05:30 is shared by Asia/Colombo; Kolkata is the pinned preference
        let probes = StubProbes {
            offset: Some(19800),
            ..Default::default()
        };

        let detection = detect_with(&catalog(), &probes);
        assert_eq!(detection.zone.name(), "Asia/Kolkata");
        assert_eq!(detection.source, DetectionSource::OffsetMatch);
    }

    #[test]
    fn offset_match_takes_first_continental_zone_otherwise() {
        let probes = StubProbes {
            offset: Some(0),
            ..Default::default()
        };

        let detection = detect_with(&catalog(), &probes);
        // First catalog member at UTC+00:00 in June under a continental prefix
        assert_eq!(detection.zone.name(), "Africa/Abidjan");
        assert_eq!(detection.source, DetectionSource::OffsetMatch);
    }

    #[test]
    fn offset_without_any_match_falls_back() {
        let probes = StubProbes {
            // No zone sits at UTC+23:00
            offset: Some(23 * 3600),
            ..Default::default()
        };

        let detection = detect_with(&catalog(), &probes);
        assert_eq!(detection.zone, Tz::UTC);
        assert_eq!(detection.source, DetectionSource::Fallback);
    }

    #[test]
    fn all_probes_abstaining_terminates_at_utc() {
        let catalog = catalog();
        let detection = detect_with(&catalog, &StubProbes::default());

        assert_eq!(detection.zone, Tz::UTC);
        assert_eq!(detection.source, DetectionSource::Fallback);
        assert!(catalog.zones().contains(&detection.zone));
    }

    #[test]
    fn system_detection_always_lands_in_catalog() {
        let catalog = catalog();
        let detection = detect(&catalog);
        assert!(catalog.zones().contains(&detection.zone));
    }
}
