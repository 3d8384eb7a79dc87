//! Core data types for zoneshift.
//!
//! This module defines the primary types used throughout the library:
//! - [`FoldPolicy`] - How to resolve ambiguous (fall-back) local times
//! - [`GapPolicy`] - How to resolve nonexistent (spring-forward) local times
//! - [`Resolution`] - How a civil-to-instant conversion was disambiguated
//! - [`DetectionSource`] - Which heuristic produced the home zone
//! - [`Detection`] - A detected home zone with its rationale
//! - [`LocalizedTime`] - An instant projected into one zone
//! - [`Conversion`] - Complete result of a conversion request

use chrono_tz::Tz;
use serde::Serialize;

/// Tie break for ambiguous local times.
///
/// Ambiguous times occur during DST fall back when a range of local
/// times occurs twice (e.g., 01:00-01:59 in America/New_York).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FoldPolicy {
    /// Use the first occurrence (the offset in effect before the transition).
    #[default]
    Earlier,
    /// Use the second occurrence (the offset in effect after the transition).
    Later,
}

impl std::fmt::Display for FoldPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FoldPolicy::Earlier => write!(f, "earlier"),
            FoldPolicy::Later => write!(f, "later"),
        }
    }
}

/// Resolution direction for nonexistent local times.
///
/// Nonexistent times occur during DST spring forward when a range of
/// local times is skipped (e.g., 02:00-02:59 in America/New_York).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GapPolicy {
    /// Shift the civil time one hour forward and retry.
    #[default]
    ShiftForward,
    /// Shift the civil time one hour backward and retry.
    ShiftBackward,
}

impl std::fmt::Display for GapPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GapPolicy::ShiftForward => write!(f, "shift-forward"),
            GapPolicy::ShiftBackward => write!(f, "shift-backward"),
        }
    }
}

/// How a civil-to-instant conversion was disambiguated.
///
/// Only meaningful on the output of a localize operation; a plain
/// instant-to-civil projection always reports [`Resolution::Normal`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resolution {
    /// Exactly one offset mapped the civil time to an instant.
    #[default]
    Normal,
    /// The civil time occurred twice; the first occurrence was used.
    EarlierOccurrence,
    /// The civil time occurred twice; the second occurrence was used.
    LaterOccurrence,
    /// The civil time was skipped; it was shifted one hour forward.
    ShiftedForward,
    /// The civil time was skipped; it was shifted one hour backward.
    ShiftedBackward,
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Normal => write!(f, "normal"),
            Resolution::EarlierOccurrence => write!(f, "earlier-occurrence"),
            Resolution::LaterOccurrence => write!(f, "later-occurrence"),
            Resolution::ShiftedForward => write!(f, "shifted-forward"),
            Resolution::ShiftedBackward => write!(f, "shifted-backward"),
        }
    }
}

/// Which heuristic produced the detected home zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionSource {
    /// The `TZ` environment variable named a known zone.
    Env,
    /// The platform reported its configured IANA zone name.
    PlatformName,
    /// The local-time abbreviation matched the static abbreviation table.
    AbbrevMap,
    /// A catalog zone shared the host's current UTC offset.
    OffsetMatch,
    /// Every heuristic abstained; UTC was used.
    Fallback,
}

impl std::fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionSource::Env => write!(f, "env"),
            DetectionSource::PlatformName => write!(f, "platform-name"),
            DetectionSource::AbbrevMap => write!(f, "abbrev-map"),
            DetectionSource::OffsetMatch => write!(f, "offset-match"),
            DetectionSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// A detected home zone with the heuristic that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// The detected zone; always a member of the catalog.
    pub zone: Tz,
    /// The heuristic that decided.
    pub source: DetectionSource,
}

/// An instant projected into one zone's civil representation.
///
/// Derived, never stored: a pure value computed from an instant and a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedTime {
    /// IANA zone identifier.
    pub zone: String,
    /// Civil time in `YYYY-MM-DD HH:MM:SS` format.
    pub civil: String,
    /// Full weekday name (e.g., "Saturday").
    pub weekday: String,
    /// Zone abbreviation at the instant (e.g., "PDT").
    pub abbreviation: String,
    /// Formatted UTC offset at the instant (e.g., "UTC-07:00").
    pub offset: String,
    /// The instant as Unix epoch seconds.
    pub epoch_seconds: i64,
    /// The instant in ISO-8601 UTC (e.g., "2024-06-01T09:30:00Z").
    pub instant_utc: String,
}

/// Complete result of a conversion request.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    /// The resolved instant in ISO-8601 UTC.
    pub instant_utc: String,
    /// The resolved instant as Unix epoch seconds.
    pub epoch_seconds: i64,
    /// How the source civil time was disambiguated.
    pub resolution: Resolution,
    /// The instant projected into the source zone.
    pub source: LocalizedTime,
    /// The instant projected into each target zone.
    pub targets: Vec<LocalizedTime>,
}
