//! Error types for zoneshift-core.
//!
//! This module defines the error types used throughout the library,
//! with specific error categories for unknown zones, input parsing,
//! and unresolvable local times.

use thiserror::Error;

/// The main error type for zoneshift operations.
#[derive(Debug, Error)]
pub enum ZoneShiftError {
    /// A zone identifier that is not present in the timezone database.
    #[error("Unknown timezone: {0}")]
    UnknownZone(String),

    /// Error parsing civil-time or offset input.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A local time that still falls in a DST gap after the gap policy
    /// shifted it by one hour. Not reachable with current zone data.
    #[error("Unresolved local time: {0}")]
    UnresolvedLocalTime(String),
}

/// Result type alias for zoneshift operations.
pub type Result<T> = std::result::Result<T, ZoneShiftError>;
