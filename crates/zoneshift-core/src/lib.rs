//! # zoneshift-core
//!
//! A DST-safe civil-time conversion library for Rust.
//!
//! This library converts a point in civil (wall-clock) time between IANA
//! timezone identifiers, with explicit handling of the two daylight-saving
//! edge cases, and detects a plausible "home" timezone from environmental
//! signals when none is supplied.
//!
//! ## Features
//!
//! - **Explicit DST handling**: Ambiguous (fall-back) and nonexistent
//!   (spring-forward) local times are classified before an interpretation is
//!   chosen, and resolved by caller-supplied policies.
//! - **Zone catalog**: A stable, deterministic zone enumeration with a
//!   per-snapshot offset map and a time-to-live window.
//! - **Home-zone detection**: A short-circuiting heuristic chain (override
//!   variable, platform name, abbreviation table, offset match) that always
//!   terminates with a valid zone.
//! - **IANA Timezones**: Full support for the IANA timezone database via
//!   chrono-tz.
//!
//! ## Example
//!
//! ```rust
//! use zoneshift_core::prelude::*;
//! use chrono::{NaiveDate, Utc};
//!
//! let catalog = ZoneCatalog::build(Utc::now());
//!
//! let civil = NaiveDate::from_ymd_opt(2024, 6, 1)
//!     .unwrap()
//!     .and_hms_opt(15, 0, 0)
//!     .unwrap();
//!
//! let conversion = convert_civil(
//!     &catalog,
//!     "Asia/Kolkata",
//!     &["America/Los_Angeles".to_string()],
//!     civil,
//!     FoldPolicy::default(),
//!     GapPolicy::default(),
//! )
//! .unwrap();
//!
//! println!("Instant: {}", conversion.instant_utc);
//! println!("Los Angeles: {}", conversion.targets[0].civil);
//! ```

pub mod catalog;
pub mod convert;
pub mod detect;
pub mod error;
pub mod models;

// Re-export commonly used types at the crate root
pub use catalog::ZoneCatalog;
pub use convert::{
    LocalInterpretation, convert_civil, convert_instant, format_instant, format_offset, interpret,
    localize, parse_offset, project,
};
pub use detect::{Probes, SystemProbes, detect, detect_with};
pub use error::{Result, ZoneShiftError};
pub use models::{
    Conversion, Detection, DetectionSource, FoldPolicy, GapPolicy, LocalizedTime, Resolution,
};

/// Prelude module for convenient imports.
///
/// ```
/// use zoneshift_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::catalog::ZoneCatalog;
    pub use crate::convert::{
        LocalInterpretation, convert_civil, convert_instant, format_offset, interpret, localize,
        parse_offset, project,
    };
    pub use crate::detect::{detect, detect_with};
    pub use crate::error::{Result, ZoneShiftError};
    pub use crate::models::*;
}
