//! Zone catalog with a time-to-live offset snapshot.
//!
//! The catalog is an explicit value object: it enumerates every zone in the
//! IANA database in a stable order and freezes each zone's UTC offset as of
//! its build instant. All labels produced from one snapshot therefore share
//! a single reference instant, even if a DST change lands mid-window.
//! Rebuilding on expiry replaces the whole value, so readers of the old
//! snapshot never observe a partial update.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Offset, TimeZone, Utc};
use chrono_tz::{TZ_VARIANTS, Tz};

use crate::error::{Result, ZoneShiftError};

/// Default snapshot lifetime in seconds.
pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// A snapshot of the zone database: the full ordered enumeration plus each
/// zone's UTC offset as of the build instant.
#[derive(Debug, Clone)]
pub struct ZoneCatalog {
    zones: Vec<Tz>,
    offsets: HashMap<Tz, i32>,
    built_at: DateTime<Utc>,
    ttl: Duration,
}

impl ZoneCatalog {
    /// Build a catalog snapshot as of `now` with the default TTL.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use zoneshift_core::catalog::ZoneCatalog;
    ///
    /// let catalog = ZoneCatalog::build(Utc::now());
    /// assert!(catalog.zones().len() > 400);
    /// ```
    pub fn build(now: DateTime<Utc>) -> Self {
        Self::with_ttl(now, Duration::seconds(DEFAULT_TTL_SECONDS))
    }

    /// Build a catalog snapshot as of `now` with an explicit TTL.
    pub fn with_ttl(now: DateTime<Utc>, ttl: Duration) -> Self {
        let mut zones: Vec<Tz> = TZ_VARIANTS.to_vec();
        zones.sort_by(|a, b| a.name().cmp(b.name()));

        let offsets = zones
            .iter()
            .map(|&tz| (tz, offset_seconds(tz, now)))
            .collect();

        Self {
            zones,
            offsets,
            built_at: now,
            ttl,
        }
    }

    /// The full zone enumeration, sorted by name.
    ///
    /// Identical across calls on the same snapshot.
    pub fn zones(&self) -> &[Tz] {
        &self.zones
    }

    /// Look up a zone identifier, returning `None` if it is not in the
    /// database. Non-erroring variant used by the detector heuristics.
    pub fn find(&self, name: &str) -> Option<Tz> {
        name.parse::<Tz>().ok()
    }

    /// Resolve a zone identifier against the database.
    ///
    /// # Errors
    ///
    /// [`ZoneShiftError::UnknownZone`] if the identifier is not known.
    pub fn resolve(&self, name: &str) -> Result<Tz> {
        self.find(name)
            .ok_or_else(|| ZoneShiftError::UnknownZone(name.to_string()))
    }

    /// The zone's UTC offset in seconds at a specific instant.
    ///
    /// # Errors
    ///
    /// [`ZoneShiftError::UnknownZone`] if the identifier is not known.
    pub fn offset_at(&self, name: &str, at: DateTime<Utc>) -> Result<i32> {
        let tz = self.resolve(name)?;
        Ok(offset_seconds(tz, at))
    }

    /// The zone's UTC offset in seconds as frozen at build time.
    ///
    /// Every label in one render pass uses this snapshot, so they all share
    /// the build instant as their reference point. True current offsets can
    /// briefly disagree during an in-flight DST change; that staleness is
    /// bounded by the TTL and accepted.
    pub fn snapshot_offset(&self, tz: Tz) -> i32 {
        self.offsets
            .get(&tz)
            .copied()
            .unwrap_or_else(|| offset_seconds(tz, self.built_at))
    }

    /// The instant this snapshot was built.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// The snapshot lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether the snapshot has outlived its TTL at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.built_at >= self.ttl
    }

    /// Replace this snapshot with a fresh one built at `now`.
    ///
    /// Wholesale value replacement: clones of the old snapshot keep serving
    /// their original data.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        *self = Self::with_ttl(now, self.ttl);
    }
}

fn offset_seconds(tz: Tz, at: DateTime<Utc>) -> i32 {
    tz.offset_from_utc_datetime(&at.naive_utc())
        .fix()
        .local_minus_utc()
}
