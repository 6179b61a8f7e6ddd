//! Zoned-time engine: UTC <-> wall-clock conversion for IANA zones.
//!
//! # Responsibility
//! - Decompose a UTC instant into the wall-clock fields a clock in a given
//!   zone would display, and map wall-clock fields back to a UTC instant.
//! - Never depend on the ambient system time zone.
//!
//! # Invariants
//! - `utc_from_wall_clock` is total: ambiguous local times (fall-back fold)
//!   resolve to the earlier occurrence, nonexistent local times
//!   (spring-forward gap) are nudged forward until they exist.
//! - Unknown zone identifiers are resolved *before* this layer via
//!   `zone_or_utc`; the caller owning a log context is responsible for
//!   warning about the fallback.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;

/// Calendar/time-of-day fields as displayed by a clock in one zone.
///
/// Distinct from the underlying UTC instant: the same instant yields
/// different `WallClock` values in different zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    pub year: i32,
    /// 1..=12
    pub month: u32,
    /// 1..=31
    pub day: u32,
    /// 0..=23
    pub hour: u32,
    /// 0..=59
    pub minute: u32,
    /// 0..=59
    pub second: u32,
}

impl WallClock {
    /// Returns the wall-clock calendar date.
    ///
    /// Values produced by `wall_clock_of` always carry a valid date; a
    /// hand-built out-of-range struct degrades to `NaiveDate::MIN` rather
    /// than panicking.
    pub fn date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).unwrap_or(NaiveDate::MIN)
    }

    /// Returns the wall-clock time of day, `NaiveTime::MIN` for out-of-range
    /// fields.
    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, self.second).unwrap_or(NaiveTime::MIN)
    }
}

/// Resolves an IANA zone identifier, `None` when the identifier is unknown
/// to the bundled tz database.
pub fn parse_zone(identifier: &str) -> Option<Tz> {
    identifier.parse::<Tz>().ok()
}

/// Resolves an IANA zone identifier with the documented degraded fallback:
/// unknown identifiers become UTC.
///
/// Reset tracking must stay available even for a mistyped zone in
/// configuration data, so this never fails. Callers that can log should
/// detect the fallback via `parse_zone` and emit a warning.
pub fn zone_or_utc(identifier: &str) -> Tz {
    parse_zone(identifier).unwrap_or(Tz::UTC)
}

/// Decomposes a UTC instant into the wall-clock fields shown in `tz`.
pub fn wall_clock_of(tz: Tz, instant: DateTime<Utc>) -> WallClock {
    let local = instant.with_timezone(&tz);
    WallClock {
        year: local.year(),
        month: local.month(),
        day: local.day(),
        hour: local.hour(),
        minute: local.minute(),
        second: local.second(),
    }
}

/// Maps wall-clock fields intended as local time in `tz` to a UTC instant.
///
/// DST resolution:
/// - unambiguous local time -> its unique instant;
/// - ambiguous local time (fall-back fold) -> the earlier occurrence;
/// - nonexistent local time (spring-forward gap) -> the requested wall time
///   is nudged forward one hour at a time until it exists (lossy, documented).
pub fn utc_from_wall_clock(tz: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(local) => local.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        LocalResult::None => {
            // Gaps are one hour in almost every zone; a few historical
            // transitions jump further, hence the bounded scan.
            let mut nudged = naive;
            for _ in 0..24 {
                nudged += Duration::hours(1);
                match tz.from_local_datetime(&nudged) {
                    LocalResult::Single(local) => return local.with_timezone(&Utc),
                    LocalResult::Ambiguous(earlier, _) => return earlier.with_timezone(&Utc),
                    LocalResult::None => continue,
                }
            }
            // Unreachable for any real tz data; interpret as UTC rather
            // than fail.
            Utc.from_utc_datetime(&naive)
        }
    }
}

/// Returns the weekday shown in `tz` at `instant`, numbered Sunday = 0.
pub fn weekday_of(tz: Tz, instant: DateTime<Utc>) -> u32 {
    instant
        .with_timezone(&tz)
        .weekday()
        .num_days_from_sunday()
}
