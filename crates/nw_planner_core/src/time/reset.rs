//! Reset scheduler: period tokens, next-reset instants and countdowns.
//!
//! # Responsibility
//! - Derive the canonical period token keying completion records for a
//!   (zone, cadence) pair at a reference instant.
//! - Compute the next UTC instant at which a cadence resets, and a display
//!   countdown toward it.
//!
//! # Invariants
//! - The reset schedule is a fixed system constant: 05:00 local daily,
//!   Tuesday 05:00 local weekly. It is deliberately not per-call
//!   configurable.
//! - Two reference instants map to the same token iff no reset boundary for
//!   that cadence lies between them.
//! - The boundary instant itself (exactly 05:00:00 local) belongs to the
//!   new period: the comparison is strictly `hour < RESET_HOUR`.
//! - `next_reset_instant` is strictly greater than the reference instant.
//! - Token format `YYYY-MM-DD` is a persisted contract: completion records
//!   are keyed by it, so boundary semantics must never drift.
//!
//! # See also
//! - docs/architecture/reset-schedule.md

use crate::time::zoned::{utc_from_wall_clock, wall_clock_of};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Local hour at which both cadences reset.
pub const RESET_HOUR: u32 = 5;

/// Weekday anchor for the weekly cadence, numbered Sunday = 0.
pub const WEEKLY_RESET_WEEKDAY: u32 = 2; // Tuesday

/// Recurrence class of a reset boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// Resets every day at 05:00 local.
    Daily,
    /// Resets every Tuesday at 05:00 local.
    Weekly,
}

impl Cadence {
    /// Storage representation used in task rows and completion keys.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    /// Parses the storage representation, `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            _ => None,
        }
    }
}

/// Canonical key identifying one reset interval.
///
/// The payload is the `YYYY-MM-DD` anchor date of the interval in effect:
/// the local date of the most recent boundary at or before the reference
/// instant. Tokens order lexically in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodToken(String);

impl PeriodToken {
    /// Builds the token for an anchor date.
    pub fn from_anchor_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    /// Returns the token as the storage key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the anchor date back out of the token.
    ///
    /// `None` only for tokens that did not originate from this module
    /// (e.g. the `one-time` pseudo period used by non-recurring tasks).
    pub fn anchor_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }

    /// Token for the interval immediately before this one.
    ///
    /// Pure calendar arithmetic: one day back for daily, seven for weekly.
    /// Used for streak continuity checks.
    pub fn previous(&self, cadence: Cadence) -> Option<Self> {
        let step = match cadence {
            Cadence::Daily => 1,
            Cadence::Weekly => 7,
        };
        self.anchor_date()
            .and_then(|date| date.checked_sub_days(Days::new(step)))
            .map(Self::from_anchor_date)
    }
}

impl Display for PeriodToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-negative duration until a reset, decomposed for display.
///
/// `hours` is not modulo 24: a weekly countdown routinely exceeds a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetCountdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_ms: i64,
    /// Zero-padded `HH:MM:SS`.
    pub formatted: String,
}

impl ResetCountdown {
    /// Returns whether the countdown has hit the floor.
    pub fn is_elapsed(&self) -> bool {
        self.total_ms == 0
    }
}

/// Derives the period token for `(tz, cadence)` at `reference`.
pub fn period_token(tz: Tz, cadence: Cadence, reference: DateTime<Utc>) -> PeriodToken {
    let wall = wall_clock_of(tz, reference);
    let today = wall.date();
    let anchor = match cadence {
        Cadence::Daily => {
            if wall.hour < RESET_HOUR {
                back_days(today, 1)
            } else {
                today
            }
        }
        Cadence::Weekly => {
            let weekday = today.weekday().num_days_from_sunday();
            let days_since_anchor = (weekday + 7 - WEEKLY_RESET_WEEKDAY) % 7;
            let mut anchor = back_days(today, u64::from(days_since_anchor));
            // On the anchor weekday before 05:00 the boundary has not
            // occurred yet; we are still in last week's period.
            if days_since_anchor == 0 && wall.hour < RESET_HOUR {
                anchor = back_days(anchor, 7);
            }
            anchor
        }
    };
    PeriodToken::from_anchor_date(anchor)
}

/// Derives the period token at the current instant.
pub fn period_token_now(tz: Tz, cadence: Cadence) -> PeriodToken {
    period_token(tz, cadence, Utc::now())
}

/// Computes the next UTC instant at which `cadence` resets in `tz`,
/// strictly after `reference`.
pub fn next_reset_instant(tz: Tz, cadence: Cadence, reference: DateTime<Utc>) -> DateTime<Utc> {
    let today = wall_clock_of(tz, reference).date();
    match cadence {
        Cadence::Daily => {
            let candidate = utc_from_wall_clock(tz, today, reset_time());
            if candidate <= reference {
                utc_from_wall_clock(tz, forward_days(today, 1), reset_time())
            } else {
                candidate
            }
        }
        Cadence::Weekly => {
            let weekday = today.weekday().num_days_from_sunday();
            let days_until_anchor = (WEEKLY_RESET_WEEKDAY + 7 - weekday) % 7;
            let anchor_day = forward_days(today, u64::from(days_until_anchor));
            let candidate = utc_from_wall_clock(tz, anchor_day, reset_time());
            if candidate <= reference {
                utc_from_wall_clock(tz, forward_days(anchor_day, 7), reset_time())
            } else {
                candidate
            }
        }
    }
}

/// Computes the next reset instant relative to the current instant.
pub fn next_reset_instant_now(tz: Tz, cadence: Cadence) -> DateTime<Utc> {
    next_reset_instant(tz, cadence, Utc::now())
}

/// Decomposes the remaining time until `target` into a display countdown.
///
/// The delta is clamped at zero: a target at or before the reference
/// renders as `00:00:00`, never negative.
pub fn countdown_to(target: DateTime<Utc>, reference: DateTime<Utc>) -> ResetCountdown {
    let total_ms = (target - reference).num_milliseconds().max(0);
    let total_seconds = total_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    ResetCountdown {
        hours,
        minutes,
        seconds,
        total_ms,
        formatted: format!("{hours:02}:{minutes:02}:{seconds:02}"),
    }
}

/// Countdown until the next reset of `cadence` in `tz` as of `reference`.
pub fn countdown_until_reset(tz: Tz, cadence: Cadence, reference: DateTime<Utc>) -> ResetCountdown {
    countdown_to(next_reset_instant(tz, cadence, reference), reference)
}

fn reset_time() -> NaiveTime {
    NaiveTime::from_hms_opt(RESET_HOUR, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn back_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(date)
}

fn forward_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}
