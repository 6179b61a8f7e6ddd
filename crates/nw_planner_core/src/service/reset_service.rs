//! Reset status use-case service for UI polling.
//!
//! # Responsibility
//! - Compose the pure reset core into a per-character status snapshot
//!   (tokens, next-reset instants, countdowns).
//!
//! # Invariants
//! - Every call recomputes from scratch; this service retains no timers and
//!   no per-character state. The polling loop (and its start/stop lifecycle)
//!   belongs entirely to the caller.

use crate::model::character::CharacterId;
use crate::repo::character_repo::CharacterRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::task_service::resolve_character_zone;
use crate::time::reset::{
    countdown_to, next_reset_instant, period_token, Cadence, PeriodToken, ResetCountdown,
};
use crate::time::zoned::parse_zone;
use chrono::{DateTime, Utc};

/// Point-in-time reset snapshot for one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterResetStatus {
    pub character_id: CharacterId,
    /// Zone string as configured; may not resolve.
    pub server_timezone: String,
    /// True when the configured zone was unknown and UTC was substituted.
    pub zone_degraded: bool,
    pub daily_token: PeriodToken,
    pub weekly_token: PeriodToken,
    pub next_daily_reset: DateTime<Utc>,
    pub next_weekly_reset: DateTime<Utc>,
    pub daily_countdown: ResetCountdown,
    pub weekly_countdown: ResetCountdown,
}

/// Use-case service producing reset snapshots for display.
pub struct ResetService<C: CharacterRepository> {
    characters: C,
}

impl<C: CharacterRepository> ResetService<C> {
    pub fn new(characters: C) -> Self {
        Self { characters }
    }

    /// Computes the full reset snapshot for a character at `now`.
    ///
    /// Pollers re-invoke this at their own interval; repeated calls are
    /// side-effect free apart from the degraded-zone warn log.
    pub fn character_reset_status(
        &self,
        character_id: CharacterId,
        now: DateTime<Utc>,
    ) -> RepoResult<CharacterResetStatus> {
        let character = self
            .characters
            .get_character(character_id)?
            .ok_or(RepoError::NotFound {
                entity: "character",
                id: character_id,
            })?;

        let zone_degraded = parse_zone(&character.server_timezone).is_none();
        let tz = resolve_character_zone(&character);

        let next_daily_reset = next_reset_instant(tz, Cadence::Daily, now);
        let next_weekly_reset = next_reset_instant(tz, Cadence::Weekly, now);

        Ok(CharacterResetStatus {
            character_id,
            server_timezone: character.server_timezone,
            zone_degraded,
            daily_token: period_token(tz, Cadence::Daily, now),
            weekly_token: period_token(tz, Cadence::Weekly, now),
            next_daily_reset,
            next_weekly_reset,
            daily_countdown: countdown_to(next_daily_reset, now),
            weekly_countdown: countdown_to(next_weekly_reset, now),
        })
    }
}
