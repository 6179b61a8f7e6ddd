//! Core domain logic for the NW Planner companion app.
//! This crate is the single source of truth for reset-period semantics.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod time;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::character::{Character, CharacterId, CharacterValidationError, Faction};
pub use model::server::{Region, Server, ServerId, ServerValidationError};
pub use model::task::{Priority, Task, TaskId, TaskKind, TaskValidationError, ONE_TIME_PERIOD};
pub use repo::character_repo::{
    CharacterListQuery, CharacterRepository, SqliteCharacterRepository,
};
pub use repo::server_repo::{ServerRepository, SqliteServerRepository};
pub use repo::task_repo::{Completion, SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::reset_service::{CharacterResetStatus, ResetService};
pub use service::task_service::TaskService;
pub use time::reset::{
    countdown_to, countdown_until_reset, next_reset_instant, next_reset_instant_now, period_token,
    period_token_now, Cadence, PeriodToken, ResetCountdown, RESET_HOUR,
};
pub use time::zoned::{
    parse_zone, utc_from_wall_clock, wall_clock_of, weekday_of, zone_or_utc, WallClock,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
