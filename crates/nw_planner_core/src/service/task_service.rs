//! Task completion use-case service.
//!
//! # Responsibility
//! - Derive the period token keying a completion from the character's zone
//!   and the task cadence, then persist it.
//! - Maintain streak counts across consecutive reset intervals.
//!
//! # Invariants
//! - A completion is keyed by `(task, character, period_token)`; re-marking
//!   within the same period is idempotent apart from `completed_at`.
//! - Streak = previous interval's streak + 1 when the immediately preceding
//!   interval was completed, else 1.
//! - An unknown character timezone degrades to UTC with a warn log; it never
//!   fails the operation.

use crate::model::character::{Character, CharacterId};
use crate::model::task::{Task, TaskId, ONE_TIME_PERIOD};
use crate::repo::character_repo::CharacterRepository;
use crate::repo::task_repo::{Completion, TaskRepository};
use crate::repo::{RepoError, RepoResult};
use crate::time::reset::{period_token, Cadence};
use crate::time::zoned::parse_zone;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::warn;

/// Use-case service for assigning and completing tasks.
pub struct TaskService<T: TaskRepository, C: CharacterRepository> {
    tasks: T,
    characters: C,
}

impl<T: TaskRepository, C: CharacterRepository> TaskService<T, C> {
    pub fn new(tasks: T, characters: C) -> Self {
        Self { tasks, characters }
    }

    /// Marks a task complete for a character in the period containing `now`.
    ///
    /// Returns the persisted completion, including the streak count.
    pub fn mark_complete(
        &self,
        task_id: TaskId,
        character_id: CharacterId,
        now: DateTime<Utc>,
    ) -> RepoResult<Completion> {
        let (task, character) = self.load_pair(task_id, character_id)?;
        let period = completion_period(&task, &character, now);

        let streak_count = match task.kind.cadence() {
            Some(cadence) => {
                self.streak_for(task_id, character_id, &character, cadence, &period, now)?
            }
            None => 1,
        };

        let completion = Completion {
            task_id,
            character_id,
            reset_period: period,
            streak_count,
            completed_at: now.timestamp_millis(),
        };
        self.tasks.upsert_completion(&completion)?;
        Ok(completion)
    }

    /// Removes the completion for the period containing `now`.
    ///
    /// Returns whether a record existed.
    pub fn mark_incomplete(
        &self,
        task_id: TaskId,
        character_id: CharacterId,
        now: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let (task, character) = self.load_pair(task_id, character_id)?;
        let period = completion_period(&task, &character, now);
        self.tasks.delete_completion(task_id, character_id, &period)
    }

    /// Returns whether the task is complete in the period containing `now`.
    pub fn is_complete(
        &self,
        task_id: TaskId,
        character_id: CharacterId,
        now: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let (task, character) = self.load_pair(task_id, character_id)?;
        let period = completion_period(&task, &character, now);
        Ok(self
            .tasks
            .get_completion(task_id, character_id, &period)?
            .is_some())
    }

    /// Lists a character's completions for the interval of `cadence`
    /// containing `now`.
    pub fn completions_for_character(
        &self,
        character_id: CharacterId,
        cadence: Cadence,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Completion>> {
        let character = self.load_character(character_id)?;
        let tz = resolve_character_zone(&character);
        let period = period_token(tz, cadence, now);
        self.tasks
            .completions_for_character(character_id, period.as_str())
    }

    pub fn assign_task(&self, task_id: TaskId, character_id: CharacterId) -> RepoResult<()> {
        self.tasks.assign_task(task_id, character_id)
    }

    pub fn unassign_task(&self, task_id: TaskId, character_id: CharacterId) -> RepoResult<()> {
        self.tasks.unassign_task(task_id, character_id)
    }

    pub fn tasks_for_character(&self, character_id: CharacterId) -> RepoResult<Vec<Task>> {
        self.tasks.tasks_for_character(character_id)
    }

    fn streak_for(
        &self,
        task_id: TaskId,
        character_id: CharacterId,
        character: &Character,
        cadence: Cadence,
        period: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<i64> {
        let tz = resolve_character_zone(character);
        let token = period_token(tz, cadence, now);
        debug_assert_eq!(token.as_str(), period);

        let previous = match token.previous(cadence) {
            Some(previous) => previous,
            None => return Ok(1),
        };

        let streak = self
            .tasks
            .get_completion(task_id, character_id, previous.as_str())?
            .map_or(1, |prior| prior.streak_count + 1);
        Ok(streak)
    }

    fn load_pair(
        &self,
        task_id: TaskId,
        character_id: CharacterId,
    ) -> RepoResult<(Task, Character)> {
        let task = self.tasks.get_task(task_id)?.ok_or(RepoError::NotFound {
            entity: "task",
            id: task_id,
        })?;
        let character = self.load_character(character_id)?;
        Ok((task, character))
    }

    fn load_character(&self, character_id: CharacterId) -> RepoResult<Character> {
        self.characters
            .get_character(character_id)?
            .ok_or(RepoError::NotFound {
                entity: "character",
                id: character_id,
            })
    }
}

/// Period key for a completion of `task` by `character` at `now`.
fn completion_period(task: &Task, character: &Character, now: DateTime<Utc>) -> String {
    match task.kind.cadence() {
        Some(cadence) => {
            let tz = resolve_character_zone(character);
            period_token(tz, cadence, now).as_str().to_string()
        }
        None => ONE_TIME_PERIOD.to_string(),
    }
}

/// Resolves a character's zone, warn-logging the documented UTC fallback.
pub(crate) fn resolve_character_zone(character: &Character) -> Tz {
    match parse_zone(&character.server_timezone) {
        Some(tz) => tz,
        None => {
            warn!(
                "event=zone_fallback module=service status=degraded character_id={} timezone={}",
                character.id.unwrap_or(0),
                character.server_timezone
            );
            Tz::UTC
        }
    }
}
