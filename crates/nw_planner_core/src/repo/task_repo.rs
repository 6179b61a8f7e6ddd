//! Task catalog repository: definitions, assignments and completions.
//!
//! # Responsibility
//! - CRUD over task definitions and per-character assignments.
//! - Persist completion records keyed by `(task, character, reset_period)`.
//!
//! # Invariants
//! - `reset_period` strings come from the reset scheduler (or the fixed
//!   `one-time` pseudo period) and are stored verbatim; this repo never
//!   interprets them beyond equality.
//! - Completion uniqueness per period is enforced by the schema, so a
//!   re-completion in the same period is an upsert, not a duplicate.

use crate::model::character::CharacterId;
use crate::model::task::{Priority, Task, TaskId, TaskKind};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    type,
    priority,
    rewards
FROM tasks";

/// A persisted completion record for one reset interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub task_id: TaskId,
    pub character_id: CharacterId,
    /// Period token string (`YYYY-MM-DD` anchor date, or `one-time`).
    pub reset_period: String,
    /// Consecutive-period completion count, maintained by the service layer.
    pub streak_count: i64,
    /// Unix epoch milliseconds.
    pub completed_at: i64,
}

/// Repository interface for tasks, assignments and completions.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self, kind: Option<TaskKind>) -> RepoResult<Vec<Task>>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;

    fn assign_task(&self, task_id: TaskId, character_id: CharacterId) -> RepoResult<()>;
    fn unassign_task(&self, task_id: TaskId, character_id: CharacterId) -> RepoResult<()>;
    fn tasks_for_character(&self, character_id: CharacterId) -> RepoResult<Vec<Task>>;

    fn upsert_completion(&self, completion: &Completion) -> RepoResult<()>;
    fn delete_completion(
        &self,
        task_id: TaskId,
        character_id: CharacterId,
        reset_period: &str,
    ) -> RepoResult<bool>;
    fn get_completion(
        &self,
        task_id: TaskId,
        character_id: CharacterId,
        reset_period: &str,
    ) -> RepoResult<Option<Completion>>;
    fn completions_for_character(
        &self,
        character_id: CharacterId,
        reset_period: &str,
    ) -> RepoResult<Vec<Completion>>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (name, description, type, priority, rewards)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                task.name.as_str(),
                task.description.as_deref(),
                task.kind.as_db_str(),
                task.priority.as_db_str(),
                task.rewards.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;
        let id = task.id.ok_or(RepoError::NotFound {
            entity: "task",
            id: 0,
        })?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                name = ?1,
                description = ?2,
                type = ?3,
                priority = ?4,
                rewards = ?5
             WHERE id = ?6;",
            params![
                task.name.as_str(),
                task.description.as_deref(),
                task.kind.as_db_str(),
                task.priority.as_db_str(),
                task.rewards.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "task", id });
        }
        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn list_tasks(&self, kind: Option<TaskKind>) -> RepoResult<Vec<Task>> {
        // Priority ordering mirrors the UI: critical first, then by name.
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE (?1 IS NULL OR type = ?1)
             ORDER BY
                CASE priority
                    WHEN 'Critical' THEN 0
                    WHEN 'High' THEN 1
                    WHEN 'Medium' THEN 2
                    ELSE 3
                END,
                name ASC;"
        ))?;

        let mut rows = stmt.query(params![kind.map(TaskKind::as_db_str)])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", params![id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "task", id });
        }
        Ok(())
    }

    fn assign_task(&self, task_id: TaskId, character_id: CharacterId) -> RepoResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO task_assignments (task_id, character_id)
             VALUES (?1, ?2);",
            params![task_id, character_id],
        )?;
        Ok(())
    }

    fn unassign_task(&self, task_id: TaskId, character_id: CharacterId) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM task_assignments WHERE task_id = ?1 AND character_id = ?2;",
            params![task_id, character_id],
        )?;
        Ok(())
    }

    fn tasks_for_character(&self, character_id: CharacterId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                t.id,
                t.name,
                t.description,
                t.type,
                t.priority,
                t.rewards
             FROM tasks t
             JOIN task_assignments ta ON t.id = ta.task_id
             WHERE ta.character_id = ?1
             ORDER BY
                CASE t.priority
                    WHEN 'Critical' THEN 0
                    WHEN 'High' THEN 1
                    WHEN 'Medium' THEN 2
                    ELSE 3
                END,
                t.name ASC;",
        )?;

        let mut rows = stmt.query(params![character_id])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn upsert_completion(&self, completion: &Completion) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO task_completions (
                task_id,
                character_id,
                reset_period,
                streak_count,
                completed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (task_id, character_id, reset_period)
            DO UPDATE SET
                streak_count = excluded.streak_count,
                completed_at = excluded.completed_at;",
            params![
                completion.task_id,
                completion.character_id,
                completion.reset_period.as_str(),
                completion.streak_count,
                completion.completed_at,
            ],
        )?;
        Ok(())
    }

    fn delete_completion(
        &self,
        task_id: TaskId,
        character_id: CharacterId,
        reset_period: &str,
    ) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM task_completions
             WHERE task_id = ?1 AND character_id = ?2 AND reset_period = ?3;",
            params![task_id, character_id, reset_period],
        )?;
        Ok(changed > 0)
    }

    fn get_completion(
        &self,
        task_id: TaskId,
        character_id: CharacterId,
        reset_period: &str,
    ) -> RepoResult<Option<Completion>> {
        let completion = self
            .conn
            .query_row(
                "SELECT task_id, character_id, reset_period, streak_count, completed_at
                 FROM task_completions
                 WHERE task_id = ?1 AND character_id = ?2 AND reset_period = ?3;",
                params![task_id, character_id, reset_period],
                parse_completion_row,
            )
            .optional()?;
        Ok(completion)
    }

    fn completions_for_character(
        &self,
        character_id: CharacterId,
        reset_period: &str,
    ) -> RepoResult<Vec<Completion>> {
        let mut stmt = self.conn.prepare(
            "SELECT task_id, character_id, reset_period, streak_count, completed_at
             FROM task_completions
             WHERE character_id = ?1 AND reset_period = ?2
             ORDER BY completed_at DESC;",
        )?;

        let mut rows = stmt.query(params![character_id, reset_period])?;
        let mut completions = Vec::new();
        while let Some(row) = rows.next()? {
            completions.push(parse_completion_row(row)?);
        }
        Ok(completions)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let kind_text: String = row.get("type")?;
    let kind = TaskKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid task type `{kind_text}` in tasks.type"))
    })?;

    let priority_text: String = row.get("priority")?;
    let priority = Priority::parse(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid priority `{priority_text}` in tasks.priority"
        ))
    })?;

    Ok(Task {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        description: row.get("description")?,
        kind,
        priority,
        rewards: row.get("rewards")?,
    })
}

fn parse_completion_row(row: &Row<'_>) -> Result<Completion, rusqlite::Error> {
    Ok(Completion {
        task_id: row.get("task_id")?,
        character_id: row.get("character_id")?,
        reset_period: row.get("reset_period")?,
        streak_count: row.get("streak_count")?,
        completed_at: row.get("completed_at")?,
    })
}
