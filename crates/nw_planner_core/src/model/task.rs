//! Task catalog model.
//!
//! # Responsibility
//! - Define recurring (daily/weekly) and one-time task definitions.
//! - Map task recurrence onto the reset scheduler's `Cadence`.

use crate::time::reset::Cadence;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// SQLite rowid of a task record.
pub type TaskId = i64;

/// Pseudo period key for completions of non-recurring tasks.
///
/// One-time tasks never reset, so every completion lands on this fixed key
/// instead of a dated token.
pub const ONE_TIME_PERIOD: &str = "one-time";

/// Recurrence class of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Daily,
    Weekly,
    OneTime,
}

impl TaskKind {
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::OneTime => "one-time",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "one-time" => Some(Self::OneTime),
            _ => None,
        }
    }

    /// Reset cadence driving period tokens; `None` for one-time tasks.
    pub fn cadence(self) -> Option<Cadence> {
        match self {
            Self::Daily => Some(Cadence::Daily),
            Self::Weekly => Some(Cadence::Weekly),
            Self::OneTime => None,
        }
    }
}

/// Task priority used for list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            "Critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// A task definition assignable to any number of characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<TaskId>,
    pub name: String,
    pub description: Option<String>,
    pub kind: TaskKind,
    pub priority: Priority,
    pub rewards: Option<String>,
}

/// Validation failure for a task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyName,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "task name must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates an unsaved task with medium priority.
    pub fn new(name: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            kind,
            priority: Priority::Medium,
            rewards: None,
        }
    }

    /// Checks write-path invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.name.trim().is_empty() {
            return Err(TaskValidationError::EmptyName);
        }
        Ok(())
    }
}
