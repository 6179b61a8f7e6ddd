//! Player character model.
//!
//! # Invariants
//! - `server_timezone` is denormalized onto the character at creation time
//!   and is the sole input the reset core receives for this character.
//! - An unknown timezone identifier is not a validation error; it degrades
//!   to UTC at computation time (documented fallback).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// SQLite rowid of a character record.
pub type CharacterId = i64;

/// In-game faction membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Factionless,
    Marauders,
    Covenant,
    Syndicate,
}

impl Faction {
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Factionless => "Factionless",
            Self::Marauders => "Marauders",
            Self::Covenant => "Covenant",
            Self::Syndicate => "Syndicate",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Factionless" => Some(Self::Factionless),
            "Marauders" => Some(Self::Marauders),
            "Covenant" => Some(Self::Covenant),
            "Syndicate" => Some(Self::Syndicate),
            _ => None,
        }
    }
}

/// A tracked character on a specific server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: Option<CharacterId>,
    pub name: String,
    pub server_name: String,
    /// IANA zone identifier copied from the server at creation time.
    pub server_timezone: String,
    pub faction: Faction,
    pub company: Option<String>,
    pub active: bool,
    pub notes: Option<String>,
}

/// Validation failure for a character record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterValidationError {
    EmptyName,
    EmptyServerName,
    EmptyServerTimezone,
}

impl Display for CharacterValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "character name must not be empty"),
            Self::EmptyServerName => write!(f, "character server name must not be empty"),
            Self::EmptyServerTimezone => {
                write!(f, "character server timezone must not be empty")
            }
        }
    }
}

impl Error for CharacterValidationError {}

impl Character {
    /// Creates an unsaved character with default faction and active status.
    pub fn new(
        name: impl Into<String>,
        server_name: impl Into<String>,
        server_timezone: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            server_name: server_name.into(),
            server_timezone: server_timezone.into(),
            faction: Faction::Factionless,
            company: None,
            active: true,
            notes: None,
        }
    }

    /// Checks write-path invariants.
    pub fn validate(&self) -> Result<(), CharacterValidationError> {
        if self.name.trim().is_empty() {
            return Err(CharacterValidationError::EmptyName);
        }
        if self.server_name.trim().is_empty() {
            return Err(CharacterValidationError::EmptyServerName);
        }
        if self.server_timezone.trim().is_empty() {
            return Err(CharacterValidationError::EmptyServerTimezone);
        }
        Ok(())
    }
}
