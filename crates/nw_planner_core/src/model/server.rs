//! Game server model.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// SQLite rowid of a server record.
pub type ServerId = i64;

/// Deployment region a server belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    ApSoutheast,
    SaEast,
    UsWest,
    UsEast,
    EuCentral,
}

impl Region {
    /// Storage representation matching the original region labels.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::ApSoutheast => "AP Southeast",
            Self::SaEast => "SA East",
            Self::UsWest => "US West",
            Self::UsEast => "US East",
            Self::EuCentral => "EU Central",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "AP Southeast" => Some(Self::ApSoutheast),
            "SA East" => Some(Self::SaEast),
            "US West" => Some(Self::UsWest),
            "US East" => Some(Self::UsEast),
            "EU Central" => Some(Self::EuCentral),
            _ => None,
        }
    }
}

/// A game server with its real-world reset time zone.
///
/// The `timezone` string is the IANA identifier used for every reset
/// computation involving characters on this server. It is stored verbatim:
/// an identifier unknown to the tz database is kept (and degrades to UTC at
/// computation time) so that reset tracking survives bad configuration data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub id: Option<ServerId>,
    pub name: String,
    pub region: Region,
    /// IANA zone identifier, e.g. `America/New_York`.
    pub timezone: String,
    pub active: bool,
}

/// Validation failure for a server record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerValidationError {
    EmptyName,
    EmptyTimezone,
}

impl Display for ServerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "server name must not be empty"),
            Self::EmptyTimezone => write!(f, "server timezone must not be empty"),
        }
    }
}

impl Error for ServerValidationError {}

impl Server {
    /// Creates an unsaved server record.
    pub fn new(name: impl Into<String>, region: Region, timezone: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            region,
            timezone: timezone.into(),
            active: true,
        }
    }

    /// Checks write-path invariants.
    ///
    /// An *unknown* timezone identifier passes validation on purpose; only
    /// an empty one is rejected. Degraded-to-UTC handling happens at
    /// computation time, not here.
    pub fn validate(&self) -> Result<(), ServerValidationError> {
        if self.name.trim().is_empty() {
            return Err(ServerValidationError::EmptyName);
        }
        if self.timezone.trim().is_empty() {
            return Err(ServerValidationError::EmptyTimezone);
        }
        Ok(())
    }
}
