//! Character repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths validate the character model before SQL mutation.
//! - The persisted `server_timezone` string is returned verbatim; resolving
//!   it against the tz database is the reset core's concern.

use crate::model::character::{Character, CharacterId, Faction};
use crate::repo::{bool_to_int, int_to_bool, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const CHARACTER_SELECT_SQL: &str = "SELECT
    id,
    name,
    server_name,
    server_timezone,
    faction,
    company,
    active_status,
    notes
FROM characters";

/// Query options for listing characters.
#[derive(Debug, Clone, Default)]
pub struct CharacterListQuery {
    pub server_name: Option<String>,
    pub active_only: bool,
}

/// Repository interface for character records.
pub trait CharacterRepository {
    fn create_character(&self, character: &Character) -> RepoResult<CharacterId>;
    fn update_character(&self, character: &Character) -> RepoResult<()>;
    fn get_character(&self, id: CharacterId) -> RepoResult<Option<Character>>;
    fn list_characters(&self, query: &CharacterListQuery) -> RepoResult<Vec<Character>>;
    fn set_active(&self, id: CharacterId, active: bool) -> RepoResult<()>;
    fn delete_character(&self, id: CharacterId) -> RepoResult<()>;
}

/// SQLite-backed character repository.
pub struct SqliteCharacterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCharacterRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CharacterRepository for SqliteCharacterRepository<'_> {
    fn create_character(&self, character: &Character) -> RepoResult<CharacterId> {
        character.validate()?;

        self.conn.execute(
            "INSERT INTO characters (
                name,
                server_name,
                server_timezone,
                faction,
                company,
                active_status,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                character.name.as_str(),
                character.server_name.as_str(),
                character.server_timezone.as_str(),
                character.faction.as_db_str(),
                character.company.as_deref(),
                bool_to_int(character.active),
                character.notes.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_character(&self, character: &Character) -> RepoResult<()> {
        character.validate()?;
        let id = character.id.ok_or(RepoError::NotFound {
            entity: "character",
            id: 0,
        })?;

        let changed = self.conn.execute(
            "UPDATE characters
             SET
                name = ?1,
                server_name = ?2,
                server_timezone = ?3,
                faction = ?4,
                company = ?5,
                active_status = ?6,
                notes = ?7,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?8;",
            params![
                character.name.as_str(),
                character.server_name.as_str(),
                character.server_timezone.as_str(),
                character.faction.as_db_str(),
                character.company.as_deref(),
                bool_to_int(character.active),
                character.notes.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "character",
                id,
            });
        }

        Ok(())
    }

    fn get_character(&self, id: CharacterId) -> RepoResult<Option<Character>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHARACTER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_character_row(row)?));
        }
        Ok(None)
    }

    fn list_characters(&self, query: &CharacterListQuery) -> RepoResult<Vec<Character>> {
        let mut sql = format!("{CHARACTER_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if query.active_only {
            sql.push_str(" AND active_status = 1");
        }
        if let Some(server_name) = &query.server_name {
            sql.push_str(" AND server_name = ?");
            bind_values.push(Value::Text(server_name.clone()));
        }

        sql.push_str(" ORDER BY active_status DESC, name ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut characters = Vec::new();
        while let Some(row) = rows.next()? {
            characters.push(parse_character_row(row)?);
        }
        Ok(characters)
    }

    fn set_active(&self, id: CharacterId, active: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE characters
             SET
                active_status = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![bool_to_int(active), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "character",
                id,
            });
        }
        Ok(())
    }

    fn delete_character(&self, id: CharacterId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM characters WHERE id = ?1;", params![id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "character",
                id,
            });
        }
        Ok(())
    }
}

fn parse_character_row(row: &Row<'_>) -> RepoResult<Character> {
    let faction_text: String = row.get("faction")?;
    let faction = Faction::parse(&faction_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid faction `{faction_text}` in characters.faction"
        ))
    })?;

    Ok(Character {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        server_name: row.get("server_name")?,
        server_timezone: row.get("server_timezone")?,
        faction,
        company: row.get("company")?,
        active: int_to_bool(row.get("active_status")?, "characters.active_status")?,
        notes: row.get("notes")?,
    })
}
