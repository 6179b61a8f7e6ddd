//! Server repository contract and SQLite implementation.

use crate::model::server::{Region, Server, ServerId};
use crate::repo::{bool_to_int, int_to_bool, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const SERVER_SELECT_SQL: &str = "SELECT
    id,
    name,
    region,
    timezone,
    active_status
FROM servers";

/// Repository interface for server records.
pub trait ServerRepository {
    fn create_server(&self, server: &Server) -> RepoResult<ServerId>;
    fn update_server(&self, server: &Server) -> RepoResult<()>;
    fn get_server(&self, id: ServerId) -> RepoResult<Option<Server>>;
    fn get_server_by_name(&self, name: &str) -> RepoResult<Option<Server>>;
    fn list_servers(&self, active_only: bool) -> RepoResult<Vec<Server>>;
    fn delete_server(&self, id: ServerId) -> RepoResult<()>;
}

/// SQLite-backed server repository.
pub struct SqliteServerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteServerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ServerRepository for SqliteServerRepository<'_> {
    fn create_server(&self, server: &Server) -> RepoResult<ServerId> {
        server.validate()?;

        self.conn.execute(
            "INSERT INTO servers (name, region, timezone, active_status)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                server.name.as_str(),
                server.region.as_db_str(),
                server.timezone.as_str(),
                bool_to_int(server.active),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_server(&self, server: &Server) -> RepoResult<()> {
        server.validate()?;
        let id = server.id.ok_or(RepoError::NotFound {
            entity: "server",
            id: 0,
        })?;

        let changed = self.conn.execute(
            "UPDATE servers
             SET
                name = ?1,
                region = ?2,
                timezone = ?3,
                active_status = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                server.name.as_str(),
                server.region.as_db_str(),
                server.timezone.as_str(),
                bool_to_int(server.active),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "server",
                id,
            });
        }

        Ok(())
    }

    fn get_server(&self, id: ServerId) -> RepoResult<Option<Server>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SERVER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_server_row(row)?));
        }
        Ok(None)
    }

    fn get_server_by_name(&self, name: &str) -> RepoResult<Option<Server>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SERVER_SELECT_SQL} WHERE name = ?1;"))?;
        let mut rows = stmt.query(params![name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_server_row(row)?));
        }
        Ok(None)
    }

    fn list_servers(&self, active_only: bool) -> RepoResult<Vec<Server>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SERVER_SELECT_SQL}
             WHERE (?1 = 0 OR active_status = 1)
             ORDER BY name ASC;"
        ))?;

        let mut rows = stmt.query(params![bool_to_int(active_only)])?;
        let mut servers = Vec::new();
        while let Some(row) = rows.next()? {
            servers.push(parse_server_row(row)?);
        }
        Ok(servers)
    }

    fn delete_server(&self, id: ServerId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM servers WHERE id = ?1;", params![id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "server",
                id,
            });
        }
        Ok(())
    }
}

fn parse_server_row(row: &Row<'_>) -> RepoResult<Server> {
    let region_text: String = row.get("region")?;
    let region = Region::parse(&region_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid region `{region_text}` in servers.region"))
    })?;

    Ok(Server {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        region,
        timezone: row.get("timezone")?,
        active: int_to_bool(row.get("active_status")?, "servers.active_status")?,
    })
}
