use nw_planner_core::db::migrations::latest_version;
use nw_planner_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "servers");
    assert_table_exists(&conn, "characters");
    assert_table_exists(&conn, "tasks");
    assert_table_exists(&conn, "task_assignments");
    assert_table_exists(&conn, "task_completions");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nw_planner.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "task_completions");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match &err {
        DbError::PlannerFileTooNew { found, supported } => {
            assert_eq!(*found, 999);
            assert_eq!(*supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("newer build"));
}

#[test]
fn completion_uniqueness_is_enforced_by_schema() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO servers (name, region, timezone)
             VALUES ('Valhalla', 'US East', 'America/New_York');
         INSERT INTO characters (name, server_name, server_timezone)
             VALUES ('Aether', 'Valhalla', 'America/New_York');
         INSERT INTO tasks (name, type) VALUES ('Gypsum cast', 'daily');",
    )
    .unwrap();

    conn.execute(
        "INSERT INTO task_completions (task_id, character_id, reset_period)
         VALUES (1, 1, '2024-03-06');",
        [],
    )
    .unwrap();

    let err = conn
        .execute(
            "INSERT INTO task_completions (task_id, character_id, reset_period)
             VALUES (1, 1, '2024-03-06');",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("UNIQUE"));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
