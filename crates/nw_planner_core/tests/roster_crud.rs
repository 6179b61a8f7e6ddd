use nw_planner_core::db::open_db_in_memory;
use nw_planner_core::{
    Character, CharacterListQuery, CharacterRepository, Faction, Region, RepoError, Server,
    ServerRepository, SqliteCharacterRepository, SqliteServerRepository,
};

#[test]
fn server_create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteServerRepository::new(&conn);

    let server = Server::new("Valhalla", Region::UsEast, "America/New_York");
    let id = repo.create_server(&server).unwrap();

    let loaded = repo.get_server(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Valhalla");
    assert_eq!(loaded.region, Region::UsEast);
    assert_eq!(loaded.timezone, "America/New_York");
    assert!(loaded.active);

    let by_name = repo.get_server_by_name("Valhalla").unwrap().unwrap();
    assert_eq!(by_name.id, Some(id));
}

#[test]
fn server_validation_rejects_empty_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteServerRepository::new(&conn);

    let err = repo
        .create_server(&Server::new("", Region::UsEast, "America/New_York"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = repo
        .create_server(&Server::new("Valhalla", Region::UsEast, "  "))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn server_list_filters_inactive() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteServerRepository::new(&conn);

    let mut dormant = Server::new("Asgard", Region::EuCentral, "Europe/Berlin");
    dormant.active = false;
    repo.create_server(&dormant).unwrap();
    repo.create_server(&Server::new("Camelot", Region::UsWest, "America/Los_Angeles"))
        .unwrap();

    assert_eq!(repo.list_servers(false).unwrap().len(), 2);
    let active = repo.list_servers(true).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Camelot");
}

#[test]
fn character_create_update_and_filter() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::new(&conn);

    let mut character = Character::new("Aether", "Valhalla", "America/New_York");
    character.faction = Faction::Syndicate;
    character.company = Some("Night Watch".to_string());
    let id = repo.create_character(&character).unwrap();

    let mut loaded = repo.get_character(id).unwrap().unwrap();
    assert_eq!(loaded.faction, Faction::Syndicate);
    assert_eq!(loaded.company.as_deref(), Some("Night Watch"));

    loaded.server_name = "Asgard".to_string();
    loaded.server_timezone = "Europe/Berlin".to_string();
    repo.update_character(&loaded).unwrap();

    let updated = repo.get_character(id).unwrap().unwrap();
    assert_eq!(updated.server_timezone, "Europe/Berlin");

    repo.create_character(&Character::new("Borin", "Valhalla", "America/New_York"))
        .unwrap();

    let on_asgard = repo
        .list_characters(&CharacterListQuery {
            server_name: Some("Asgard".to_string()),
            active_only: false,
        })
        .unwrap();
    assert_eq!(on_asgard.len(), 1);
    assert_eq!(on_asgard[0].name, "Aether");
}

#[test]
fn character_set_active_affects_active_only_listing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::new(&conn);

    let id = repo
        .create_character(&Character::new("Aether", "Valhalla", "America/New_York"))
        .unwrap();
    repo.set_active(id, false).unwrap();

    let active = repo
        .list_characters(&CharacterListQuery {
            server_name: None,
            active_only: true,
        })
        .unwrap();
    assert!(active.is_empty());
}

#[test]
fn missing_rows_surface_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::new(&conn);

    assert!(repo.get_character(42).unwrap().is_none());

    let err = repo.delete_character(42).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "character",
            id: 42
        }
    ));

    let err = repo.set_active(42, true).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}
