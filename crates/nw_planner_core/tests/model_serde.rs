use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use nw_planner_core::{
    period_token, Cadence, Character, Faction, Priority, Region, Server, Task, TaskKind,
};

#[test]
fn enums_serialize_to_snake_case_tokens() {
    assert_eq!(
        serde_json::to_string(&Region::ApSoutheast).unwrap(),
        "\"ap_southeast\""
    );
    assert_eq!(
        serde_json::to_string(&Faction::Syndicate).unwrap(),
        "\"syndicate\""
    );
    assert_eq!(
        serde_json::to_string(&TaskKind::OneTime).unwrap(),
        "\"one_time\""
    );
    assert_eq!(
        serde_json::to_string(&Priority::Critical).unwrap(),
        "\"critical\""
    );
    assert_eq!(
        serde_json::to_string(&Cadence::Weekly).unwrap(),
        "\"weekly\""
    );
}

#[test]
fn period_token_serializes_as_bare_date_string() {
    let token = period_token(
        Tz::UTC,
        Cadence::Daily,
        Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap(),
    );
    assert_eq!(serde_json::to_string(&token).unwrap(), "\"2024-03-10\"");
}

#[test]
fn character_round_trips_through_json() {
    let mut character = Character::new("Aether", "Valhalla", "America/New_York");
    character.faction = Faction::Covenant;
    character.company = Some("Night Watch".to_string());

    let json = serde_json::to_string(&character).unwrap();
    assert!(json.contains("\"covenant\""));

    let back: Character = serde_json::from_str(&json).unwrap();
    assert_eq!(back, character);
}

#[test]
fn server_and_task_round_trip_through_json() {
    let server = Server::new("Valhalla", Region::UsEast, "America/New_York");
    let back: Server = serde_json::from_str(&serde_json::to_string(&server).unwrap()).unwrap();
    assert_eq!(back, server);

    let mut task = Task::new("Gypsum cast", TaskKind::Weekly);
    task.priority = Priority::High;
    task.rewards = Some("gypsum orb".to_string());
    let back: Task = serde_json::from_str(&serde_json::to_string(&task).unwrap()).unwrap();
    assert_eq!(back, task);
}

#[test]
fn naive_date_helper_keeps_token_contract_readable() {
    // Tokens embed the anchor date exactly as formatted, so a raw date
    // string deserializes into an equal token.
    let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let token = period_token(
        Tz::UTC,
        Cadence::Daily,
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap(),
    );
    assert_eq!(token.anchor_date(), Some(date));
    let parsed: nw_planner_core::PeriodToken =
        serde_json::from_str("\"2024-03-10\"").unwrap();
    assert_eq!(parsed, token);
}
