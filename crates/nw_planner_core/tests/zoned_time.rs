use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use nw_planner_core::{utc_from_wall_clock, wall_clock_of, weekday_of, zone_or_utc};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn time(hour: u32, minute: u32, second: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, second).unwrap()
}

#[test]
fn round_trip_outside_dst_gaps() {
    let cases = [
        (Tz::UTC, Utc.with_ymd_and_hms(2024, 3, 10, 4, 30, 0).unwrap()),
        (
            Tz::America__New_York,
            Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        ),
        (
            Tz::Europe__Berlin,
            Utc.with_ymd_and_hms(2024, 7, 1, 23, 59, 59).unwrap(),
        ),
        (
            Tz::Australia__Sydney,
            Utc.with_ymd_and_hms(2024, 6, 30, 18, 0, 0).unwrap(),
        ),
    ];

    for (tz, instant) in cases {
        let wall = wall_clock_of(tz, instant);
        let back = utc_from_wall_clock(tz, wall.date(), wall.time());
        assert_eq!(back, instant, "round trip failed for {tz} at {instant}");
    }
}

#[test]
fn spring_forward_gap_nudges_forward_without_error() {
    // 2024-03-10 02:30 does not exist in America/New_York.
    let resolved = utc_from_wall_clock(Tz::America__New_York, date(2024, 3, 10), time(2, 30, 0));
    assert_eq!(resolved, Utc.with_ymd_and_hms(2024, 3, 10, 7, 30, 0).unwrap());

    let wall = wall_clock_of(Tz::America__New_York, resolved);
    assert!(wall.hour >= 3, "resolved local hour was {}", wall.hour);
}

#[test]
fn fall_back_fold_resolves_to_earlier_occurrence() {
    // 2024-11-03 01:30 occurs twice in America/New_York: 05:30Z (EDT) and
    // 06:30Z (EST). The earlier occurrence wins.
    let resolved = utc_from_wall_clock(Tz::America__New_York, date(2024, 11, 3), time(1, 30, 0));
    assert_eq!(resolved, Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap());
}

#[test]
fn wall_clock_of_decomposes_in_target_zone() {
    let instant = Utc.with_ymd_and_hms(2024, 3, 6, 3, 0, 0).unwrap();
    let wall = wall_clock_of(Tz::America__Los_Angeles, instant);
    assert_eq!((wall.year, wall.month, wall.day), (2024, 3, 5));
    assert_eq!(wall.hour, 19);
}

#[test]
fn weekday_is_sunday_zero_in_target_zone() {
    // 2024-03-05 was a Tuesday.
    let noon = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
    assert_eq!(weekday_of(Tz::UTC, noon), 2);

    // 03:00Z on Wednesday is still Tuesday evening in Los Angeles.
    let late = Utc.with_ymd_and_hms(2024, 3, 6, 3, 0, 0).unwrap();
    assert_eq!(weekday_of(Tz::America__Los_Angeles, late), 2);
    assert_eq!(weekday_of(Tz::UTC, late), 3);
}

#[test]
fn unknown_zone_degrades_to_utc() {
    let tz = zone_or_utc("Not/AZone");
    assert_eq!(tz, Tz::UTC);

    let instant = Utc.with_ymd_and_hms(2024, 3, 10, 4, 30, 0).unwrap();
    let wall = wall_clock_of(tz, instant);
    assert_eq!((wall.hour, wall.minute), (4, 30));
}
