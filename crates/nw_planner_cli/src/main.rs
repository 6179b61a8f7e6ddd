//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `nw_planner_core` linkage.
//! - Print the live reset status for a zone passed as the first argument.

use chrono::Utc;
use nw_planner_core::{
    countdown_until_reset, next_reset_instant, parse_zone, period_token, zone_or_utc, Cadence,
};

fn main() {
    let zone_arg = std::env::args().nth(1).unwrap_or_else(|| "UTC".to_string());
    if parse_zone(&zone_arg).is_none() {
        eprintln!("unknown zone `{zone_arg}`, falling back to UTC");
    }
    let tz = zone_or_utc(&zone_arg);
    let now = Utc::now();

    println!(
        "nw_planner_core version={} zone={tz}",
        nw_planner_core::core_version()
    );
    for cadence in [Cadence::Daily, Cadence::Weekly] {
        println!(
            "cadence={} period={} next_reset={} countdown={}",
            cadence.as_db_str(),
            period_token(tz, cadence, now),
            next_reset_instant(tz, cadence, now),
            countdown_until_reset(tz, cadence, now).formatted
        );
    }
}
