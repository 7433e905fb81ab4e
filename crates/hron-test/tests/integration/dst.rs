//! Daylight-saving transitions in the schedule's own zone.

use chrono::Timelike;
use chrono_tz::Tz;

use super::helpers::{next_n_utc, next_utc, previous_utc, schedule, utc, zoned};

const NEW_YORK_DAILY_0230: &str = "every day at 02:30 in America/New_York";

#[test_log::test]
fn test_gap_time_moves_forward_by_gap() {
    // 2026-03-08 02:00 EST jumps to 03:00 EDT.
    let s = schedule(NEW_YORK_DAILY_0230);
    let now = zoned(Tz::America__New_York, 2026, 3, 7, 12, 0);
    let next = s
        .next_from(&now)
        .expect("should evaluate")
        .expect("should fire");
    assert_eq!((next.hour(), next.minute()), (3, 30));
    assert_eq!(next.with_timezone(&chrono::Utc), utc(2026, 3, 8, 7, 30));

    // Normal wall time again the day after.
    assert_eq!(
        next_utc(NEW_YORK_DAILY_0230, utc(2026, 3, 8, 7, 30)),
        Some(utc(2026, 3, 9, 6, 30))
    );
}

#[test_log::test]
fn test_gap_time_matches_shifted_instant() {
    let s = schedule(NEW_YORK_DAILY_0230);
    assert!(s.matches(&utc(2026, 3, 8, 7, 30)).expect("should evaluate"));
    assert!(s.matches(&utc(2026, 3, 9, 6, 30)).expect("should evaluate"));
    assert!(!s.matches(&utc(2026, 3, 8, 6, 30)).expect("should evaluate"));
}

#[test_log::test]
fn test_previous_across_gap() {
    assert_eq!(
        previous_utc(NEW_YORK_DAILY_0230, utc(2026, 3, 8, 12, 0)),
        Some(utc(2026, 3, 8, 7, 30))
    );
}

#[test_log::test]
fn test_fold_fires_once_at_earlier_instant() {
    // 01:30 happens at 05:30Z (EDT) and 06:30Z (EST) on 2026-11-01.
    let hits = next_n_utc(
        "every day at 01:30 in America/New_York",
        utc(2026, 11, 1, 0, 0),
        2,
    );
    assert_eq!(hits, vec![utc(2026, 11, 1, 5, 30), utc(2026, 11, 2, 6, 30)]);
}

#[test_log::test]
fn test_interval_window_through_gap() {
    let hits = next_n_utc(
        "every 30 min from 01:00 to 04:00 in America/New_York",
        utc(2026, 3, 8, 5, 0),
        5,
    );
    assert_eq!(
        hits,
        vec![
            utc(2026, 3, 8, 6, 0),
            utc(2026, 3, 8, 6, 30),
            utc(2026, 3, 8, 7, 0),
            utc(2026, 3, 8, 7, 30),
            utc(2026, 3, 8, 8, 0),
        ]
    );
}

#[test_log::test]
fn test_offset_follows_transition() {
    // Friday before the change is EST, the Monday after is EDT.
    assert_eq!(
        next_utc("every monday at 09:00 in America/New_York", utc(2026, 3, 6, 12, 0)),
        Some(utc(2026, 3, 9, 13, 0))
    );
    assert_eq!(
        next_utc("every day at 01:30 in Europe/London", utc(2026, 3, 28, 12, 0)),
        Some(utc(2026, 3, 29, 1, 30))
    );
}

#[test_log::test]
fn test_results_carry_schedule_zone() {
    let s = schedule("every day at 09:00 in Australia/Sydney");
    let next = s
        .next_from(&utc(2026, 1, 1, 0, 0))
        .expect("should evaluate")
        .expect("should fire");
    assert_eq!(next.timezone(), Tz::Australia__Sydney);
    assert_eq!((next.hour(), next.minute()), (9, 0));
}
