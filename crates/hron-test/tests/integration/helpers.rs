#![expect(clippy::expect_used, reason = "Test helpers fail loudly on bad fixtures")]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Parsing fixture expressions
//! - Building UTC and zoned instants
//! - Collecting occurrences as UTC for comparison

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

use hron_test::Schedule;

/// Parses a fixture expression, panicking with the rendered error on failure.
pub fn schedule(input: &str) -> Schedule {
    match Schedule::parse(input) {
        Ok(schedule) => schedule,
        Err(err) => panic!("fixture should parse:\n{}", err.display_rich()),
    }
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid UTC instant")
}

/// Wall-clock instant in `tz`; the time must be unambiguous.
pub fn zoned(tz: Tz, y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
    tz.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("unambiguous local instant")
}

pub fn next_utc(input: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    schedule(input)
        .next_from(&now)
        .expect("should evaluate")
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn next_n_utc(input: &str, now: DateTime<Utc>, n: usize) -> Vec<DateTime<Utc>> {
    schedule(input)
        .next_n_from(&now, n)
        .expect("should evaluate")
        .into_iter()
        .map(|dt| dt.with_timezone(&Utc))
        .collect()
}

pub fn previous_utc(input: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    schedule(input)
        .previous_from(&now)
        .expect("should evaluate")
        .map(|dt| dt.with_timezone(&Utc))
}
