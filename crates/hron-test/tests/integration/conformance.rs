//! Language-level properties that hold for every schedule shape.

use hron_test::Schedule;

use super::helpers::{next_n_utc, next_utc, previous_utc, schedule, utc};

/// One expression per grammar shape, already in canonical form.
const CANONICAL: &[&str] = &[
    "every day at 09:00",
    "every weekday at 08:30, 17:00",
    "every weekend at 10:00",
    "every monday, wednesday, friday at 07:15",
    "every 3 days at 06:00",
    "every 2 days at 09:00 starting 2026-03-10",
    "every 2 weeks on tuesday, thursday at 09:00",
    "every 30 min from 09:00 to 17:00",
    "every 2 hours from 00:00 to 23:59 on weekday",
    "every month on the 1st, 15th at 12:00",
    "every month on the 1st to 5th at 12:00",
    "every 3 months on the last day at 18:00",
    "every month on the last weekday at 18:00",
    "every month on the nearest weekday to 15th at 09:00",
    "every month on the next nearest weekday to 1st at 09:00",
    "every month on the next nearest weekday to 31st at 09:00",
    "every month on the previous nearest weekday to 1st at 09:00",
    "every month on the first monday at 09:00",
    "last friday of every month at 16:00",
    "second tuesday of every 2 months at 11:00",
    "on feb 14 at 09:00",
    "on 2027-03-15 at 14:30",
    "every year on dec 25 at 00:00",
    "every 2 years on the first monday of sep at 09:00",
    "every year on the 15th of mar at 12:00",
    "every year on the last weekday of dec at 17:00",
    "every day at 09:00 except dec 25, 2026-07-04 until 2027-12-31 starting 2026-01-01 during jan, jul in America/New_York",
];

#[test_log::test]
fn test_canonical_forms_are_fixed_points() {
    for input in CANONICAL {
        let rendered = schedule(input).to_string();
        assert_eq!(&rendered, input);
        assert_eq!(schedule(&rendered).to_string(), rendered);
    }
}

#[test_log::test]
fn test_aliases_render_canonically() {
    let cases = [
        ("every weekdays at 9:00", "every weekday at 09:00"),
        ("EVERY Mon, Fri AT 9:00", "every monday, friday at 09:00"),
        ("every 15 minutes from 9:00 to 10:00", "every 15 min from 09:00 to 10:00"),
        ("every 1 hr from 00:00 to 23:59", "every 1 hour from 00:00 to 23:59"),
        ("every 1 months on the 1st at 9:00", "every month on the 1st at 09:00"),
    ];
    for (input, expected) in cases {
        assert_eq!(schedule(input).to_string(), expected, "{input}");
    }
}

#[test_log::test]
fn test_next_is_monotonic_and_respects_until() {
    let input = "every weekday at 09:00, 13:00 until 2026-03-31";
    let hits = next_n_utc(input, utc(2026, 3, 1, 0, 0), 100);
    assert!(!hits.is_empty());
    for pair in hits.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    assert!(hits.iter().all(|hit| hit <= &utc(2026, 3, 31, 13, 0)));
    assert_eq!(hits.last(), Some(&utc(2026, 3, 31, 13, 0)));
}

#[test_log::test]
fn test_boundary_instant_matches_and_is_skipped() {
    let s = schedule("every month on the 15th at 12:00");
    let on = utc(2026, 4, 15, 12, 0);
    assert!(s.matches(&on).expect("should evaluate"));
    assert_eq!(next_utc("every month on the 15th at 12:00", on), Some(utc(2026, 5, 15, 12, 0)));
}

#[test_log::test]
fn test_interval_alignment_example() {
    assert_eq!(
        next_utc("every 3 days at 09:00 in UTC", utc(2026, 2, 6, 12, 0)),
        Some(utc(2026, 2, 9, 9, 0))
    );
}

#[test_log::test]
fn test_every_hit_matches() {
    for input in CANONICAL {
        let s = schedule(input);
        let hits = s
            .next_n_from(&utc(2026, 1, 1, 0, 0), 10)
            .expect("should evaluate");
        for hit in hits {
            assert!(s.matches(&hit).expect("should evaluate"), "{input}: {hit}");
        }
    }
}

#[test_log::test]
fn test_previous_is_inverse_of_next() {
    let inputs = [
        "every day at 09:00",
        "every weekday at 08:30, 17:00",
        "every 2 weeks on tuesday, thursday at 09:00",
        "every 30 min from 09:00 to 17:00",
        "every month on the last weekday at 18:00",
        "last friday of every month at 16:00",
        "every year on dec 25 at 00:00",
    ];
    for input in inputs {
        let hits = next_n_utc(input, utc(2026, 1, 1, 0, 0), 4);
        assert_eq!(hits.len(), 4, "{input}");
        for pair in hits.windows(2) {
            assert_eq!(previous_utc(input, pair[1]), Some(pair[0]), "{input}");
        }
    }
}

#[test_log::test]
fn test_past_single_date_never_fires_again() {
    let s = schedule("on 2024-06-01 at 10:00");
    for year in [2025, 2030, 2100] {
        assert!(s.next_from(&utc(year, 1, 1, 0, 0)).expect("should evaluate").is_none());
    }
}

#[test_log::test]
fn test_between_window() {
    let s = schedule("every monday at 09:00");
    let hits: Vec<_> = s
        .between(&utc(2026, 2, 1, 0, 0), &utc(2026, 2, 28, 23, 59))
        .expect("should evaluate")
        .collect();
    let days: Vec<u32> = hits.iter().map(chrono::Datelike::day).collect();
    assert_eq!(days, vec![2, 9, 16, 23]);
}

#[test_log::test]
fn test_schedule_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Schedule>();
}

#[test_log::test]
fn test_previous_stops_before_anchor() {
    let input = "every day at 09:00 starting 2026-03-10";
    assert_eq!(previous_utc(input, utc(2026, 3, 10, 8, 0)), None);
    assert_eq!(
        previous_utc(input, utc(2026, 3, 11, 8, 0)),
        Some(utc(2026, 3, 10, 9, 0))
    );
}

#[test_log::test]
fn test_previous_retries_past_clauses() {
    assert_eq!(
        previous_utc("every day at 09:00 during jan, jul", utc(2026, 3, 15, 0, 0)),
        Some(utc(2026, 1, 31, 9, 0))
    );
    // 2026-03-14 is a Saturday; both weekdays before it are excepted.
    assert_eq!(
        previous_utc(
            "every weekday at 09:00 except 2026-03-13, mar 12",
            utc(2026, 3, 14, 0, 0)
        ),
        Some(utc(2026, 3, 11, 9, 0))
    );
    assert_eq!(
        previous_utc("every day at 09:00 until 2026-03-05", utc(2026, 3, 20, 0, 0)),
        Some(utc(2026, 3, 5, 9, 0))
    );
}

#[test_log::test]
fn test_directed_nearest_weekday_crosses_month() {
    // 2026-01-31 is a Saturday: the next weekday is Monday 2026-02-02.
    let input = "every month on the next nearest weekday to 31st at 09:00";
    let hit = utc(2026, 2, 2, 9, 0);
    assert_eq!(next_utc(input, utc(2026, 1, 20, 0, 0)), Some(hit));
    assert_eq!(next_utc(input, utc(2026, 2, 1, 0, 0)), Some(hit));
    assert_eq!(previous_utc(input, utc(2026, 2, 10, 0, 0)), Some(hit));
    assert!(schedule(input).matches(&hit).expect("should evaluate"));

    // 2026-03-01 is a Sunday: the previous weekday is Friday 2026-02-27.
    let input = "every month on the previous nearest weekday to 1st at 09:00";
    let hit = utc(2026, 2, 27, 9, 0);
    assert_eq!(next_utc(input, utc(2026, 2, 20, 0, 0)), Some(hit));
    assert_eq!(previous_utc(input, utc(2026, 2, 28, 0, 0)), Some(hit));
    assert!(schedule(input).matches(&hit).expect("should evaluate"));

    // Without a direction the month boundary holds.
    assert_eq!(
        next_utc(
            "every month on the nearest weekday to 1st at 09:00",
            utc(2026, 2, 20, 0, 0)
        ),
        Some(utc(2026, 3, 2, 9, 0))
    );
}
