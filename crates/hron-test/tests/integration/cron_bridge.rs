//! Conversions between schedules and 5-field cron.

use hron_test::{ErrorKind, Schedule, cron};

use super::helpers::{next_utc, schedule, utc};

#[test_log::test]
fn test_round_trip_of_generated_cron() {
    let inputs = [
        "every day at 00:00",
        "every weekday at 09:00",
        "every weekend at 11:30",
        "every tuesday, saturday at 22:05",
        "every mon, tue, wed, thu, fri at 09:00",
        "every saturday, sunday at 10:00",
        "every 1 weeks on monday, tuesday, wednesday, thursday, friday at 07:00",
        "every 5 min from 00:00 to 23:59",
        "every 20 min from 00:00 to 23:59",
        "every 6 hours from 00:00 to 23:59",
        "every month on the 28th at 03:00",
        "every month on the 1st, 10th to 12th at 03:00",
    ];
    for input in inputs {
        let generated = schedule(input).to_cron().expect("should convert");
        let back = cron::from_cron(&generated).expect("should parse generated cron");
        assert_eq!(back.to_cron().expect("should convert again"), generated, "{input}");
    }
}

#[test_log::test]
fn test_cron_equivalence() {
    assert_eq!(
        Schedule::from_cron("0 9 * * 1-5").expect("should convert"),
        schedule("every weekday at 09:00")
    );
    assert_eq!(
        Schedule::from_cron("0 0 1 * *").expect("should convert"),
        Schedule::from_cron("@monthly").expect("should convert")
    );
}

#[test_log::test]
fn test_converted_cron_evaluates() {
    let s = Schedule::from_cron("30 9 * * MON-FRI").expect("should convert");
    // 2026-02-07 is a Saturday.
    let next = s
        .next_from(&utc(2026, 2, 7, 12, 0))
        .expect("should evaluate")
        .expect("should fire");
    assert_eq!(next.with_timezone(&chrono::Utc), utc(2026, 2, 9, 9, 30));

    let s = Schedule::from_cron("0 12 * * 5L").expect("should convert");
    assert_eq!(s.to_string(), "last friday of every month at 12:00");
    assert_eq!(
        next_utc(&s.to_string(), utc(2026, 2, 1, 0, 0)),
        Some(utc(2026, 2, 27, 12, 0))
    );
}

#[test_log::test]
fn test_lossy_shapes_are_refused() {
    for input in [
        "every 7 min from 00:00 to 23:59",
        "every day at 09:00 except jan 1 in UTC",
        "every month on the last day at 00:00",
        "every year on jan 1 at 00:00",
    ] {
        let err = schedule(input).to_cron().expect_err("should refuse");
        assert_eq!(err.kind(), ErrorKind::Cron, "{input}");
    }
}

#[test_log::test]
fn test_explain_cron() {
    assert_eq!(
        cron::explain_cron("0 9 * * 1-5").expect("should explain"),
        "every weekday at 09:00"
    );
    let text = cron::explain_cron("*/7 * * * *").expect("should explain");
    assert!(text.starts_with("every 7 min from 00:00 to 23:59\nnote: cron */7 actually fires at :00 and :07"));
    assert!(text.ends_with("and :56 each hour, not true 7-min intervals"), "{text}");
}

#[test_log::test]
fn test_minute_steps_keep_cron_meaning() {
    // Cron fires through 17:45, not up to 17:00.
    let s = Schedule::from_cron("*/15 9-17 * * *").expect("should convert");
    assert_eq!(
        next_utc(&s.to_string(), utc(2026, 2, 2, 17, 30)),
        Some(utc(2026, 2, 2, 17, 45))
    );

    // An hourly restart is not a steady interval, so only explain accepts it.
    let err = Schedule::from_cron("*/7 * * * *").expect_err("should refuse");
    assert_eq!(err.kind(), ErrorKind::Cron);
    assert!(cron::explain_cron("*/7 * * * *").is_ok());
    assert!(Schedule::from_cron("*/90 * * * *").is_err());
}
