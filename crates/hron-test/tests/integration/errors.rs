//! Error reporting through the public entry points.

use hron_test::{ErrorKind, Schedule, Span};

fn parse_err(input: &str) -> hron_test::ScheduleError {
    Schedule::parse(input).expect_err("should fail to parse")
}

#[test_log::test]
fn test_error_kinds() {
    assert_eq!(parse_err("every day at 9:0").kind(), ErrorKind::Lex);
    assert_eq!(parse_err("every day 09:00").kind(), ErrorKind::Parse);
    assert_eq!(
        Schedule::from_cron("* * *").expect_err("should fail").kind(),
        ErrorKind::Cron
    );
}

#[test_log::test]
fn test_rich_rendering_points_at_token() {
    let err = parse_err("every mondy at 09:00");
    assert_eq!(err.span(), Some(Span::new(6, 11)));
    assert_eq!(
        err.display_rich(),
        "error: unknown keyword 'mondy'\n  every mondy at 09:00\n        ^^^^^ try: \"monday\""
    );
}

#[test_log::test]
fn test_missing_ordinal_suffix_is_suggested() {
    let err = parse_err("every month on the 15 at 09:00");
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(err.suggestion(), Some("15th"));
}

#[test_log::test]
fn test_clause_dates_are_validated() {
    assert_eq!(
        parse_err("every day at 09:00 except feb 30").message(),
        "invalid day 30 for february"
    );
    assert_eq!(
        parse_err("every day at 09:00 until 2026-13-01").message(),
        "invalid date: 2026-13-01"
    );
    assert_eq!(
        parse_err("every day at 09:00 starting tomorrow").kind(),
        ErrorKind::Lex
    );
}

#[test_log::test]
fn test_validate_and_leftovers() {
    assert!(Schedule::validate("every weekday at 09:00 in Europe/Berlin"));
    assert!(!Schedule::validate("every weekday at 09:00 at 10:00"));
    assert_eq!(
        parse_err("every day at 09:00 every").message(),
        "unexpected tokens after expression"
    );
}
