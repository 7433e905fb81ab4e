//! Subcommand handlers.
//!
//! Each handler returns the text to print so the binary stays a thin shell
//! around I/O.

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use hron::Schedule;
use hron::eval::resolve_timezone;
use hron_core::config::Settings;

use crate::cli::Command;
use crate::error::{AppError, AppResult};

/// ## Summary
/// Runs one subcommand against the loaded settings.
///
/// `now` is the reference instant used when the command does not name one.
///
/// ## Errors
/// Returns `AppError::ScheduleError` for expressions that fail to parse,
/// evaluate, or convert, and `AppError::InvalidInstant` for malformed
/// RFC 3339 arguments.
#[tracing::instrument(skip(settings, now))]
pub fn run(command: &Command, settings: &Settings, now: DateTime<Utc>) -> AppResult<String> {
    let output_tz = resolve_timezone(Some(settings.output.timezone.as_str()))
        .map_err(hron::ScheduleError::from)?;

    match command {
        Command::Next { expr, count, from } => {
            let schedule = Schedule::parse(expr)?;
            let from = reference(from.as_deref(), now)?;
            let hits = schedule.next_n_from(&from, count.unwrap_or(settings.output.count))?;
            if hits.is_empty() {
                return Ok("no upcoming occurrences".to_string());
            }
            Ok(hits
                .iter()
                .map(|hit| format_instant(hit, output_tz))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Command::Previous { expr, from } => {
            let schedule = Schedule::parse(expr)?;
            let from = reference(from.as_deref(), now)?;
            Ok(schedule.previous_from(&from)?.map_or_else(
                || "no earlier occurrence".to_string(),
                |hit| format_instant(&hit, output_tz),
            ))
        }
        Command::Matches { expr, at } => {
            let schedule = Schedule::parse(expr)?;
            let at = parse_instant(at)?;
            Ok(schedule.matches(&at)?.to_string())
        }
        Command::ToCron { expr } => Ok(Schedule::parse(expr)?.to_cron()?),
        Command::FromCron { cron } => Ok(Schedule::from_cron(cron)?.to_string()),
        Command::Explain { cron } => Ok(hron::cron::explain_cron(cron)?),
        Command::Check { expr } => Ok(Schedule::parse(expr)?.to_string()),
    }
}

fn reference(from: Option<&str>, now: DateTime<Utc>) -> AppResult<DateTime<FixedOffset>> {
    from.map_or_else(|| Ok(now.fixed_offset()), parse_instant)
}

fn parse_instant(input: &str) -> AppResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(input).map_err(|e| AppError::InvalidInstant {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

fn format_instant<Z: chrono::TimeZone>(instant: &DateTime<Z>, tz: Tz) -> String {
    instant.with_timezone(&tz).to_rfc3339()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use hron_core::config::{LoggingConfig, OutputConfig};

    use super::*;

    fn settings(timezone: &str) -> Settings {
        Settings {
            logging: LoggingConfig {
                level: "warn".to_string(),
            },
            output: OutputConfig {
                count: 3,
                timezone: timezone.to_string(),
            },
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 6, 12, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn run_ok(command: Command) -> String {
        run(&command, &settings("UTC"), now()).expect("command should succeed")
    }

    #[test_log::test]
    fn test_next_uses_configured_count() {
        let out = run_ok(Command::Next {
            expr: "every day at 09:00".to_string(),
            count: None,
            from: None,
        });
        assert_eq!(
            out,
            "2026-02-07T09:00:00+00:00\n2026-02-08T09:00:00+00:00\n2026-02-09T09:00:00+00:00"
        );
    }

    #[test_log::test]
    fn test_next_prints_in_output_zone() {
        let out = run(
            &Command::Next {
                expr: "every day at 09:00".to_string(),
                count: Some(1),
                from: Some("2026-07-01T00:00:00Z".to_string()),
            },
            &settings("Europe/Paris"),
            now(),
        )
        .expect("command should succeed");
        assert_eq!(out, "2026-07-01T11:00:00+02:00");
    }

    #[test_log::test]
    fn test_previous_and_exhaustion() {
        let out = run_ok(Command::Previous {
            expr: "every weekday at 17:00".to_string(),
            from: None,
        });
        assert_eq!(out, "2026-02-05T17:00:00+00:00");

        let out = run_ok(Command::Next {
            expr: "on 2020-01-01 at 09:00".to_string(),
            count: Some(2),
            from: None,
        });
        assert_eq!(out, "no upcoming occurrences");
    }

    #[test_log::test]
    fn test_matches_and_conversions() {
        assert_eq!(
            run_ok(Command::Matches {
                expr: "every friday at 12:00".to_string(),
                at: "2026-02-06T12:00:00Z".to_string(),
            }),
            "true"
        );
        assert_eq!(
            run_ok(Command::ToCron {
                expr: "every weekday at 9:00".to_string(),
            }),
            "0 9 * * 1-5"
        );
        assert_eq!(
            run_ok(Command::FromCron {
                cron: "30 6 1 * *".to_string(),
            }),
            "every month on the 1st at 06:30"
        );
        assert_eq!(
            run_ok(Command::Check {
                expr: "every mon at 9:00".to_string(),
            }),
            "every monday at 09:00"
        );
    }

    #[test_log::test]
    fn test_errors() {
        let err = run(
            &Command::Check {
                expr: "every mondy at 09:00".to_string(),
            },
            &settings("UTC"),
            now(),
        )
        .expect_err("should fail");
        assert!(matches!(err, AppError::ScheduleError(_)));

        let err = run(
            &Command::Matches {
                expr: "every day at 09:00".to_string(),
                at: "yesterday".to_string(),
            },
            &settings("UTC"),
            now(),
        )
        .expect_err("should fail");
        assert!(matches!(err, AppError::InvalidInstant { .. }));

        let err = run(
            &Command::Check {
                expr: "every day at 09:00".to_string(),
            },
            &settings("Nowhere/Land"),
            now(),
        )
        .expect_err("should fail");
        assert_eq!(err.to_string(), "unknown timezone: Nowhere/Land");
    }
}
