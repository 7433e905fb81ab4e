//! Plain-language explanation of a cron expression.

use super::from_cron::from_cron_approximate;
use crate::error::ScheduleResult;

/// ## Summary
/// Renders a cron expression as schedule text.
///
/// When the minute field is a `*/n` step that does not divide the hour, a
/// note lists the minutes cron actually fires at, since cron restarts the
/// step every hour rather than keeping a true `n`-minute cadence.
///
/// ## Errors
/// Returns `ScheduleError::Cron` when the expression does not parse.
pub fn explain_cron(cron: &str) -> ScheduleResult<String> {
    let mut explanation = from_cron_approximate(cron)?.to_string();

    if let Some(step) = cron
        .split_whitespace()
        .next()
        .and_then(|minute| minute.strip_prefix("*/"))
        .and_then(|step| step.parse::<u32>().ok())
        && 60 % step != 0
    {
        let fires: Vec<String> = (0..60)
            .step_by(usize::try_from(step).unwrap_or(usize::MAX))
            .map(|m| format!(":{m:02}"))
            .collect();
        explanation.push_str(&format!(
            "\nnote: cron */{step} actually fires at {} each hour, not true {step}-min intervals",
            fires.join(" and ")
        ));
    }

    Ok(explanation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_explain_plain() {
        assert_eq!(
            explain_cron("0 9 * * 1-5").expect("should explain"),
            "every weekday at 09:00"
        );
    }

    #[test_log::test]
    fn test_explain_notes_uneven_minute_step() {
        let text = explain_cron("*/45 * * * *").expect("should explain");
        assert_eq!(
            text,
            "every 45 min from 00:00 to 23:59\n\
             note: cron */45 actually fires at :00 and :45 each hour, not true 45-min intervals"
        );
    }

    #[test_log::test]
    fn test_explain_step_longer_than_an_hour() {
        let text = explain_cron("*/90 * * * *").expect("should explain");
        assert_eq!(
            text,
            "every 90 min from 00:00 to 23:59\n\
             note: cron */90 actually fires at :00 each hour, not true 90-min intervals"
        );
    }

    #[test_log::test]
    fn test_explain_even_step_has_no_note() {
        let text = explain_cron("*/15 * * * *").expect("should explain");
        assert!(!text.contains("note:"), "{text}");
    }

    #[test_log::test]
    fn test_explain_propagates_errors() {
        assert!(explain_cron("not cron").is_err());
    }
}
