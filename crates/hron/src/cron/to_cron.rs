//! Schedule to 5-field cron.
//!
//! The mapping is strict: anything cron cannot say exactly is an error, never
//! an approximation.

use crate::error::{ScheduleError, ScheduleResult};
use crate::schedule::core::{
    DayFilter, DayOfMonthSpec, IntervalUnit, MonthTarget, Schedule, ScheduleExpr, TimeOfDay,
    Weekday,
};

fn unsupported(what: &str) -> ScheduleError {
    ScheduleError::cron(format!("not expressible as cron ({what})"))
}

/// ## Summary
/// Renders a schedule as `minute hour day-of-month month day-of-week`.
///
/// The timezone is not part of the output; cron has no way to carry one.
///
/// ## Errors
/// Returns `ScheduleError::Cron` naming the first construct with no exact cron
/// equivalent: modifier clauses, multi-day/week/month intervals, ordinal or
/// last-day targets, several times of day, partial-day windows, minute steps
/// that do not divide the hour, single dates and yearly repeats.
#[tracing::instrument(skip_all, fields(schedule = %schedule))]
pub fn to_cron(schedule: &Schedule) -> ScheduleResult<String> {
    if !schedule.except.is_empty() {
        return Err(unsupported("except clauses not supported"));
    }
    if schedule.until.is_some() {
        return Err(unsupported("until clauses not supported"));
    }
    if !schedule.during.is_empty() {
        return Err(unsupported("during clauses not supported"));
    }

    let cron = match &schedule.expr {
        ScheduleExpr::DayRepeat {
            interval,
            days,
            times,
        } => {
            if *interval > 1 {
                return Err(unsupported("multi-day intervals not supported"));
            }
            let time = single_time(times)?;
            format!("{} {} * * {}", time.minute, time.hour, dow_field(days))
        }
        ScheduleExpr::IntervalRepeat {
            interval,
            unit,
            from,
            to,
            day_filter,
        } => interval_fields(*interval, *unit, *from, *to, day_filter.as_ref())?,
        ScheduleExpr::WeekRepeat {
            interval,
            days,
            times,
        } => {
            if *interval > 1 {
                return Err(unsupported("multi-week intervals not supported"));
            }
            let time = single_time(times)?;
            let days = DayFilter::Days(days.clone());
            format!("{} {} * * {}", time.minute, time.hour, dow_field(&days))
        }
        ScheduleExpr::MonthRepeat {
            interval,
            target,
            times,
        } => {
            if *interval > 1 {
                return Err(unsupported("multi-month intervals not supported"));
            }
            let time = single_time(times)?;
            format!("{} {} {} * *", time.minute, time.hour, dom_field(target)?)
        }
        ScheduleExpr::OrdinalRepeat { .. } => {
            return Err(unsupported("ordinal weekday of month not supported"));
        }
        ScheduleExpr::SingleDate { .. } => {
            return Err(unsupported("single dates are not repeating"));
        }
        ScheduleExpr::YearRepeat { .. } => {
            return Err(unsupported(
                "yearly schedules not supported in 5-field cron",
            ));
        }
    };

    tracing::debug!(cron = %cron, "Converted schedule to cron");
    Ok(cron)
}

fn single_time(times: &[TimeOfDay]) -> ScheduleResult<TimeOfDay> {
    match times {
        [time] => Ok(*time),
        _ => Err(unsupported("multiple times not supported")),
    }
}

fn interval_fields(
    interval: u32,
    unit: IntervalUnit,
    from: TimeOfDay,
    to: TimeOfDay,
    day_filter: Option<&DayFilter>,
) -> ScheduleResult<String> {
    if from != TimeOfDay::MIDNIGHT || to != TimeOfDay::END_OF_DAY {
        return Err(unsupported("partial-day interval windows not supported"));
    }
    if day_filter.is_some() {
        return Err(unsupported("interval with day filter not supported"));
    }

    match unit {
        IntervalUnit::Minutes => {
            if 60 % interval != 0 {
                return Err(unsupported(&format!(
                    "*/{interval} breaks at hour boundaries"
                )));
            }
            Ok(format!("*/{interval} * * * *"))
        }
        // The window restarts at midnight, same as a cron hour step.
        IntervalUnit::Hours => Ok(format!("0 */{interval} * * *")),
    }
}

fn dow_field(filter: &DayFilter) -> String {
    match filter {
        DayFilter::Every => "*".to_string(),
        DayFilter::Weekday => "1-5".to_string(),
        DayFilter::Weekend => "0,6".to_string(),
        DayFilter::Days(days) => match DayFilter::from_days(days.clone()) {
            DayFilter::Days(days) => {
                let mut numbers: Vec<u32> =
                    days.iter().copied().map(Weekday::cron_number).collect();
                numbers.sort_unstable();
                numbers.dedup();
                join(numbers.iter().map(ToString::to_string))
            }
            shorthand => dow_field(&shorthand),
        },
    }
}

fn dom_field(target: &MonthTarget) -> ScheduleResult<String> {
    match target {
        MonthTarget::Days(specs) => Ok(join(specs.iter().map(|spec| match spec {
            DayOfMonthSpec::Single(day) => day.to_string(),
            DayOfMonthSpec::Range(start, end) => format!("{start}-{end}"),
        }))),
        MonthTarget::LastDay => Err(unsupported("last day of month not supported")),
        MonthTarget::LastWeekday => Err(unsupported("last weekday of month not supported")),
        MonthTarget::NearestWeekday { .. } => {
            Err(unsupported("nearest weekday not supported"))
        }
        MonthTarget::OrdinalWeekday { .. } => {
            Err(unsupported("ordinal weekday of month not supported"))
        }
    }
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(",")
}
