//! 5-field cron (and `@` shortcuts) to schedule.
//!
//! Supported field syntax: `*`, `?` (same as `*`), single values, comma
//! lists, `a-b` ranges and `*/n`, `a/n`, `a-b/n` steps. Day-of-month also
//! takes `L`, `LW` and `nW`; day-of-week takes `n#k` and `nL`. Month and
//! weekday names are accepted in any case.

use crate::error::{ScheduleError, ScheduleResult};
use crate::schedule::core::{
    DayFilter, DayOfMonthSpec, IntervalUnit, MonthName, MonthTarget, OrdinalPosition, Schedule,
    ScheduleExpr, TimeOfDay, Weekday, YearTarget,
};

/// ## Summary
/// Parses a cron expression into the equivalent schedule.
///
/// The month field becomes the schedule's `during` clause. A day-of-week
/// field covering exactly Monday to Friday, or exactly the weekend, collapses
/// to the `weekday` / `weekend` filter.
///
/// ## Errors
/// Returns `ScheduleError::Cron` for a wrong field count, an unknown shortcut,
/// an out-of-range or malformed field, or a field combination with no
/// schedule equivalent.
pub fn from_cron(cron: &str) -> ScheduleResult<Schedule> {
    convert(cron, true)
}

/// Like [`from_cron`], but a minute step that cron restarts every hour (`*/7`,
/// `*/90`) is read as the steady interval it looks like. Only for explaining.
pub(super) fn from_cron_approximate(cron: &str) -> ScheduleResult<Schedule> {
    convert(cron, false)
}

#[tracing::instrument]
fn convert(cron: &str, exact_steps: bool) -> ScheduleResult<Schedule> {
    let cron = cron.trim();

    let schedule = if cron.starts_with('@') {
        Schedule::new(shortcut(cron)?)
    } else {
        let fields: Vec<&str> = cron.split_whitespace().collect();
        let [minute, hour, dom, month, dow] = *fields.as_slice() else {
            return Err(ScheduleError::cron(format!(
                "expected 5 cron fields, got {}",
                fields.len()
            )));
        };
        let fields = Fields {
            minute,
            hour,
            dom: wildcard(dom),
            dow: wildcard(dow),
            exact_steps,
        };
        let mut schedule = Schedule::new(fields.expr()?);
        schedule.during = month_field(month)?;
        schedule
    };

    tracing::debug!(schedule = %schedule, "Converted cron to schedule");
    Ok(schedule)
}

/// `?` only exists to say "no constraint" in day fields.
fn wildcard(field: &str) -> &str {
    if field == "?" { "*" } else { field }
}

fn shortcut(cron: &str) -> ScheduleResult<ScheduleExpr> {
    let midnight = vec![TimeOfDay::MIDNIGHT];
    Ok(match cron.to_ascii_lowercase().as_str() {
        "@yearly" | "@annually" => ScheduleExpr::YearRepeat {
            interval: 1,
            target: YearTarget::Date {
                month: MonthName::January,
                day: 1,
            },
            times: midnight,
        },
        "@monthly" => ScheduleExpr::MonthRepeat {
            interval: 1,
            target: MonthTarget::Days(vec![DayOfMonthSpec::Single(1)]),
            times: midnight,
        },
        "@weekly" => ScheduleExpr::DayRepeat {
            interval: 1,
            days: DayFilter::Days(vec![Weekday::Sunday]),
            times: midnight,
        },
        "@daily" | "@midnight" => ScheduleExpr::DayRepeat {
            interval: 1,
            days: DayFilter::Every,
            times: midnight,
        },
        "@hourly" => ScheduleExpr::IntervalRepeat {
            interval: 1,
            unit: IntervalUnit::Hours,
            from: TimeOfDay::MIDNIGHT,
            to: TimeOfDay::END_OF_DAY,
            day_filter: None,
        },
        _ => return Err(ScheduleError::cron(format!("unknown @ shortcut: {cron}"))),
    })
}

/// The four fields that decide the expression shape; month is handled apart.
struct Fields<'a> {
    minute: &'a str,
    hour: &'a str,
    dom: &'a str,
    dow: &'a str,
    /// Refuse minute steps whose hourly restart breaks the cadence.
    exact_steps: bool,
}

impl Fields<'_> {
    fn expr(&self) -> ScheduleResult<ScheduleExpr> {
        if let Some(expr) = self.ordinal_weekday()? {
            return Ok(expr);
        }
        if let Some(expr) = self.special_day_of_month()? {
            return Ok(expr);
        }
        if self.minute.contains('/') {
            return self.minute_interval();
        }
        if self.hour.contains('/') && matches!(self.minute, "0" | "00") {
            return self.hour_interval();
        }

        let time = self.time()?;
        match (self.dom, self.dow) {
            ("*", dow) => Ok(ScheduleExpr::DayRepeat {
                interval: 1,
                days: dow_field(dow)?,
                times: vec![time],
            }),
            (dom, "*") => Ok(ScheduleExpr::MonthRepeat {
                interval: 1,
                target: dom_field(dom)?,
                times: vec![time],
            }),
            _ => Err(ScheduleError::cron(
                "day-of-month and day-of-week cannot both be restricted",
            )),
        }
    }

    fn time(&self) -> ScheduleResult<TimeOfDay> {
        Ok(TimeOfDay::new(
            value(self.hour, "hour", 0, 23)?,
            value(self.minute, "minute", 0, 59)?,
        ))
    }

    /// `n#k` and `nL` in the day-of-week field.
    fn ordinal_weekday(&self) -> ScheduleResult<Option<ScheduleExpr>> {
        let (weekday, ordinal, syntax) = if let Some((day, nth)) = self.dow.split_once('#') {
            let nth: u32 = nth
                .parse()
                .map_err(|_e| ScheduleError::cron(format!("invalid nth value: {nth}")))?;
            let ordinal = OrdinalPosition::from_nth(nth)
                .ok_or_else(|| ScheduleError::cron(format!("nth must be 1-5, got {nth}")))?;
            (dow_value(day)?, ordinal, "# for nth weekday")
        } else if let Some(day) = self.dow.strip_suffix('L')
            && !day.is_empty()
        {
            (dow_value(day)?, OrdinalPosition::Last, "nL for last weekday")
        } else {
            return Ok(None);
        };

        if self.dom != "*" {
            return Err(ScheduleError::cron(format!("DOM must be * when using {syntax}")));
        }

        Ok(Some(ScheduleExpr::OrdinalRepeat {
            interval: 1,
            ordinal,
            weekday,
            times: vec![self.time()?],
        }))
    }

    /// `L`, `LW` and `nW` in the day-of-month field.
    fn special_day_of_month(&self) -> ScheduleResult<Option<ScheduleExpr>> {
        let target = match self.dom {
            "L" => MonthTarget::LastDay,
            "LW" => MonthTarget::LastWeekday,
            dom => {
                let Some(day) = dom.strip_suffix('W') else {
                    return Ok(None);
                };
                MonthTarget::NearestWeekday {
                    day: value(day, "DOM", 1, 31)?,
                    direction: None,
                }
            }
        };

        if self.dow != "*" {
            return Err(ScheduleError::cron(
                "DOW must be * when using L, LW or W in DOM",
            ));
        }

        Ok(Some(ScheduleExpr::MonthRepeat {
            interval: 1,
            target,
            times: vec![self.time()?],
        }))
    }

    /// `*/n`, `a/n` or `a-b/n` minutes, optionally inside an hour window.
    fn minute_interval(&self) -> ScheduleResult<ScheduleExpr> {
        let (range, step) = self
            .minute
            .split_once('/')
            .ok_or_else(|| ScheduleError::cron("invalid minute interval"))?;
        let interval = step_value(step)?;
        let (from_minute, to_minute) = bounds(range, "minute", 0, 59)?;

        if self.hour.contains('/') {
            return Err(ScheduleError::cron(
                "minute and hour steps cannot be combined",
            ));
        }
        let (from_hour, to_hour) = if let Some((start, end)) = self.hour.split_once('-') {
            ordered(value(start, "hour", 0, 23)?, value(end, "hour", 0, 23)?)?
        } else if self.hour == "*" {
            (0, 23)
        } else {
            let hour = value(self.hour, "hour", 0, 23)?;
            (hour, hour)
        };

        if self.dom != "*" {
            return Err(ScheduleError::cron(
                "minute intervals with a day-of-month field are not supported",
            ));
        }
        let day_filter = match self.dow {
            "*" => None,
            dow => Some(dow_field(dow)?),
        };

        // Cron restarts the step at `from_minute` every hour. Across several
        // hours that is a steady interval only when the last slot of one hour
        // and the first of the next are one step apart.
        let last_minute = from_minute + (to_minute - from_minute) / interval * interval;
        if self.exact_steps {
            if interval >= 60 {
                return Err(ScheduleError::cron(format!(
                    "minute step must be below 60, got {interval}"
                )));
            }
            if from_hour != to_hour && last_minute + interval != from_minute + 60 {
                return Err(ScheduleError::cron(format!(
                    "minute step {} restarts every hour, not a steady {interval}-min interval",
                    self.minute
                )));
            }
        }

        let to = if (from_hour, to_hour, from_minute) == (0, 23, 0) {
            TimeOfDay::END_OF_DAY
        } else {
            TimeOfDay::new(to_hour, last_minute)
        };

        Ok(ScheduleExpr::IntervalRepeat {
            interval,
            unit: IntervalUnit::Minutes,
            from: TimeOfDay::new(from_hour, from_minute),
            to,
            day_filter,
        })
    }

    /// `0 */n`, `0 a/n` or `0 a-b/n`.
    fn hour_interval(&self) -> ScheduleResult<ScheduleExpr> {
        let (range, step) = self
            .hour
            .split_once('/')
            .ok_or_else(|| ScheduleError::cron("invalid hour interval"))?;
        let interval = step_value(step)?;
        let (from_hour, to_hour) = bounds(range, "hour", 0, 23)?;

        if self.dom != "*" || self.dow != "*" {
            return Err(ScheduleError::cron(
                "hour intervals with day fields are not supported",
            ));
        }

        let end_minute = if (from_hour, to_hour) == (0, 23) { 59 } else { 0 };
        Ok(ScheduleExpr::IntervalRepeat {
            interval,
            unit: IntervalUnit::Hours,
            from: TimeOfDay::new(from_hour, 0),
            to: TimeOfDay::new(to_hour, end_minute),
            day_filter: None,
        })
    }
}

/// Parses one numeric field value and checks it against `min..=max`.
fn value(field: &str, name: &str, min: u32, max: u32) -> ScheduleResult<u32> {
    let n: u32 = field
        .parse()
        .map_err(|_e| ScheduleError::cron(format!("invalid {name} field: {field}")))?;
    if !(min..=max).contains(&n) {
        return Err(ScheduleError::cron(format!(
            "{name} must be {min}-{max}, got {n}"
        )));
    }
    Ok(n)
}

fn step_value(step: &str) -> ScheduleResult<u32> {
    let n: u32 = step
        .parse()
        .map_err(|_e| ScheduleError::cron(format!("invalid step value: {step}")))?;
    if n == 0 {
        return Err(ScheduleError::cron("step cannot be 0"));
    }
    Ok(n)
}

fn ordered(start: u32, end: u32) -> ScheduleResult<(u32, u32)> {
    if start > end {
        return Err(ScheduleError::cron(format!(
            "range start must be <= end: {start}-{end}"
        )));
    }
    Ok((start, end))
}

/// Range part of a step expression: `*`, `a-b`, or `a` (meaning `a-max`).
fn bounds(range: &str, name: &str, min: u32, max: u32) -> ScheduleResult<(u32, u32)> {
    if range == "*" {
        return Ok((min, max));
    }
    match range.split_once('-') {
        Some((start, end)) => ordered(value(start, name, min, max)?, value(end, name, min, max)?),
        None => Ok((value(range, name, min, max)?, max)),
    }
}

/// Expands a comma list of values, ranges and steps through `parse_one`.
fn expand_list(
    field: &str,
    name: &str,
    min: u32,
    max: u32,
    parse_one: impl Fn(&str) -> ScheduleResult<u32>,
) -> ScheduleResult<Vec<u32>> {
    let mut values = Vec::new();
    for part in field.split(',') {
        if let Some((range, step)) = part.split_once('/') {
            let step = step_value(step)?;
            let (start, end) = if range == "*" {
                (min, max)
            } else if let Some((start, end)) = range.split_once('-') {
                ordered(parse_one(start)?, parse_one(end)?)?
            } else {
                (parse_one(range)?, max)
            };
            values.extend((start..=end).step_by(usize::try_from(step).unwrap_or(usize::MAX)));
        } else if let Some((start, end)) = part.split_once('-') {
            let (start, end) = ordered(parse_one(start)?, parse_one(end)?)?;
            values.extend(start..=end);
        } else if part.is_empty() {
            return Err(ScheduleError::cron(format!("empty {name} list entry")));
        } else {
            values.push(parse_one(part)?);
        }
    }
    Ok(values)
}

fn month_field(field: &str) -> ScheduleResult<Vec<MonthName>> {
    if field == "*" {
        return Ok(Vec::new());
    }
    let numbers = expand_list(field, "month", 1, 12, |s| {
        if let Some(month) = MonthName::parse(s) {
            return Ok(month.number());
        }
        value(s, "month", 1, 12)
    })?;

    let mut months = Vec::with_capacity(numbers.len());
    for n in numbers {
        let month = MonthName::from_number(n)
            .ok_or_else(|| ScheduleError::cron(format!("invalid month number: {n}")))?;
        if !months.contains(&month) {
            months.push(month);
        }
    }
    Ok(months)
}

/// Day-of-month list. Plain ranges stay ranges; stepped ranges expand.
fn dom_field(field: &str) -> ScheduleResult<MonthTarget> {
    let parse_day = |s: &str| value(s, "DOM", 1, 31);
    let mut specs = Vec::new();
    for part in field.split(',') {
        if !part.contains('/')
            && let Some((start, end)) = part.split_once('-')
        {
            let (start, end) = ordered(parse_day(start)?, parse_day(end)?)?;
            specs.push(DayOfMonthSpec::Range(start, end));
        } else {
            specs.extend(
                expand_list(part, "DOM", 1, 31, parse_day)?
                    .into_iter()
                    .map(DayOfMonthSpec::Single),
            );
        }
    }
    Ok(MonthTarget::Days(specs))
}

/// Day-of-week number without folding 7 into 0, so `5-7` stays a valid range.
fn dow_raw(s: &str) -> ScheduleResult<u32> {
    if let Ok(n) = s.parse::<u32>() {
        if n > 7 {
            return Err(ScheduleError::cron(format!("DOW must be 0-7, got {n}")));
        }
        return Ok(n);
    }
    Weekday::parse(s)
        .map(Weekday::cron_number)
        .ok_or_else(|| ScheduleError::cron(format!("invalid DOW: {s}")))
}

fn weekday_from_cron(n: u32) -> ScheduleResult<Weekday> {
    let iso = if n == 0 { 7 } else { n };
    Weekday::from_number(iso).ok_or_else(|| ScheduleError::cron(format!("invalid DOW number: {n}")))
}

fn dow_value(s: &str) -> ScheduleResult<Weekday> {
    weekday_from_cron(dow_raw(s)?)
}

fn dow_field(field: &str) -> ScheduleResult<DayFilter> {
    if field == "*" {
        return Ok(DayFilter::Every);
    }

    let mut days = Vec::new();
    for n in expand_list(field, "DOW", 0, 6, dow_raw)? {
        let day = weekday_from_cron(n)?;
        if !days.contains(&day) {
            days.push(day);
        }
    }

    Ok(DayFilter::from_days(days))
}
