//! Forward search: the first occurrence strictly after a reference instant,
//! ignoring the `except`/`until` clauses (applied by the caller).

use chrono::{DateTime, Datelike, NaiveDate, Timelike};
use chrono_tz::Tz;

use hron_core::constants::{
    DAY_SCAN_LIMIT, MONTH_SCAN_FACTOR, WEEK_SCAN_LIMIT, WIDE_DAY_SCAN_LIMIT, YEAR_SCAN_FACTOR,
};

use super::Context;
use super::calendar::{
    self, YearMonth, add_days, day_anchor, days_between, is_aligned, matches_during,
    month_anchor, month_target_dates, ordinal_weekday, week_anchor, weekday_of, year_anchor,
    year_target_date,
};
use crate::schedule::core::{
    DateSpec, DayFilter, IntervalUnit, MonthTarget, OrdinalPosition, ScheduleExpr, TimeOfDay,
    Weekday, YearTarget,
};

pub(super) fn next_expr(
    expr: &ScheduleExpr,
    ctx: &Context<'_>,
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    match expr {
        ScheduleExpr::DayRepeat {
            interval,
            days,
            times,
        } => next_day_repeat(ctx, *interval, days, times, now),
        ScheduleExpr::IntervalRepeat {
            interval,
            unit,
            from,
            to,
            day_filter,
        } => next_interval_repeat(ctx, *interval, *unit, *from, *to, day_filter.as_ref(), now),
        ScheduleExpr::WeekRepeat {
            interval,
            days,
            times,
        } => next_week_repeat(ctx, *interval, days, times, now),
        ScheduleExpr::MonthRepeat {
            interval,
            target,
            times,
        } => next_month_repeat(
            ctx,
            *interval,
            times,
            now,
            |ym| month_target_dates(ym, target),
            handles_during(expr),
        ),
        ScheduleExpr::OrdinalRepeat {
            interval,
            ordinal,
            weekday,
            times,
        } => next_month_repeat(
            ctx,
            *interval,
            times,
            now,
            |ym| ordinal_dates(ym, *ordinal, *weekday),
            false,
        ),
        ScheduleExpr::SingleDate { date, times } => next_single_date(ctx, *date, times, now),
        ScheduleExpr::YearRepeat {
            interval,
            target,
            times,
        } => next_year_repeat(ctx, *interval, target, times, now),
    }
}

/// Nearest-weekday targets with a direction can land outside the month they
/// were computed for, so `during` is checked against that month here rather
/// than against the result.
pub(super) const fn handles_during(expr: &ScheduleExpr) -> bool {
    matches!(
        expr,
        ScheduleExpr::MonthRepeat {
            target: MonthTarget::NearestWeekday {
                direction: Some(_),
                ..
            },
            ..
        }
    )
}

pub(super) fn ordinal_dates(ym: YearMonth, ordinal: OrdinalPosition, weekday: Weekday) -> Vec<NaiveDate> {
    ordinal_weekday(ym, ordinal, weekday).into_iter().collect()
}

fn next_day_repeat(
    ctx: &Context<'_>,
    interval: u32,
    days: &DayFilter,
    times: &[TimeOfDay],
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let mut date = now.date_naive();

    if interval <= 1 {
        if days.matches(weekday_of(date))
            && let Some(hit) = ctx.earliest_future(date, times, now)
        {
            return Some(hit);
        }
        for _ in 0..DAY_SCAN_LIMIT {
            date = date.succ_opt()?;
            if days.matches(weekday_of(date))
                && let Some(hit) = ctx.earliest_future(date, times, now)
            {
                return Some(hit);
            }
        }
        return None;
    }

    let step = i64::from(interval);
    let offset = i64::from(date.num_days_from_ce()) - i64::from(day_anchor(ctx.anchor));
    let remainder = offset.rem_euclid(step);
    if remainder != 0 {
        date = add_days(date, step - remainder)?;
    }

    for _ in 0..WIDE_DAY_SCAN_LIMIT {
        if let Some(hit) = ctx.earliest_future(date, times, now) {
            return Some(hit);
        }
        date = add_days(date, step)?;
    }
    None
}

fn next_interval_repeat(
    ctx: &Context<'_>,
    interval: u32,
    unit: IntervalUnit,
    from: TimeOfDay,
    to: TimeOfDay,
    day_filter: Option<&DayFilter>,
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let step = i64::from(unit.step_minutes(interval).max(1));
    let from_min = i64::from(from.minutes_since_midnight());
    let to_min = i64::from(to.minutes_since_midnight());
    let today = now.date_naive();
    let mut date = today;

    for _ in 0..WIDE_DAY_SCAN_LIMIT {
        if day_filter.is_none_or(|f| f.matches(weekday_of(date))) {
            let now_min = if date == today {
                i64::from(now.hour() * 60 + now.minute())
            } else {
                -1
            };
            let slot = if now_min < from_min {
                from_min
            } else {
                from_min + ((now_min - from_min) / step + 1) * step
            };
            if slot <= to_min
                && let Ok(minutes) = u32::try_from(slot)
            {
                let hit = ctx.at(date, TimeOfDay::from_minutes(minutes));
                if hit > *now {
                    return Some(hit);
                }
            }
        }
        date = date.succ_opt()?;
    }
    None
}

fn next_week_repeat(
    ctx: &Context<'_>,
    interval: u32,
    days: &[Weekday],
    times: &[TimeOfDay],
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let today = now.date_naive();
    let mut sorted = days.to_vec();
    sorted.sort_unstable();

    let anchor_monday = NaiveDate::from_num_days_from_ce_opt(week_anchor(ctx.anchor))?;
    let mut monday = calendar::monday_of(today)?;
    let step = i64::from(interval.max(1));

    for _ in 0..WEEK_SCAN_LIMIT {
        let remainder = days_between(anchor_monday, monday)
            .div_euclid(7)
            .rem_euclid(step);
        if remainder == 0 {
            for day in &sorted {
                let date = add_days(monday, i64::from(day.number() - 1))?;
                if let Some(hit) = ctx.earliest_future(date, times, now) {
                    return Some(hit);
                }
            }
        }

        let skip = if remainder == 0 { step } else { step - remainder };
        monday = add_days(monday, skip * 7)?;
    }
    None
}

/// Shared month walk for month and ordinal repeats. `dates` lists the
/// candidate dates for a month.
fn next_month_repeat(
    ctx: &Context<'_>,
    interval: u32,
    times: &[TimeOfDay],
    now: &DateTime<Tz>,
    dates: impl Fn(YearMonth) -> Vec<NaiveDate>,
    filter_during: bool,
) -> Option<DateTime<Tz>> {
    let anchor = month_anchor(ctx.anchor);
    // A month early: `next nearest weekday` can land in the following month.
    let mut ym = YearMonth::of(now.date_naive()).prev();
    let limit = MONTH_SCAN_FACTOR * usize::try_from(interval.max(1)).ok()? + 1;

    for _ in 0..limit {
        let in_season = !filter_during
            || ym
                .day(1)
                .is_some_and(|first| matches_during(first, ctx.during));
        let aligned = interval <= 1 || is_aligned(ym.months_since(anchor), interval);

        if in_season && aligned {
            let best = dates(ym)
                .into_iter()
                .filter_map(|date| ctx.earliest_future(date, times, now))
                .min();
            if best.is_some() {
                return best;
            }
        }
        ym = ym.next();
    }
    None
}

fn next_single_date(
    ctx: &Context<'_>,
    date: DateSpec,
    times: &[TimeOfDay],
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    match date {
        DateSpec::Iso(date) => ctx.earliest_future(date, times, now),
        DateSpec::Named { month, day } => {
            let start = now.year();
            (0..YEAR_SCAN_FACTOR)
                .filter_map(|y| i32::try_from(y).ok())
                .filter_map(|y| NaiveDate::from_ymd_opt(start + y, month.number(), day))
                .find_map(|date| ctx.earliest_future(date, times, now))
        }
    }
}

fn next_year_repeat(
    ctx: &Context<'_>,
    interval: u32,
    target: &YearTarget,
    times: &[TimeOfDay],
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let start = now.year();
    let anchor = year_anchor(ctx.anchor);
    let limit = YEAR_SCAN_FACTOR * usize::try_from(interval.max(1)).ok()?;

    for y in 0..limit {
        let year = start + i32::try_from(y).ok()?;
        if interval > 1 && !is_aligned(i64::from(year - anchor), interval) {
            continue;
        }
        if let Some(date) = year_target_date(year, target)
            && let Some(hit) = ctx.earliest_future(date, times, now)
        {
            return Some(hit);
        }
    }
    None
}
