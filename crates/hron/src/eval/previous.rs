//! Backward search: the latest occurrence strictly before a reference
//! instant. Mirrors the forward walks in `next`.

use chrono::{DateTime, Datelike, NaiveDate, Timelike};
use chrono_tz::Tz;

use hron_core::constants::{DAY_SCAN_LIMIT, MONTH_SCAN_FACTOR, WEEK_SCAN_LIMIT, YEAR_SCAN_FACTOR};

use super::Context;
use super::calendar::{
    YearMonth, add_days, day_anchor, days_between, is_aligned, monday_of, month_anchor,
    month_target_dates, week_anchor, weekday_of, year_anchor, year_target_date,
};
use super::next::ordinal_dates;
use crate::schedule::core::{
    DateSpec, DayFilter, IntervalUnit, ScheduleExpr, TimeOfDay, Weekday, YearTarget,
};

/// Aligned days tried for multi-day repeats: the current one and the one before.
const ALIGNED_DAY_ATTEMPTS: usize = 2;

pub(super) fn prev_expr(
    expr: &ScheduleExpr,
    ctx: &Context<'_>,
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    match expr {
        ScheduleExpr::DayRepeat {
            interval,
            days,
            times,
        } => prev_day_repeat(ctx, *interval, days, times, now),
        ScheduleExpr::IntervalRepeat {
            interval,
            unit,
            from,
            to,
            day_filter,
        } => prev_interval_repeat(ctx, *interval, *unit, *from, *to, day_filter.as_ref(), now),
        ScheduleExpr::WeekRepeat {
            interval,
            days,
            times,
        } => prev_week_repeat(ctx, *interval, days, times, now),
        ScheduleExpr::MonthRepeat {
            interval,
            target,
            times,
        } => prev_month_repeat(ctx, *interval, times, now, |ym| {
            month_target_dates(ym, target)
        }),
        ScheduleExpr::OrdinalRepeat {
            interval,
            ordinal,
            weekday,
            times,
        } => prev_month_repeat(ctx, *interval, times, now, |ym| {
            ordinal_dates(ym, *ordinal, *weekday)
        }),
        ScheduleExpr::SingleDate { date, times } => prev_single_date(ctx, *date, times, now),
        ScheduleExpr::YearRepeat {
            interval,
            target,
            times,
        } => prev_year_repeat(ctx, *interval, target, times, now),
    }
}

/// Latest listed time on `date` before `now`: today's passed times, or the
/// last time of an earlier day. `None` for later days.
fn latest_on(
    ctx: &Context<'_>,
    date: NaiveDate,
    times: &[TimeOfDay],
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let today = now.date_naive();
    if date > today {
        None
    } else if date == today {
        ctx.latest_past(date, times, now)
    } else {
        ctx.latest(date, times)
    }
}

fn prev_day_repeat(
    ctx: &Context<'_>,
    interval: u32,
    days: &DayFilter,
    times: &[TimeOfDay],
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let mut date = now.date_naive();

    if interval <= 1 {
        if days.matches(weekday_of(date))
            && let Some(hit) = ctx.latest_past(date, times, now)
        {
            return Some(hit);
        }
        for _ in 0..DAY_SCAN_LIMIT {
            date = date.pred_opt()?;
            if days.matches(weekday_of(date))
                && let Some(hit) = ctx.latest(date, times)
            {
                return Some(hit);
            }
        }
        return None;
    }

    let step = i64::from(interval);
    let offset = i64::from(date.num_days_from_ce()) - i64::from(day_anchor(ctx.anchor));
    date = add_days(date, -offset.rem_euclid(step))?;

    for _ in 0..ALIGNED_DAY_ATTEMPTS {
        if let Some(hit) = latest_on(ctx, date, times, now) {
            return Some(hit);
        }
        date = add_days(date, -step)?;
    }
    None
}

fn prev_interval_repeat(
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

    for _ in 0..DAY_SCAN_LIMIT {
        if day_filter.is_none_or(|f| f.matches(weekday_of(date))) {
            let is_today = date == today;
            let now_min = if is_today {
                i64::from(now.hour() * 60 + now.minute())
            } else {
                to_min + 1
            };
            let search_until = now_min.min(to_min);

            if search_until >= from_min {
                // Compare resolved instants: `now` may carry seconds, and a
                // gap can push a slot past it.
                let mut slot = from_min + ((search_until - from_min) / step) * step;
                while slot >= from_min {
                    let Ok(minutes) = u32::try_from(slot) else {
                        break;
                    };
                    let hit = ctx.at(date, TimeOfDay::from_minutes(minutes));
                    if hit < *now {
                        return Some(hit);
                    }
                    slot -= step;
                }
            }
        }
        date = date.pred_opt()?;
    }
    None
}

fn prev_week_repeat(
    ctx: &Context<'_>,
    interval: u32,
    days: &[Weekday],
    times: &[TimeOfDay],
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let today = now.date_naive();
    let mut sorted = days.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let anchor_monday = NaiveDate::from_num_days_from_ce_opt(week_anchor(ctx.anchor))?;
    let mut monday = monday_of(today)?;
    let step = i64::from(interval.max(1));

    for _ in 0..WEEK_SCAN_LIMIT {
        let remainder = days_between(anchor_monday, monday)
            .div_euclid(7)
            .rem_euclid(step);
        if remainder == 0 {
            for day in &sorted {
                let date = add_days(monday, i64::from(day.number() - 1))?;
                if let Some(hit) = latest_on(ctx, date, times, now) {
                    return Some(hit);
                }
            }
        }

        let skip = if remainder == 0 { step } else { remainder };
        monday = add_days(monday, -skip * 7)?;
    }
    None
}

fn prev_month_repeat(
    ctx: &Context<'_>,
    interval: u32,
    times: &[TimeOfDay],
    now: &DateTime<Tz>,
    dates: impl Fn(YearMonth) -> Vec<NaiveDate>,
) -> Option<DateTime<Tz>> {
    let anchor = month_anchor(ctx.anchor);
    // A month late: `previous nearest weekday` can land in the month before.
    let mut ym = YearMonth::of(now.date_naive()).next();
    let limit = MONTH_SCAN_FACTOR * usize::try_from(interval.max(1)).ok()? + 1;

    for _ in 0..limit {
        if interval <= 1 || is_aligned(ym.months_since(anchor), interval) {
            let mut candidates = dates(ym);
            candidates.sort_unstable_by(|a, b| b.cmp(a));
            if let Some(hit) = candidates
                .into_iter()
                .find_map(|date| latest_on(ctx, date, times, now))
            {
                return Some(hit);
            }
        }
        ym = ym.prev();
    }
    None
}

fn prev_single_date(
    ctx: &Context<'_>,
    date: DateSpec,
    times: &[TimeOfDay],
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    match date {
        DateSpec::Iso(date) => latest_on(ctx, date, times, now),
        DateSpec::Named { month, day } => {
            let year = now.year();
            (0..YEAR_SCAN_FACTOR)
                .filter_map(|y| i32::try_from(y).ok())
                .filter_map(|y| NaiveDate::from_ymd_opt(year - y, month.number(), day))
                .find_map(|date| latest_on(ctx, date, times, now))
        }
    }
}

fn prev_year_repeat(
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
        let year = start - i32::try_from(y).ok()?;
        if interval > 1 && !is_aligned(i64::from(year - anchor), interval) {
            continue;
        }
        if let Some(date) = year_target_date(year, target)
            && let Some(hit) = latest_on(ctx, date, times, now)
        {
            return Some(hit);
        }
    }
    None
}
