//! Membership test: does a schedule fire at a given instant?

use chrono::{DateTime, Datelike, NaiveDate, Timelike};
use chrono_tz::Tz;

use super::Context;
use super::calendar::{
    YearMonth, day_anchor, days_between, is_aligned, month_anchor, month_target_dates,
    ordinal_weekday, week_anchor, weekday_of, year_anchor, year_target_date,
};
use crate::schedule::core::{DateSpec, ScheduleExpr, TimeOfDay};

/// Variant predicate for `dt`, already converted to the schedule's zone.
/// Clause checks (`during`, `except`, `until`) happen in the caller.
pub(super) fn matches_expr(expr: &ScheduleExpr, ctx: &Context<'_>, dt: &DateTime<Tz>) -> bool {
    let date = dt.date_naive();

    match expr {
        ScheduleExpr::DayRepeat {
            interval,
            days,
            times,
        } => {
            days.matches(weekday_of(date))
                && time_matches(ctx, date, times, dt)
                && (*interval <= 1
                    || is_aligned(
                        i64::from(date.num_days_from_ce()) - i64::from(day_anchor(ctx.anchor)),
                        *interval,
                    ))
        }
        ScheduleExpr::IntervalRepeat {
            interval,
            unit,
            from,
            to,
            day_filter,
        } => {
            if day_filter
                .as_ref()
                .is_some_and(|f| !f.matches(weekday_of(date)))
            {
                return false;
            }
            let current = dt.hour() * 60 + dt.minute();
            let from_min = from.minutes_since_midnight();
            let to_min = to.minutes_since_midnight();
            let step = unit.step_minutes(*interval).max(1);
            current >= from_min
                && current <= to_min
                && (current - from_min) % step == 0
        }
        ScheduleExpr::WeekRepeat {
            interval,
            days,
            times,
        } => {
            let anchor = NaiveDate::from_num_days_from_ce_opt(week_anchor(ctx.anchor));
            days.contains(&weekday_of(date))
                && time_matches(ctx, date, times, dt)
                && anchor.is_some_and(|monday| {
                    is_aligned(days_between(monday, date).div_euclid(7), *interval)
                })
        }
        ScheduleExpr::MonthRepeat {
            interval,
            target,
            times,
        } => {
            // Directed nearest-weekday targets may fall in a neighboring month.
            let ym = YearMonth::of(date);
            time_matches(ctx, date, times, dt)
                && [ym.prev(), ym, ym.next()].into_iter().any(|m| {
                    month_aligned(ctx, m, *interval) && month_target_dates(m, target).contains(&date)
                })
        }
        ScheduleExpr::OrdinalRepeat {
            interval,
            ordinal,
            weekday,
            times,
        } => {
            let ym = YearMonth::of(date);
            time_matches(ctx, date, times, dt)
                && month_aligned(ctx, ym, *interval)
                && ordinal_weekday(ym, *ordinal, *weekday) == Some(date)
        }
        ScheduleExpr::SingleDate {
            date: target,
            times,
        } => {
            let on_date = match *target {
                DateSpec::Iso(d) => d == date,
                DateSpec::Named { month, day } => {
                    date.month() == month.number() && date.day() == day
                }
            };
            on_date && time_matches(ctx, date, times, dt)
        }
        ScheduleExpr::YearRepeat {
            interval,
            target,
            times,
        } => {
            time_matches(ctx, date, times, dt)
                && (*interval <= 1
                    || is_aligned(i64::from(date.year() - year_anchor(ctx.anchor)), *interval))
                && year_target_date(date.year(), target) == Some(date)
        }
    }
}

fn month_aligned(ctx: &Context<'_>, ym: YearMonth, interval: u32) -> bool {
    interval <= 1 || is_aligned(ym.months_since(month_anchor(ctx.anchor)), interval)
}

/// Wall-clock match on any listed time at minute precision, or, for a time
/// pushed forward by a DST gap, the instant it resolves to.
fn time_matches(ctx: &Context<'_>, date: NaiveDate, times: &[TimeOfDay], dt: &DateTime<Tz>) -> bool {
    times.iter().any(|t| {
        (dt.hour() == t.hour && dt.minute() == t.minute) || ctx.at(date, *t) == *dt
    })
}
