//! Calendar arithmetic over `chrono::NaiveDate`.
//!
//! Everything here works on local civil dates; instants only appear in the
//! evaluator once a date has been chosen.

use chrono::{Datelike, Days, NaiveDate, Weekday as ChronoWeekday};

use hron_core::constants::{EPOCH_DAYS_FROM_CE, EPOCH_MONDAY_DAYS_FROM_CE, EPOCH_YEAR};

use crate::schedule::core::{
    Exception, MonthName, MonthTarget, NearestDirection, OrdinalPosition, UntilSpec, Weekday,
    YearTarget,
};

/// A calendar month, used to walk month by month without building dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        if self.month <= 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Months elapsed since `anchor`'s month; negative when `self` is earlier.
    #[must_use]
    pub fn months_since(self, anchor: Self) -> i64 {
        (i64::from(self.year) * 12 + i64::from(self.month))
            - (i64::from(anchor.year) * 12 + i64::from(anchor.month))
    }

    #[must_use]
    pub fn day(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    #[must_use]
    pub fn last_day(self) -> u32 {
        days_in_month(self.year, self.month)
    }
}

#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[must_use]
pub fn last_day_of_month(ym: YearMonth) -> Option<NaiveDate> {
    ym.day(ym.last_day())
}

/// Last Monday-Friday of the month.
#[must_use]
pub fn last_weekday_of_month(ym: YearMonth) -> Option<NaiveDate> {
    let mut date = last_day_of_month(ym)?;
    while is_weekend(date) {
        date = date.pred_opt()?;
    }
    Some(date)
}

/// The `n`th (1-based) `weekday` of the month, or `None` if the month has
/// fewer than `n` of them.
#[must_use]
pub fn nth_weekday_of_month(ym: YearMonth, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    if n == 0 {
        return None;
    }
    NaiveDate::from_weekday_of_month_opt(ym.year, ym.month, weekday.to_chrono(), u8::try_from(n).ok()?)
}

/// Last occurrence of `weekday` in the month.
#[must_use]
pub fn last_weekday_in_month(ym: YearMonth, weekday: Weekday) -> Option<NaiveDate> {
    let last = last_day_of_month(ym)?;
    let back = (7 + last.weekday().num_days_from_monday() - weekday.to_chrono().num_days_from_monday()) % 7;
    last.checked_sub_days(Days::new(u64::from(back)))
}

#[must_use]
pub fn ordinal_weekday(ym: YearMonth, ordinal: OrdinalPosition, weekday: Weekday) -> Option<NaiveDate> {
    match ordinal.nth() {
        Some(n) => nth_weekday_of_month(ym, weekday, n),
        None => last_weekday_in_month(ym, weekday),
    }
}

/// Weekday nearest to `day` of the month.
///
/// Without a direction the result stays inside the month: Saturday moves back
/// to Friday unless `day` is the 1st, Sunday moves forward to Monday unless
/// `day` is the month's last day. With a direction the shift always goes that
/// way and may leave the month. `None` when the month has no such day.
#[must_use]
pub fn nearest_weekday(
    ym: YearMonth,
    day: u32,
    direction: Option<NearestDirection>,
) -> Option<NaiveDate> {
    let last = ym.last_day();
    if day > last {
        return None;
    }
    let date = ym.day(day)?;

    let shift_back = |n: u64| date.checked_sub_days(Days::new(n));
    let shift_fwd = |n: u64| date.checked_add_days(Days::new(n));

    match (date.weekday(), direction) {
        (ChronoWeekday::Sat, None) if day == 1 => shift_fwd(2),
        (ChronoWeekday::Sat, None | Some(NearestDirection::Previous)) => shift_back(1),
        (ChronoWeekday::Sat, Some(NearestDirection::Next)) => shift_fwd(2),
        (ChronoWeekday::Sun, None) if day >= last => shift_back(2),
        (ChronoWeekday::Sun, None | Some(NearestDirection::Next)) => shift_fwd(1),
        (ChronoWeekday::Sun, Some(NearestDirection::Previous)) => shift_back(2),
        _ => Some(date),
    }
}

/// Dates a month target selects in the given month, ascending.
#[must_use]
pub fn month_target_dates(ym: YearMonth, target: &MonthTarget) -> Vec<NaiveDate> {
    match target {
        MonthTarget::Days(_) => target
            .expand_days()
            .into_iter()
            .filter_map(|day| ym.day(day))
            .collect(),
        MonthTarget::LastDay => last_day_of_month(ym).into_iter().collect(),
        MonthTarget::LastWeekday => last_weekday_of_month(ym).into_iter().collect(),
        MonthTarget::NearestWeekday { day, direction } => {
            nearest_weekday(ym, *day, *direction).into_iter().collect()
        }
        MonthTarget::OrdinalWeekday { ordinal, weekday } => {
            ordinal_weekday(ym, *ordinal, *weekday).into_iter().collect()
        }
    }
}

/// The date a year target selects in `year`, if it exists that year.
#[must_use]
pub fn year_target_date(year: i32, target: &YearTarget) -> Option<NaiveDate> {
    match *target {
        YearTarget::Date { month, day } | YearTarget::DayOfMonth { day, month } => {
            NaiveDate::from_ymd_opt(year, month.number(), day)
        }
        YearTarget::OrdinalWeekday {
            ordinal,
            weekday,
            month,
        } => ordinal_weekday(month_of(year, month), ordinal, weekday),
        YearTarget::LastWeekday { month } => last_weekday_of_month(month_of(year, month)),
    }
}

const fn month_of(year: i32, month: MonthName) -> YearMonth {
    YearMonth {
        year,
        month: month.number(),
    }
}

#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), ChronoWeekday::Sat | ChronoWeekday::Sun)
}

#[must_use]
pub fn weekday_of(date: NaiveDate) -> Weekday {
    Weekday::from_chrono(date.weekday())
}

/// Monday of the ISO week containing `date`.
#[must_use]
pub fn monday_of(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
}

/// Signed day count from `from` to `to`.
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.num_days_from_ce()) - i64::from(from.num_days_from_ce())
}

/// Moves `date` by a signed number of days.
#[must_use]
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}

/// Day-interval alignment anchor as a day number; 1970-01-01 by default.
#[must_use]
pub fn day_anchor(anchor: Option<NaiveDate>) -> i32 {
    anchor.map_or(EPOCH_DAYS_FROM_CE, |a| a.num_days_from_ce())
}

/// Monday starting the anchor's week as a day number; 1970-01-05 by default.
#[must_use]
pub fn week_anchor(anchor: Option<NaiveDate>) -> i32 {
    anchor.map_or(EPOCH_MONDAY_DAYS_FROM_CE, |a| {
        let back = i32::try_from(a.weekday().num_days_from_monday()).unwrap_or(0);
        a.num_days_from_ce() - back
    })
}

/// Month-interval alignment anchor; January 1970 by default.
#[must_use]
pub fn month_anchor(anchor: Option<NaiveDate>) -> YearMonth {
    anchor.map_or(
        YearMonth {
            year: EPOCH_YEAR,
            month: 1,
        },
        YearMonth::of,
    )
}

/// Year-interval alignment anchor; 1970 by default.
#[must_use]
pub fn year_anchor(anchor: Option<NaiveDate>) -> i32 {
    anchor.map_or(EPOCH_YEAR, |a| a.year())
}

/// Whether `offset` is a multiple of `interval`. Euclidean, so offsets before
/// the anchor align the same way as offsets after it.
#[must_use]
pub fn is_aligned(offset: i64, interval: u32) -> bool {
    offset.rem_euclid(i64::from(interval.max(1))) == 0
}

#[must_use]
pub fn matches_during(date: NaiveDate, during: &[MonthName]) -> bool {
    during.is_empty() || during.iter().any(|m| m.number() == date.month())
}

/// First day of the next month (after `date`'s) listed in `during`.
#[must_use]
pub fn next_during_month(date: NaiveDate, during: &[MonthName]) -> Option<NaiveDate> {
    let mut ym = YearMonth::of(date);
    for _ in 0..12 {
        ym = ym.next();
        if during.iter().any(|m| m.number() == ym.month) {
            return ym.day(1);
        }
    }
    None
}

/// Last day of the closest earlier month listed in `during`.
#[must_use]
pub fn prev_during_month(date: NaiveDate, during: &[MonthName]) -> Option<NaiveDate> {
    let mut ym = YearMonth::of(date);
    for _ in 0..12 {
        ym = ym.prev();
        if during.iter().any(|m| m.number() == ym.month) {
            return last_day_of_month(ym);
        }
    }
    date.pred_opt()
}

#[must_use]
pub fn is_excepted(date: NaiveDate, except: &[Exception]) -> bool {
    except.iter().any(|e| e.excludes(date))
}

/// Concrete last date an `until` clause allows, relative to `reference`.
///
/// A named date resolves to its next occurrence on or after `reference`,
/// skipping years where it does not exist (feb 29).
#[must_use]
pub fn resolve_until(until: UntilSpec, reference: NaiveDate) -> Option<NaiveDate> {
    match until {
        UntilSpec::Iso(date) => Some(date),
        UntilSpec::Named { month, day } => {
            let year = reference.year();
            (year..=year + YEAR_LOOKAHEAD)
                .filter_map(|y| NaiveDate::from_ymd_opt(y, month.number(), day))
                .find(|d| *d >= reference)
        }
    }
}

/// Feb 29 recurs at least once every 8 years.
const YEAR_LOOKAHEAD: i32 = 8;
