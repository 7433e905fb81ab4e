//! The schedule expression tree and its modifier clauses.

use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta};

use super::names::{IntervalUnit, MonthName, NearestDirection, OrdinalPosition, Weekday};

/// Wall-clock time of day, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };
    pub const END_OF_DAY: Self = Self {
        hour: 23,
        minute: 59,
    };

    #[must_use]
    pub const fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    #[must_use]
    pub const fn minutes_since_midnight(self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Inverse of [`Self::minutes_since_midnight`] for values inside one day.
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Self {
        Self {
            hour: minutes / 60,
            minute: minutes % 60,
        }
    }

    #[must_use]
    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::MIN + TimeDelta::minutes(i64::from(self.minutes_since_midnight()))
    }
}

/// Which days a daily or windowed repeat fires on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DayFilter {
    Every,
    Weekday,
    Weekend,
    Days(Vec<Weekday>),
}

impl DayFilter {
    #[must_use]
    pub fn matches(&self, day: Weekday) -> bool {
        match self {
            Self::Every => true,
            Self::Weekday => !day.is_weekend(),
            Self::Weekend => day.is_weekend(),
            Self::Days(days) => days.contains(&day),
        }
    }

    /// Collapses a day list that names exactly Monday..Friday or Saturday and
    /// Sunday into the matching shorthand. Other lists keep their order.
    #[must_use]
    pub fn from_days(days: Vec<Weekday>) -> Self {
        let mut sorted = days.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted == Weekday::business_days() {
            Self::Weekday
        } else if sorted == [Weekday::Saturday, Weekday::Sunday] {
            Self::Weekend
        } else {
            Self::Days(days)
        }
    }
}

/// One entry in an ordinal day-of-month list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayOfMonthSpec {
    Single(u32),
    Range(u32, u32),
}

impl DayOfMonthSpec {
    /// Every day covered by this entry, ascending.
    #[must_use]
    pub fn expand(self) -> Vec<u32> {
        match self {
            Self::Single(d) => vec![d],
            Self::Range(start, end) => (start..=end).collect(),
        }
    }
}

/// What a monthly repeat fires on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MonthTarget {
    Days(Vec<DayOfMonthSpec>),
    LastDay,
    LastWeekday,
    NearestWeekday {
        day: u32,
        direction: Option<NearestDirection>,
    },
    OrdinalWeekday {
        ordinal: OrdinalPosition,
        weekday: Weekday,
    },
}

impl MonthTarget {
    /// Sorted, de-duplicated days of month for a `Days` target; empty otherwise.
    #[must_use]
    pub fn expand_days(&self) -> Vec<u32> {
        let Self::Days(specs) = self else {
            return Vec::new();
        };
        let mut days: Vec<u32> = specs.iter().flat_map(|spec| spec.expand()).collect();
        days.sort_unstable();
        days.dedup();
        days
    }
}

/// What a yearly repeat fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearTarget {
    /// `dec 25`
    Date { month: MonthName, day: u32 },
    /// `the first monday of march`
    OrdinalWeekday {
        ordinal: OrdinalPosition,
        weekday: Weekday,
        month: MonthName,
    },
    /// `the 15th of march`
    DayOfMonth { day: u32, month: MonthName },
    /// `the last weekday of december`
    LastWeekday { month: MonthName },
}

/// Date of a one-off schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateSpec {
    Named { month: MonthName, day: u32 },
    Iso(NaiveDate),
}

/// A date excluded by an `except` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exception {
    /// Recurs every year.
    Named { month: MonthName, day: u32 },
    Iso(NaiveDate),
}

impl Exception {
    #[must_use]
    pub fn excludes(self, date: NaiveDate) -> bool {
        match self {
            Self::Named { month, day } => date.month() == month.number() && date.day() == day,
            Self::Iso(d) => d == date,
        }
    }
}

/// Last date (inclusive) an `until` clause allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UntilSpec {
    Iso(NaiveDate),
    /// Resolved against the evaluation reference date.
    Named { month: MonthName, day: u32 },
}

/// The recurrence shape. Exactly one variant is active per schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScheduleExpr {
    /// `every 30 min from 09:00 to 17:00 [on weekday]`
    IntervalRepeat {
        interval: u32,
        unit: IntervalUnit,
        from: TimeOfDay,
        to: TimeOfDay,
        day_filter: Option<DayFilter>,
    },
    /// `every day at 09:00`, `every 3 days at 09:00`, `every weekday at 09:00`
    DayRepeat {
        interval: u32,
        days: DayFilter,
        times: Vec<TimeOfDay>,
    },
    /// `every 2 weeks on monday, friday at 09:00`
    WeekRepeat {
        interval: u32,
        days: Vec<Weekday>,
        times: Vec<TimeOfDay>,
    },
    /// `every month on the 1st, 15th at 09:00`
    MonthRepeat {
        interval: u32,
        target: MonthTarget,
        times: Vec<TimeOfDay>,
    },
    /// `first monday of every month at 09:00`
    OrdinalRepeat {
        interval: u32,
        ordinal: OrdinalPosition,
        weekday: Weekday,
        times: Vec<TimeOfDay>,
    },
    /// `on feb 14 at 09:00`, `on 2026-03-15 at 14:30`
    SingleDate {
        date: DateSpec,
        times: Vec<TimeOfDay>,
    },
    /// `every year on dec 25 at 00:00`
    YearRepeat {
        interval: u32,
        target: YearTarget,
        times: Vec<TimeOfDay>,
    },
}

/// A parsed schedule: the expression plus its modifier clauses.
///
/// Built once by the parser (or the cron bridge) and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schedule {
    pub expr: ScheduleExpr,
    /// IANA zone name; `None` evaluates in UTC.
    pub timezone: Option<String>,
    pub except: Vec<Exception>,
    pub until: Option<UntilSpec>,
    /// `starting` date used for interval alignment.
    pub anchor: Option<NaiveDate>,
    /// Months the schedule is restricted to; empty allows all.
    pub during: Vec<MonthName>,
}

impl Schedule {
    /// Wraps an expression with no modifier clauses.
    #[must_use]
    pub const fn new(expr: ScheduleExpr) -> Self {
        Self {
            expr,
            timezone: None,
            except: Vec::new(),
            until: None,
            anchor: None,
            during: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_minutes_round_trip() {
        let t = TimeOfDay::new(17, 45);
        assert_eq!(t.minutes_since_midnight(), 1065);
        assert_eq!(TimeOfDay::from_minutes(1065), t);
        assert_eq!(
            t.to_naive_time(),
            NaiveTime::from_hms_opt(17, 45, 0).expect("valid time")
        );
    }

    #[test]
    fn test_expand_days_sorts_and_dedups() {
        let target = MonthTarget::Days(vec![
            DayOfMonthSpec::Single(20),
            DayOfMonthSpec::Range(1, 3),
            DayOfMonthSpec::Single(2),
        ]);
        assert_eq!(target.expand_days(), vec![1, 2, 3, 20]);
        assert!(MonthTarget::LastDay.expand_days().is_empty());
    }

    #[test]
    fn test_day_filter_matches() {
        assert!(DayFilter::Weekday.matches(Weekday::Friday));
        assert!(!DayFilter::Weekday.matches(Weekday::Sunday));
        assert!(DayFilter::Weekend.matches(Weekday::Saturday));
        assert!(DayFilter::Days(vec![Weekday::Tuesday]).matches(Weekday::Tuesday));
    }

    #[test]
    fn test_named_exception_recurs_yearly() {
        let exc = Exception::Named {
            month: MonthName::December,
            day: 25,
        };
        let d = NaiveDate::from_ymd_opt(2031, 12, 25).expect("valid date");
        assert!(exc.excludes(d));
        assert!(!exc.excludes(d.pred_opt().expect("valid date")));
    }
}
