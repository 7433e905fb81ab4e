//! Canonical text rendering.

use std::fmt;

use crate::schedule::core::{
    DateSpec, DayFilter, DayOfMonthSpec, Exception, MonthTarget, Schedule, ScheduleExpr,
    TimeOfDay, UntilSpec, Weekday, YearTarget,
};
use crate::schedule::parse::ordinal_suffix;

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;

        // Clause order matches the grammar.
        if !self.except.is_empty() {
            f.write_str(" except ")?;
            write_list(f, &self.except)?;
        }

        if let Some(until) = &self.until {
            write!(f, " until {until}")?;
        }

        if let Some(anchor) = &self.anchor {
            write!(f, " starting {}", anchor.format("%Y-%m-%d"))?;
        }

        if !self.during.is_empty() {
            f.write_str(" during ")?;
            write_list(f, &self.during)?;
        }

        if let Some(tz) = &self.timezone {
            write!(f, " in {tz}")?;
        }

        Ok(())
    }
}

impl fmt::Display for ScheduleExpr {
    #[expect(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntervalRepeat {
                interval,
                unit,
                from,
                to,
                day_filter,
            } => {
                write!(
                    f,
                    "every {interval} {} from {from} to {to}",
                    unit.display_for(*interval)
                )?;
                if let Some(filter) = day_filter {
                    write!(f, " on {filter}")?;
                }
                Ok(())
            }
            Self::DayRepeat {
                interval,
                days,
                times,
            } => {
                if *interval > 1 {
                    write!(f, "every {interval} days at ")?;
                } else {
                    write!(f, "every {days} at ")?;
                }
                write_time_list(f, times)
            }
            Self::WeekRepeat {
                interval,
                days,
                times,
            } => {
                write!(f, "every {interval} weeks on ")?;
                write_list(f, days)?;
                f.write_str(" at ")?;
                write_time_list(f, times)
            }
            Self::MonthRepeat {
                interval,
                target,
                times,
            } => {
                if *interval > 1 {
                    write!(f, "every {interval} months on the {target} at ")?;
                } else {
                    write!(f, "every month on the {target} at ")?;
                }
                write_time_list(f, times)
            }
            Self::OrdinalRepeat {
                interval,
                ordinal,
                weekday,
                times,
            } => {
                if *interval > 1 {
                    write!(f, "{ordinal} {weekday} of every {interval} months at ")?;
                } else {
                    write!(f, "{ordinal} {weekday} of every month at ")?;
                }
                write_time_list(f, times)
            }
            Self::SingleDate { date, times } => {
                write!(f, "on {date} at ")?;
                write_time_list(f, times)
            }
            Self::YearRepeat {
                interval,
                target,
                times,
            } => {
                if *interval > 1 {
                    write!(f, "every {interval} years on {target} at ")?;
                } else {
                    write!(f, "every year on {target} at ")?;
                }
                write_time_list(f, times)
            }
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Every => f.write_str("day"),
            Self::Weekday => f.write_str("weekday"),
            Self::Weekend => f.write_str("weekend"),
            Self::Days(days) => write_list(f, days),
        }
    }
}

impl fmt::Display for DayOfMonthSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Single(day) => write_ordinal(f, day),
            Self::Range(start, end) => {
                write_ordinal(f, start)?;
                f.write_str(" to ")?;
                write_ordinal(f, end)
            }
        }
    }
}

impl fmt::Display for MonthTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(specs) => write_list(f, specs),
            Self::LastDay => f.write_str("last day"),
            Self::LastWeekday => f.write_str("last weekday"),
            Self::NearestWeekday { day, direction } => {
                if let Some(direction) = direction {
                    write!(f, "{} ", direction.as_str())?;
                }
                f.write_str("nearest weekday to ")?;
                write_ordinal(f, *day)
            }
            Self::OrdinalWeekday { ordinal, weekday } => write!(f, "{ordinal} {weekday}"),
        }
    }
}

impl fmt::Display for YearTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date { month, day } => write!(f, "{month} {day}"),
            Self::OrdinalWeekday {
                ordinal,
                weekday,
                month,
            } => write!(f, "the {ordinal} {weekday} of {month}"),
            Self::DayOfMonth { day, month } => {
                f.write_str("the ")?;
                write_ordinal(f, *day)?;
                write!(f, " of {month}")
            }
            Self::LastWeekday { month } => write!(f, "the last weekday of {month}"),
        }
    }
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { month, day } => write!(f, "{month} {day}"),
            Self::Iso(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { month, day } => write!(f, "{month} {day}"),
            Self::Iso(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl fmt::Display for UntilSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iso(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Named { month, day } => write!(f, "{month} {day}"),
        }
    }
}

/// Writes `n` with its English ordinal suffix (`1st`, `22nd`, `13th`).
///
/// ## Errors
///
/// Propagates formatter errors.
pub fn write_ordinal(f: &mut impl fmt::Write, n: u32) -> fmt::Result {
    write!(f, "{n}{}", ordinal_suffix(n))
}

/// Writes times as a comma-separated `HH:MM` list.
///
/// ## Errors
///
/// Propagates formatter errors.
pub fn write_time_list(f: &mut impl fmt::Write, times: &[TimeOfDay]) -> fmt::Result {
    write_list(f, times)
}

fn write_list<T: fmt::Display>(f: &mut impl fmt::Write, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
