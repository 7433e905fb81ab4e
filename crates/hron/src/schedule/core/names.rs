//! Closed vocabularies: weekdays, months, ordinal positions, interval units.

use std::fmt;

/// Day of the week, ISO ordering (Monday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Three-letter abbreviation.
    #[must_use]
    pub const fn short(self) -> &'static str {
        match self {
            Self::Monday => "mon",
            Self::Tuesday => "tue",
            Self::Wednesday => "wed",
            Self::Thursday => "thu",
            Self::Friday => "fri",
            Self::Saturday => "sat",
            Self::Sunday => "sun",
        }
    }

    /// Parses a full or three-letter name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.to_ascii_lowercase();
        Self::all()
            .into_iter()
            .find(|d| d.as_str() == lower || d.short() == lower)
    }

    /// ISO 8601 number: Monday = 1 … Sunday = 7.
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
            Self::Sunday => 7,
        }
    }

    #[must_use]
    pub const fn from_number(n: u32) -> Option<Self> {
        Some(match n {
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            6 => Self::Saturday,
            7 => Self::Sunday,
            _ => return None,
        })
    }

    /// Cron day-of-week number: Sunday = 0 … Saturday = 6.
    #[must_use]
    pub const fn cron_number(self) -> u32 {
        self.number() % 7
    }

    #[must_use]
    pub const fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }

    /// All weekdays, Monday through Sunday.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }

    /// Monday through Friday.
    #[must_use]
    pub const fn business_days() -> [Self; 5] {
        [
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
        ]
    }

    #[must_use]
    pub const fn to_chrono(self) -> chrono::Weekday {
        match self {
            Self::Monday => chrono::Weekday::Mon,
            Self::Tuesday => chrono::Weekday::Tue,
            Self::Wednesday => chrono::Weekday::Wed,
            Self::Thursday => chrono::Weekday::Thu,
            Self::Friday => chrono::Weekday::Fri,
            Self::Saturday => chrono::Weekday::Sat,
            Self::Sunday => chrono::Weekday::Sun,
        }
    }

    #[must_use]
    pub const fn from_chrono(wd: chrono::Weekday) -> Self {
        match wd {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MonthName {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl MonthName {
    /// Canonical three-letter lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::January => "jan",
            Self::February => "feb",
            Self::March => "mar",
            Self::April => "apr",
            Self::May => "may",
            Self::June => "jun",
            Self::July => "jul",
            Self::August => "aug",
            Self::September => "sep",
            Self::October => "oct",
            Self::November => "nov",
            Self::December => "dec",
        }
    }

    #[must_use]
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::January => "january",
            Self::February => "february",
            Self::March => "march",
            Self::April => "april",
            Self::May => "may",
            Self::June => "june",
            Self::July => "july",
            Self::August => "august",
            Self::September => "september",
            Self::October => "october",
            Self::November => "november",
            Self::December => "december",
        }
    }

    /// Parses a full or three-letter name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.to_ascii_lowercase();
        Self::all()
            .into_iter()
            .find(|m| m.as_str() == lower || m.full_name() == lower)
    }

    /// 1 = January … 12 = December.
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::January => 1,
            Self::February => 2,
            Self::March => 3,
            Self::April => 4,
            Self::May => 5,
            Self::June => 6,
            Self::July => 7,
            Self::August => 8,
            Self::September => 9,
            Self::October => 10,
            Self::November => 11,
            Self::December => 12,
        }
    }

    #[must_use]
    pub const fn from_number(n: u32) -> Option<Self> {
        Some(match n {
            1 => Self::January,
            2 => Self::February,
            3 => Self::March,
            4 => Self::April,
            5 => Self::May,
            6 => Self::June,
            7 => Self::July,
            8 => Self::August,
            9 => Self::September,
            10 => Self::October,
            11 => Self::November,
            12 => Self::December,
            _ => return None,
        })
    }

    /// Longest the month can be in any year (February counts 29).
    #[must_use]
    pub const fn max_days(self) -> u32 {
        match self {
            Self::February => 29,
            Self::April | Self::June | Self::September | Self::November => 30,
            _ => 31,
        }
    }

    #[must_use]
    pub const fn all() -> [Self; 12] {
        [
            Self::January,
            Self::February,
            Self::March,
            Self::April,
            Self::May,
            Self::June,
            Self::July,
            Self::August,
            Self::September,
            Self::October,
            Self::November,
            Self::December,
        ]
    }
}

impl fmt::Display for MonthName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which occurrence of a weekday within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrdinalPosition {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Last,
}

impl OrdinalPosition {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::Fourth => "fourth",
            Self::Fifth => "fifth",
            Self::Last => "last",
        }
    }

    /// 1-based position, or `None` for `Last`.
    #[must_use]
    pub const fn nth(self) -> Option<u32> {
        match self {
            Self::First => Some(1),
            Self::Second => Some(2),
            Self::Third => Some(3),
            Self::Fourth => Some(4),
            Self::Fifth => Some(5),
            Self::Last => None,
        }
    }

    #[must_use]
    pub const fn from_nth(n: u32) -> Option<Self> {
        Some(match n {
            1 => Self::First,
            2 => Self::Second,
            3 => Self::Third,
            4 => Self::Fourth,
            5 => Self::Fifth,
            _ => return None,
        })
    }
}

impl fmt::Display for OrdinalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step unit for windowed interval repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalUnit {
    Minutes,
    Hours,
}

impl IntervalUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minutes => "min",
            Self::Hours => "hours",
        }
    }

    /// Spelling used when rendering `every {interval} {unit}`.
    #[must_use]
    pub const fn display_for(self, interval: u32) -> &'static str {
        match (self, interval) {
            (Self::Minutes, 1) => "minute",
            (Self::Minutes, _) => "min",
            (Self::Hours, 1) => "hour",
            (Self::Hours, _) => "hours",
        }
    }

    /// Step length in minutes for the given interval.
    #[must_use]
    pub const fn step_minutes(self, interval: u32) -> u32 {
        match self {
            Self::Minutes => interval,
            Self::Hours => interval.saturating_mul(60),
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tie-break direction for nearest-weekday targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NearestDirection {
    Next,
    Previous,
}

impl NearestDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_parse_accepts_short_and_full() {
        assert_eq!(Weekday::parse("Mon"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse("sunday"), Some(Weekday::Sunday));
        assert_eq!(Weekday::parse("mo"), None);
    }

    #[test]
    fn test_weekday_numbering() {
        assert_eq!(Weekday::Monday.number(), 1);
        assert_eq!(Weekday::Sunday.number(), 7);
        assert_eq!(Weekday::Sunday.cron_number(), 0);
        assert_eq!(Weekday::Saturday.cron_number(), 6);
        for wd in Weekday::all() {
            assert_eq!(Weekday::from_number(wd.number()), Some(wd));
            assert_eq!(Weekday::from_chrono(wd.to_chrono()), wd);
        }
    }

    #[test]
    fn test_month_parse_and_number() {
        assert_eq!(MonthName::parse("September"), Some(MonthName::September));
        assert_eq!(MonthName::parse("sep"), Some(MonthName::September));
        assert_eq!(MonthName::parse("sept"), None);
        assert_eq!(MonthName::December.number(), 12);
        assert_eq!(MonthName::from_number(0), None);
    }

    #[test]
    fn test_month_max_days() {
        assert_eq!(MonthName::February.max_days(), 29);
        assert_eq!(MonthName::April.max_days(), 30);
        assert_eq!(MonthName::December.max_days(), 31);
    }

    #[test]
    fn test_interval_unit_display() {
        assert_eq!(IntervalUnit::Minutes.display_for(1), "minute");
        assert_eq!(IntervalUnit::Minutes.display_for(15), "min");
        assert_eq!(IntervalUnit::Hours.display_for(1), "hour");
        assert_eq!(IntervalUnit::Hours.step_minutes(2), 120);
    }
}
