//! Token kinds and the static keyword table.

use std::fmt;

use crate::error::Span;
use crate::schedule::core::{IntervalUnit, MonthName, OrdinalPosition, TimeOfDay, Weekday};

/// Lexical category of a token, with its payload for value-carrying kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Every,
    On,
    At,
    From,
    To,
    In,
    Of,
    The,
    Last,
    Except,
    Until,
    Starting,
    During,
    Next,
    Previous,
    Nearest,
    Year,
    Day,
    Weekday,
    Weekend,
    Weeks,
    Month,
    DayName(Weekday),
    MonthName(MonthName),
    /// `first` through `fifth`; `last` is its own keyword.
    Ordinal(OrdinalPosition),
    IntervalUnit(IntervalUnit),
    Number(u32),
    /// `1st`, `22nd`, ...
    OrdinalNumber(u32),
    Time(TimeOfDay),
    /// `YYYY-MM-DD`, shape-checked only.
    IsoDate(String),
    /// Raw zone name following `in`.
    Timezone(String),
    Comma,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Every => f.write_str("'every'"),
            Self::On => f.write_str("'on'"),
            Self::At => f.write_str("'at'"),
            Self::From => f.write_str("'from'"),
            Self::To => f.write_str("'to'"),
            Self::In => f.write_str("'in'"),
            Self::Of => f.write_str("'of'"),
            Self::The => f.write_str("'the'"),
            Self::Last => f.write_str("'last'"),
            Self::Except => f.write_str("'except'"),
            Self::Until => f.write_str("'until'"),
            Self::Starting => f.write_str("'starting'"),
            Self::During => f.write_str("'during'"),
            Self::Next => f.write_str("'next'"),
            Self::Previous => f.write_str("'previous'"),
            Self::Nearest => f.write_str("'nearest'"),
            Self::Year => f.write_str("'year'"),
            Self::Day => f.write_str("'day'"),
            Self::Weekday => f.write_str("'weekday'"),
            Self::Weekend => f.write_str("'weekend'"),
            Self::Weeks => f.write_str("'weeks'"),
            Self::Month => f.write_str("'month'"),
            Self::DayName(d) => write!(f, "'{d}'"),
            Self::MonthName(m) => write!(f, "'{m}'"),
            Self::Ordinal(o) => write!(f, "'{o}'"),
            Self::IntervalUnit(u) => write!(f, "'{u}'"),
            Self::Number(n) => write!(f, "'{n}'"),
            Self::OrdinalNumber(n) => write!(f, "'{n}{}'", ordinal_suffix(*n)),
            Self::Time(t) => write!(f, "'{:02}:{:02}'", t.hour, t.minute),
            Self::IsoDate(d) => write!(f, "'{d}'"),
            Self::Timezone(tz) => write!(f, "'{tz}'"),
            Self::Comma => f.write_str("','"),
        }
    }
}

/// A token and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Every spelling the lexer accepts, used to suggest a fix for unknown words.
pub const KEYWORDS: &[&str] = &[
    "every", "on", "at", "from", "to", "in", "of", "the", "last", "except", "until",
    "starting", "during", "next", "previous", "nearest", "year", "years", "day", "days",
    "weekday", "weekdays", "weekend", "weekends", "week", "weeks", "month", "months",
    "monday", "mon", "tuesday", "tue", "wednesday", "wed", "thursday", "thu", "friday", "fri",
    "saturday", "sat", "sunday", "sun", "january", "jan", "february", "feb", "march", "mar",
    "april", "apr", "may", "june", "jun", "july", "jul", "august", "aug", "september", "sep",
    "october", "oct", "november", "nov", "december", "dec", "first", "second", "third",
    "fourth", "fifth", "min", "mins", "minute", "minutes", "hour", "hours", "hr", "hrs",
];

/// Looks up a lowercased word in the keyword table.
#[must_use]
pub fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "every" => TokenKind::Every,
        "on" => TokenKind::On,
        "at" => TokenKind::At,
        "from" => TokenKind::From,
        "to" => TokenKind::To,
        "in" => TokenKind::In,
        "of" => TokenKind::Of,
        "the" => TokenKind::The,
        "last" => TokenKind::Last,
        "except" => TokenKind::Except,
        "until" => TokenKind::Until,
        "starting" => TokenKind::Starting,
        "during" => TokenKind::During,
        "next" => TokenKind::Next,
        "previous" => TokenKind::Previous,
        "nearest" => TokenKind::Nearest,
        "year" | "years" => TokenKind::Year,
        "day" | "days" => TokenKind::Day,
        "weekday" | "weekdays" => TokenKind::Weekday,
        "weekend" | "weekends" => TokenKind::Weekend,
        "week" | "weeks" => TokenKind::Weeks,
        "month" | "months" => TokenKind::Month,
        "first" => TokenKind::Ordinal(OrdinalPosition::First),
        "second" => TokenKind::Ordinal(OrdinalPosition::Second),
        "third" => TokenKind::Ordinal(OrdinalPosition::Third),
        "fourth" => TokenKind::Ordinal(OrdinalPosition::Fourth),
        "fifth" => TokenKind::Ordinal(OrdinalPosition::Fifth),
        "min" | "mins" | "minute" | "minutes" => TokenKind::IntervalUnit(IntervalUnit::Minutes),
        "hour" | "hours" | "hr" | "hrs" => TokenKind::IntervalUnit(IntervalUnit::Hours),
        other => {
            if let Some(day) = Weekday::parse(other) {
                TokenKind::DayName(day)
            } else {
                TokenKind::MonthName(MonthName::parse(other)?)
            }
        }
    };
    Some(kind)
}

/// Closest keyword within edit distance 2, if any.
#[must_use]
pub fn suggest_keyword(word: &str) -> Option<&'static str> {
    KEYWORDS
        .iter()
        .map(|kw| (edit_distance(word, kw), *kw))
        .filter(|(dist, _)| *dist <= 2)
        .min_by_key(|(dist, _)| *dist)
        .map(|(_, kw)| kw)
}

/// Levenshtein distance over bytes (keywords are ASCII).
fn edit_distance(a: &str, b: &str) -> usize {
    let b = b.as_bytes();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];
    for (i, ca) in a.bytes().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            cur[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// English ordinal suffix: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st, ...
#[must_use]
pub const fn ordinal_suffix(n: u32) -> &'static str {
    match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}
