//! Schedules: the data model and the operations over it.
//!
//! ## Submodules
//!
//! - [`core`] - Expression tree, modifier clauses, and closed vocabularies
//! - [`parse`] - Lexer and recursive-descent parser
//! - [`build`] - Canonical text rendering

pub mod build;
pub mod core;
pub mod parse;

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use self::core::Schedule;
use crate::error::{ScheduleError, ScheduleResult};
use crate::eval::{self, BoundedOccurrences, Occurrences};

impl Schedule {
    /// ## Summary
    /// Parses an expression.
    ///
    /// ## Errors
    ///
    /// Returns a lex or parse error with the offending span.
    pub fn parse(input: &str) -> ScheduleResult<Self> {
        parse::parse(input)
    }

    /// Whether `input` parses.
    #[must_use]
    pub fn validate(input: &str) -> bool {
        parse::parse(input).is_ok()
    }

    /// ## Summary
    /// Converts a 5-field cron expression (or `@` shortcut).
    ///
    /// ## Errors
    ///
    /// Returns a cron error for malformed or unsupported fields.
    pub fn from_cron(cron: &str) -> ScheduleResult<Self> {
        crate::cron::from_cron(cron)
    }

    /// ## Summary
    /// Renders the schedule as 5-field cron.
    ///
    /// ## Errors
    ///
    /// Returns a cron error naming the first construct cron cannot express.
    pub fn to_cron(&self) -> ScheduleResult<String> {
        crate::cron::to_cron(self)
    }

    /// IANA zone name the schedule evaluates in, if one was given.
    #[must_use]
    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    /// A copy of this schedule aligned to a different `starting` date.
    #[must_use]
    pub fn with_anchor(&self, anchor: NaiveDate) -> Self {
        Self {
            anchor: Some(anchor),
            ..self.clone()
        }
    }

    /// ## Summary
    /// The first occurrence strictly after `now`.
    ///
    /// ## Errors
    ///
    /// Returns an eval error if the timezone is unknown.
    pub fn next_from<Z: TimeZone>(&self, now: &DateTime<Z>) -> ScheduleResult<Option<DateTime<Tz>>> {
        eval::next_from(self, now)
    }

    /// ## Summary
    /// Up to `n` consecutive occurrences strictly after `now`.
    ///
    /// ## Errors
    ///
    /// Returns an eval error if the timezone is unknown.
    pub fn next_n_from<Z: TimeZone>(
        &self,
        now: &DateTime<Z>,
        n: usize,
    ) -> ScheduleResult<Vec<DateTime<Tz>>> {
        eval::next_n_from(self, now, n)
    }

    /// ## Summary
    /// The latest occurrence strictly before `now`.
    ///
    /// ## Errors
    ///
    /// Returns an eval error if the timezone is unknown.
    pub fn previous_from<Z: TimeZone>(
        &self,
        now: &DateTime<Z>,
    ) -> ScheduleResult<Option<DateTime<Tz>>> {
        eval::previous_from(self, now)
    }

    /// ## Summary
    /// Whether the schedule fires at `dt`.
    ///
    /// ## Errors
    ///
    /// Returns an eval error if the timezone is unknown.
    pub fn matches<Z: TimeZone>(&self, dt: &DateTime<Z>) -> ScheduleResult<bool> {
        eval::matches(self, dt)
    }

    /// ## Summary
    /// Lazy occurrences strictly after `from`.
    ///
    /// ## Errors
    ///
    /// Returns an eval error if the timezone is unknown.
    pub fn occurrences<Z: TimeZone>(&self, from: &DateTime<Z>) -> ScheduleResult<Occurrences<'_>> {
        eval::occurrences(self, from)
    }

    /// ## Summary
    /// Occurrences in `(from, to]`.
    ///
    /// ## Errors
    ///
    /// Returns an eval error if the timezone is unknown.
    pub fn between<Z: TimeZone, Y: TimeZone>(
        &self,
        from: &DateTime<Z>,
        to: &DateTime<Y>,
    ) -> ScheduleResult<BoundedOccurrences<'_>> {
        eval::between(self, from, to)
    }
}

impl FromStr for Schedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse(s)
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse::parse(&text).map_err(serde::de::Error::custom)
    }
}
