//! Lazy occurrence iterators.

use std::iter::FusedIterator;

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::schedule::core::Schedule;

/// Occurrences strictly after a start instant, computed on demand.
///
/// Unbounded for repeating schedules without an `until` clause; callers
/// should `take` what they need.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    schedule: &'a Schedule,
    tz: Tz,
    cursor: Option<DateTime<Tz>>,
    until: Option<NaiveDate>,
}

impl<'a> Occurrences<'a> {
    pub(super) const fn new(
        schedule: &'a Schedule,
        tz: Tz,
        from: DateTime<Tz>,
        until: Option<NaiveDate>,
    ) -> Self {
        Self {
            schedule,
            tz,
            cursor: Some(from),
            until,
        }
    }

    /// Zone the yielded instants are expressed in.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }
}

impl Iterator for Occurrences<'_> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.take()?;
        // Every search is strictly after its cursor, so resuming from the hit
        // itself cannot repeat it.
        let hit = super::next_in_zone(self.schedule, self.tz, &cursor, self.until)?;
        self.cursor = Some(hit);
        Some(hit)
    }
}

impl FusedIterator for Occurrences<'_> {}

/// Occurrences in a half-open window `(from, to]`.
#[derive(Debug, Clone)]
pub struct BoundedOccurrences<'a> {
    inner: Occurrences<'a>,
    end: DateTime<Tz>,
}

impl<'a> BoundedOccurrences<'a> {
    pub(super) const fn new(inner: Occurrences<'a>, end: DateTime<Tz>) -> Self {
        Self { inner, end }
    }
}

impl Iterator for BoundedOccurrences<'_> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let hit = self.inner.next()?;
        if hit > self.end {
            self.inner.cursor = None;
            return None;
        }
        Some(hit)
    }
}

impl FusedIterator for BoundedOccurrences<'_> {}
