//! Occurrence evaluation.
//!
//! Every search runs in the schedule's own zone (UTC when none is given) and
//! returns instants in that zone. Each per-variant walk proposes a candidate;
//! the loops here then apply the `until`, `during`, and `except` clauses,
//! moving the cursor past rejected dates and asking again.
//!
//! ## Submodules
//!
//! - [`calendar`] - Civil-date arithmetic and clause helpers
//! - [`timezone`] - Zone resolution and DST-aware local conversion
//! - [`iter`] - Lazy occurrence iterators

pub mod calendar;
mod iter;
mod matches;
mod next;
mod previous;
pub mod timezone;

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone};
use chrono_tz::Tz;

use hron_core::constants::MAX_FILTER_ITERATIONS;

use self::calendar::{
    is_excepted, matches_during, next_during_month, prev_during_month, resolve_until,
};
use crate::error::ScheduleResult;
use crate::schedule::core::{MonthName, Schedule, TimeOfDay};

pub use iter::{BoundedOccurrences, Occurrences};
pub use timezone::{ConversionError, resolve_timezone};

/// Per-evaluation settings shared by the variant walks.
pub(crate) struct Context<'a> {
    tz: Tz,
    anchor: Option<NaiveDate>,
    during: &'a [MonthName],
}

impl<'a> Context<'a> {
    fn new(schedule: &'a Schedule, tz: Tz) -> Self {
        Self {
            tz,
            anchor: schedule.anchor,
            during: &schedule.during,
        }
    }

    fn at(&self, date: NaiveDate, time: TimeOfDay) -> DateTime<Tz> {
        timezone::at_time(self.tz, date, time)
    }

    /// Earliest listed time on `date` strictly after `now`.
    fn earliest_future(
        &self,
        date: NaiveDate,
        times: &[TimeOfDay],
        now: &DateTime<Tz>,
    ) -> Option<DateTime<Tz>> {
        times
            .iter()
            .map(|t| self.at(date, *t))
            .filter(|candidate| candidate > now)
            .min()
    }

    /// Latest listed time on `date` strictly before `now`.
    fn latest_past(
        &self,
        date: NaiveDate,
        times: &[TimeOfDay],
        now: &DateTime<Tz>,
    ) -> Option<DateTime<Tz>> {
        times
            .iter()
            .map(|t| self.at(date, *t))
            .filter(|candidate| candidate < now)
            .max()
    }

    fn latest(&self, date: NaiveDate, times: &[TimeOfDay]) -> Option<DateTime<Tz>> {
        times.iter().max().map(|t| self.at(date, *t))
    }

    fn end_of_day(&self, date: NaiveDate) -> DateTime<Tz> {
        self.at(date, TimeOfDay::END_OF_DAY) + TimeDelta::seconds(1)
    }

    fn before_day(&self, date: NaiveDate) -> DateTime<Tz> {
        self.at(date, TimeOfDay::MIDNIGHT) - TimeDelta::seconds(1)
    }
}

/// ## Summary
/// The first occurrence strictly after `now`, in the schedule's zone.
///
/// ## Errors
///
/// Returns `ScheduleError::Eval` if the schedule names an unknown timezone.
#[tracing::instrument(skip_all, fields(schedule = %schedule))]
pub fn next_from<Z: TimeZone>(
    schedule: &Schedule,
    now: &DateTime<Z>,
) -> ScheduleResult<Option<DateTime<Tz>>> {
    let tz = resolve_timezone(schedule.timezone.as_deref())?;
    let now = now.with_timezone(&tz);
    let until = until_date(schedule, now.date_naive());
    let hit = next_in_zone(schedule, tz, &now, until);
    tracing::trace!(found = hit.is_some(), "Searched forward");
    Ok(hit)
}

/// ## Summary
/// The latest occurrence strictly before `now`, in the schedule's zone.
///
/// Returns `None` once the search reaches a date before the `starting` anchor.
///
/// ## Errors
///
/// Returns `ScheduleError::Eval` if the schedule names an unknown timezone.
#[tracing::instrument(skip_all, fields(schedule = %schedule))]
pub fn previous_from<Z: TimeZone>(
    schedule: &Schedule,
    now: &DateTime<Z>,
) -> ScheduleResult<Option<DateTime<Tz>>> {
    let tz = resolve_timezone(schedule.timezone.as_deref())?;
    let now = now.with_timezone(&tz);
    let ctx = Context::new(schedule, tz);
    let until = until_date(schedule, now.date_naive());

    let mut cursor = now;
    for _ in 0..MAX_FILTER_ITERATIONS {
        let Some(candidate) = previous::prev_expr(&schedule.expr, &ctx, &cursor) else {
            return Ok(None);
        };
        let date = candidate.date_naive();

        if schedule.anchor.is_some_and(|anchor| date < anchor) {
            return Ok(None);
        }

        if let Some(until) = until
            && date > until
        {
            cursor = ctx.end_of_day(until);
            continue;
        }

        if !matches_during(date, &schedule.during) {
            let Some(resume) = prev_during_month(date, &schedule.during) else {
                return Ok(None);
            };
            cursor = ctx.end_of_day(resume);
            continue;
        }

        if is_excepted(date, &schedule.except) {
            let Some(resume) = date.pred_opt() else {
                return Ok(None);
            };
            cursor = ctx.end_of_day(resume);
            continue;
        }

        return Ok(Some(candidate));
    }

    tracing::warn!(
        limit = MAX_FILTER_ITERATIONS,
        "Backward search exhausted its filter budget"
    );
    Ok(None)
}

/// ## Summary
/// Whether the schedule fires at `dt` (minute precision).
///
/// ## Errors
///
/// Returns `ScheduleError::Eval` if the schedule names an unknown timezone.
pub fn matches<Z: TimeZone>(schedule: &Schedule, dt: &DateTime<Z>) -> ScheduleResult<bool> {
    let tz = resolve_timezone(schedule.timezone.as_deref())?;
    let dt = dt.with_timezone(&tz);
    let date = dt.date_naive();

    if !matches_during(date, &schedule.during) || is_excepted(date, &schedule.except) {
        return Ok(false);
    }
    if until_date(schedule, date).is_some_and(|until| date > until) {
        return Ok(false);
    }

    let ctx = Context::new(schedule, tz);
    Ok(matches::matches_expr(&schedule.expr, &ctx, &dt))
}

/// ## Summary
/// Up to `n` consecutive occurrences after `now`.
///
/// ## Errors
///
/// Returns `ScheduleError::Eval` if the schedule names an unknown timezone.
pub fn next_n_from<Z: TimeZone>(
    schedule: &Schedule,
    now: &DateTime<Z>,
    n: usize,
) -> ScheduleResult<Vec<DateTime<Tz>>> {
    Ok(occurrences(schedule, now)?.take(n).collect())
}

/// ## Summary
/// Lazy stream of occurrences strictly after `from`.
///
/// ## Errors
///
/// Returns `ScheduleError::Eval` if the schedule names an unknown timezone.
pub fn occurrences<'a, Z: TimeZone>(
    schedule: &'a Schedule,
    from: &DateTime<Z>,
) -> ScheduleResult<Occurrences<'a>> {
    let tz = resolve_timezone(schedule.timezone.as_deref())?;
    let from = from.with_timezone(&tz);
    let until = until_date(schedule, from.date_naive());
    Ok(Occurrences::new(schedule, tz, from, until))
}

/// ## Summary
/// Occurrences in `(from, to]`.
///
/// ## Errors
///
/// Returns `ScheduleError::Eval` if the schedule names an unknown timezone.
pub fn between<'a, Z: TimeZone, Y: TimeZone>(
    schedule: &'a Schedule,
    from: &DateTime<Z>,
    to: &DateTime<Y>,
) -> ScheduleResult<BoundedOccurrences<'a>> {
    let inner = occurrences(schedule, from)?;
    let end = to.with_timezone(&inner.timezone());
    Ok(BoundedOccurrences::new(inner, end))
}

/// Resolved `until` date. A named date that never occurs (a hand-built
/// `feb 30`) closes the schedule entirely.
fn until_date(schedule: &Schedule, reference: NaiveDate) -> Option<NaiveDate> {
    schedule
        .until
        .map(|until| resolve_until(until, reference).unwrap_or(NaiveDate::MIN))
}

/// Forward search with clause filtering, in an already-resolved zone.
fn next_in_zone(
    schedule: &Schedule,
    tz: Tz,
    now: &DateTime<Tz>,
    until: Option<NaiveDate>,
) -> Option<DateTime<Tz>> {
    let ctx = Context::new(schedule, tz);
    let filter_during = !next::handles_during(&schedule.expr);

    let mut cursor = *now;
    for _ in 0..MAX_FILTER_ITERATIONS {
        let candidate = next::next_expr(&schedule.expr, &ctx, &cursor)?;
        let date = candidate.date_naive();

        if until.is_some_and(|until| date > until) {
            return None;
        }

        if filter_during && !matches_during(date, &schedule.during) {
            cursor = ctx.before_day(next_during_month(date, &schedule.during)?);
            continue;
        }

        if is_excepted(date, &schedule.except) {
            cursor = ctx.before_day(date.succ_opt()?);
            continue;
        }

        return Some(candidate);
    }

    tracing::warn!(
        limit = MAX_FILTER_ITERATIONS,
        "Forward search exhausted its filter budget"
    );
    None
}
