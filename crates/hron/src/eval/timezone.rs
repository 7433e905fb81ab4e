//! Timezone resolution and local-to-instant conversion.

use std::str::FromStr;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;

use crate::error::ScheduleError;
use crate::schedule::core::TimeOfDay;

/// Error during timezone conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Not an IANA zone name known to the tz database.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}

impl From<ConversionError> for ScheduleError {
    fn from(err: ConversionError) -> Self {
        Self::eval(err.to_string())
    }
}

/// Resolves an IANA zone name. `None` is UTC.
///
/// ## Errors
///
/// Returns `ConversionError::UnknownTimezone` if the name cannot be resolved.
pub fn resolve_timezone(tzid: Option<&str>) -> Result<Tz, ConversionError> {
    tzid.map_or(Ok(Tz::UTC), parse_tzid)
}

fn parse_tzid(tzid: &str) -> Result<Tz, ConversionError> {
    Tz::from_str(tzid).map_err(|_e| ConversionError::UnknownTimezone(tzid.to_string()))
}

/// ## Summary
/// Converts a wall-clock datetime in `tz` to an instant.
///
/// A time inside a DST gap is read with the offset in force before the gap,
/// which moves it forward by the gap's length (02:30 in a 02:00-03:00 gap
/// becomes 03:30). A time inside a fold takes the earlier instant.
#[must_use]
pub fn resolve_local(tz: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => {
            // Transitions are never less than a day apart, so the offset a
            // day earlier is the pre-gap offset.
            let before = tz
                .offset_from_utc_datetime(&(local - TimeDelta::days(1)))
                .fix()
                .local_minus_utc();
            let utc = local - TimeDelta::seconds(i64::from(before));
            tz.from_utc_datetime(&utc)
        }
    }
}

/// The instant `time` occurs on local `date` in `tz`.
#[must_use]
pub fn at_time(tz: Tz, date: NaiveDate, time: TimeOfDay) -> DateTime<Tz> {
    resolve_local(tz, date.and_time(time.to_naive_time()))
}
