//! hron: a human-readable cron language.
//!
//! Expressions such as `every weekday at 09:00 except dec 25 in
//! America/New_York` parse into a [`Schedule`], which can be rendered back to
//! canonical text, evaluated for next/previous occurrences and membership,
//! and converted to and from 5-field cron.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use hron::Schedule;
//!
//! let schedule: Schedule = "every 3 days at 09:00 in UTC".parse().unwrap();
//! let now = Utc.with_ymd_and_hms(2026, 2, 6, 12, 0, 0).unwrap();
//! let next = schedule.next_from(&now).unwrap().unwrap();
//! assert_eq!(next.to_rfc3339(), "2026-02-09T09:00:00+00:00");
//! ```
//!
//! ## Modules
//!
//! - [`schedule`] - Data model, parser, and canonical rendering
//! - [`eval`] - Occurrence search with timezone and DST handling
//! - [`cron`] - Bridge to and from 5-field cron
//! - [`error`] - Error type with source spans

pub mod cron;
pub mod error;
pub mod eval;
pub mod schedule;

pub use error::{ErrorKind, ScheduleError, ScheduleResult, Span};
pub use eval::{BoundedOccurrences, Occurrences};
pub use schedule::core::Schedule;
