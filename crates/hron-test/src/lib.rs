//! hron integration test support.
//!
//! Re-exports the workspace crates so integration tests use one set of paths.

pub use hron::{
    BoundedOccurrences, ErrorKind, Occurrences, Schedule, ScheduleError, ScheduleResult, Span,
    cron, error, eval, schedule,
};
