//! Schedule data model.
//!
//! Plain sum types with no evaluation behavior. Every consumer (renderer,
//! evaluator, cron bridge) matches these exhaustively.

mod expr;
mod names;

pub use expr::{
    DateSpec, DayFilter, DayOfMonthSpec, Exception, MonthTarget, Schedule, ScheduleExpr,
    TimeOfDay, UntilSpec, YearTarget,
};
pub use names::{IntervalUnit, MonthName, NearestDirection, OrdinalPosition, Weekday};
