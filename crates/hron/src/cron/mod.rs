//! Cron bridge.
//!
//! A deliberately partial mapping between schedules and classic 5-field cron.
//! Conversion to cron refuses anything cron cannot express exactly; conversion
//! from cron accepts the common extensions (`L`, `W`, `#`, `@daily`, ...).
//!
//! For any cron string produced by [`to_cron`], `to_cron(from_cron(c)) == c`.
//!
//! ## Submodules
//! - `to_cron`: schedule to cron
//! - `from_cron`: cron to schedule
//! - `explain`: cron to schedule text, with notes on cron quirks

mod explain;
mod from_cron;
mod to_cron;

pub use explain::explain_cron;
pub use from_cron::from_cron;
pub use to_cron::to_cron;
