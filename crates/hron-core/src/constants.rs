/// Naming constants shared across crates
pub const APP_NAME: &str = "hron";
pub const ENV_PREFIX: &str = const_str::convert_ascii_case!(upper, APP_NAME);
pub const CONFIG_FILE_STEM: &str = APP_NAME;

/// Day number (from 0001-01-01, proleptic Gregorian) of 1970-01-01, the default
/// anchor for day, month, and year interval alignment.
pub const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Day number of 1970-01-05, the first Monday after the UNIX epoch. Default
/// anchor for week interval alignment.
pub const EPOCH_MONDAY_DAYS_FROM_CE: i32 = EPOCH_DAYS_FROM_CE + 4;

/// Year of the default anchor.
pub const EPOCH_YEAR: i32 = 1970;

/// Upper bound on filter retries in `next_from` / `previous_from`.
pub const MAX_FILTER_ITERATIONS: usize = 1000;

/// Days scanned past today for single-interval day repeats.
pub const DAY_SCAN_LIMIT: usize = 8;

/// Aligned days or calendar days scanned for multi-day and windowed repeats.
pub const WIDE_DAY_SCAN_LIMIT: usize = 400;

/// Weeks scanned for week repeats.
pub const WEEK_SCAN_LIMIT: usize = 54;

/// Months scanned per unit of interval for month and ordinal repeats.
pub const MONTH_SCAN_FACTOR: usize = 24;

/// Years scanned per unit of interval for year repeats and named single dates.
pub const YEAR_SCAN_FACTOR: usize = 8;
