//! Schedule rendering.
//!
//! `Display` implementations producing the canonical text form. Parsing the
//! rendered text yields a schedule that renders identically.

mod display;

pub use display::{write_ordinal, write_time_list};
