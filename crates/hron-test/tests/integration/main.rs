//! Integration tests for the hron language.

mod conformance;
mod cron_bridge;
mod dst;
mod errors;
mod helpers;
