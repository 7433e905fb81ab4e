//! Command-line front end for hron expressions.

pub mod cli;
pub mod commands;
pub mod error;
