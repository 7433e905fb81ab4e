//! Shared configuration, constants, and error types for the hron workspace.

pub mod config;
pub mod constants;
pub mod error;
