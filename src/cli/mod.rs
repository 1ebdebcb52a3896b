//! Command-line interface for plex-ratings-export.
//!
//! Parses flags, resolves connection settings, and drives one export run.

mod commands;

pub use commands::{Cli, run_command};
