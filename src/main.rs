//! plex-ratings-export - export rated tracks from a Plex music library.
//!
//! Fetches every track in a Plex music section, keeps those rated at or
//! above a star threshold, and writes them to a JSON file that other tools
//! can import (matching on file path).

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod plex;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Logs share stderr with progress output; RUST_LOG=plex_ratings_export=debug for detail
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("plex_ratings_export=warn")),
        )
        .init();

    cli::run_command(&args)
}
