//! CLI definition and dispatch.
//!
//! The export itself lives in `export`; this module turns flags, environment
//! variables, and the config file into the settings it runs with.

mod export;

use clap::Parser;
use std::path::PathBuf;
use tokio::runtime::Builder;

use crate::config::{self, Overrides, Settings};
use crate::export::ExportOptions;

pub use export::cmd_export;

/// Export rated songs from Plex to a JSON file for import elsewhere.
///
/// Connection settings are read from flags, then PLEX_* environment
/// variables, then the config file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Plex server URL (default: http://localhost:32400)
    #[arg(long, env = "PLEX_URL")]
    pub url: Option<String>,

    /// Plex authentication token
    #[arg(long, env = "PLEX_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Music library section key or name (auto-detected when omitted)
    #[arg(long, env = "PLEX_MUSIC_SECTION")]
    pub section: Option<String>,

    /// Minimum star rating to export (1-5)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub min_stars: u8,

    /// Output file path
    #[arg(short, long, default_value = "plex_ratings.json")]
    pub output: PathBuf,

    /// Path prefix to strip from file paths
    #[arg(long)]
    pub strip_prefix: Option<String>,

    /// Config file (default: <config dir>/plex-ratings-export/config.toml)
    #[arg(long, env = "PLEX_EXPORT_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            token: self.token.clone(),
            section: self.section.clone(),
        }
    }

    fn export_options(&self, settings: &Settings) -> ExportOptions {
        ExportOptions {
            plex_url: settings.url.clone(),
            section: settings.section.clone(),
            min_stars: self.min_stars,
            strip_prefix: self.strip_prefix.clone(),
            output: self.output.clone(),
        }
    }
}

/// Resolve settings and run the export.
///
/// Configuration problems are reported before any network traffic.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let file = config::load(cli.config.as_deref())?;
    let settings = Settings::resolve(cli.overrides(), file)?;
    let options = cli.export_options(&settings);

    let rt = Builder::new_current_thread().enable_all().build()?;
    rt.block_on(cmd_export(&settings, &options))
}
