//! Rating-filtered export pipeline.
//!
//! A run is strictly sequential:
//! 1. Resolve the music section (given key or title, or first `artist` section)
//! 2. Fetch every track in it and keep those rated at least `min_stars`
//! 3. Optionally strip a mount-point prefix from file paths
//! 4. Wrap the tracks in an [`ExportDocument`] and write it as pretty JSON
//!
//! The full listing is always fetched and filtered locally; the server's own
//! rating filters are not used.
//!
//! # Usage
//!
//! ```ignore
//! let client = PlexClient::connect(&settings.url, &token).await?;
//! let outcome = export::run(&client, &options).await?;
//! ```

pub mod domain;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result, ResultExt};
use crate::plex::LibraryApi;
use domain::{ExportDocument, ExportedTrack, RatingSummary, Section};

/// Number of fetched items echoed at debug level
const PREVIEW_LEN: usize = 50;

/// Everything a run needs besides the library client
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Recorded in the document as the source endpoint
    pub plex_url: String,
    /// Section key or title; auto-detected when `None`
    pub section: Option<String>,
    pub min_stars: u8,
    pub strip_prefix: Option<String>,
    pub output: PathBuf,
}

/// Tracks kept by the rating filter, with the size of the full listing
#[derive(Debug)]
pub struct RatedTracks {
    /// Number of tracks the server listed
    pub total: usize,
    pub tracks: Vec<ExportedTrack>,
}

/// Result of a successful run
#[derive(Debug)]
pub enum ExportOutcome {
    /// Nothing qualified; no file was written
    NoTracks { total_tracks: usize },
    /// The document was written to `output`
    Exported {
        output: PathBuf,
        total_tracks: usize,
        track_count: usize,
        summary: RatingSummary,
    },
}

impl ExportOutcome {
    /// Size of the full section listing
    pub fn total_tracks(&self) -> usize {
        match self {
            Self::NoTracks { total_tracks } | Self::Exported { total_tracks, .. } => *total_tracks,
        }
    }
}

/// Run the whole pipeline against a library.
pub async fn run<L: LibraryApi + ?Sized>(
    library: &L,
    options: &ExportOptions,
) -> Result<ExportOutcome> {
    let section = resolve_section(library, options.section.as_deref()).await?;

    let RatedTracks { total, mut tracks } =
        fetch_rated_tracks(library, &section, options.min_stars).await?;
    if tracks.is_empty() {
        return Ok(ExportOutcome::NoTracks {
            total_tracks: total,
        });
    }

    if let Some(prefix) = options.strip_prefix.as_deref().filter(|p| !p.is_empty()) {
        strip_path_prefix(&mut tracks, prefix);
    }

    let summary = RatingSummary::from_tracks(&tracks);
    let document = ExportDocument::new(&options.plex_url, section, options.min_stars, tracks);
    write_document(&document, &options.output)?;

    Ok(ExportOutcome::Exported {
        output: options.output.clone(),
        total_tracks: total,
        track_count: document.track_count,
        summary,
    })
}

/// Pick the section to export.
///
/// A given value matches a section key first, then a section title
/// (case-insensitive). When neither matches it is used verbatim as the key.
/// Without a value the first music (`artist`) section wins.
pub async fn resolve_section<L: LibraryApi + ?Sized>(
    library: &L,
    explicit: Option<&str>,
) -> Result<String> {
    let sections = library.list_sections().await?;

    if let Some(wanted) = explicit {
        return Ok(match find_section(&sections, wanted) {
            Some(section) => {
                debug!(
                    "Section {:?} resolved to key {} ({})",
                    wanted,
                    section.key,
                    section.title.as_deref().unwrap_or("untitled")
                );
                section.key.clone()
            }
            None => {
                debug!("No section matches {:?}, using it as the key", wanted);
                wanted.to_string()
            }
        });
    }

    let section = sections
        .into_iter()
        .find(|s| s.is_music())
        .ok_or(Error::SectionNotFound)?;

    info!(
        "Auto-detected music section {} ({})",
        section.key,
        section.title.as_deref().unwrap_or("untitled")
    );
    Ok(section.key)
}

fn find_section<'a>(sections: &'a [Section], wanted: &str) -> Option<&'a Section> {
    sections.iter().find(|s| s.key == wanted).or_else(|| {
        sections.iter().find(|s| {
            s.title
                .as_deref()
                .is_some_and(|title| title.eq_ignore_ascii_case(wanted))
        })
    })
}

/// Fetch every track in `section` and keep the rated ones that have a file.
///
/// Upstream order is preserved.
pub async fn fetch_rated_tracks<L: LibraryApi + ?Sized>(
    library: &L,
    section: &str,
    min_stars: u8,
) -> Result<RatedTracks> {
    let items = library.list_tracks(section).await?;
    info!("Found {} total tracks in section {}", items.len(), section);

    for item in items.iter().take(PREVIEW_LEN) {
        debug!("  {}", item.describe());
    }

    let tracks: Vec<ExportedTrack> = items
        .iter()
        .filter_map(|item| item.to_exported(min_stars))
        .collect();

    info!(
        "{} tracks rated >= {} stars with a file on disk",
        tracks.len(),
        min_stars
    );
    Ok(RatedTracks {
        total: items.len(),
        tracks,
    })
}

/// Strip a mount-point prefix from every path that starts with it.
///
/// Trailing separators on the prefix and leading separators left on the
/// remainder are removed. Paths outside the prefix are left alone.
pub fn strip_path_prefix(tracks: &mut [ExportedTrack], prefix: &str) {
    let prefix = prefix.trim_end_matches('/');
    for track in tracks.iter_mut() {
        if let Some(rest) = track.path.strip_prefix(prefix) {
            track.path = rest.trim_start_matches('/').to_string();
        }
    }
}

/// Write the document as pretty-printed JSON, overwriting `path`.
pub fn write_document(document: &ExportDocument, path: &Path) -> Result<()> {
    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');
    std::fs::write(path, json).at_path(path)?;
    info!("Wrote {} tracks to {:?}", document.track_count, path);
    Ok(())
}
