//! Internal domain models for the ratings export.
//!
//! These types are OUR types - they don't change when the Plex API changes.
//! Plex responses are converted into them by `plex::adapter`.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Highest star rating a track can carry
pub const MAX_STARS: u8 = 5;

/// A library section as seen by the exporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Key used to address the section in item listings
    pub key: String,
    /// Library type marker ("artist" for music libraries)
    pub kind: String,
    pub title: Option<String>,
}

impl Section {
    /// Whether this section holds music
    pub fn is_music(&self) -> bool {
        self.kind == "artist"
    }
}

/// A track as listed by the server, before rating filtering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryTrack {
    /// Server-side identifier, used only in diagnostics
    pub rating_key: Option<String>,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Raw 0-10 rating; `None` when unrated
    pub user_rating: Option<f64>,
    /// File of the first part of the first media version
    pub path: Option<String>,
    pub duration_ms: Option<u64>,
}

impl LibraryTrack {
    /// Raw 0-10 rating; unrated tracks count as 0
    pub fn raw_rating(&self) -> f64 {
        self.user_rating.unwrap_or(0.0)
    }

    /// Keep the track if it is rated at least `min_stars` and has a file.
    pub fn to_exported(&self, min_stars: u8) -> Option<ExportedTrack> {
        let rating = self.raw_rating();
        if rating < f64::from(min_stars) * 2.0 {
            return None;
        }

        let path = self.path.as_deref().filter(|p| !p.is_empty())?;

        Some(ExportedTrack {
            title: self.title.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
            path: path.to_string(),
            rating: to_stars(rating),
            duration_ms: self.duration_ms,
        })
    }

    /// One-line description for debug output
    pub fn describe(&self) -> String {
        format!(
            "[{}] {} | userRating: {:?}",
            self.rating_key.as_deref().unwrap_or("-"),
            self.title,
            self.user_rating
        )
    }
}

/// 0-10 rating to 1-5 stars: truncate, then floor-divide by two
pub fn to_stars(rating: f64) -> u8 {
    let whole = rating.trunc().clamp(0.0, f64::from(MAX_STARS) * 2.0) as u8;
    whole / 2
}

/// A rated track, normalized for the export file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedTrack {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub path: String,
    /// Star rating, 1-5
    pub rating: u8,
    pub duration_ms: Option<u64>,
}

/// The JSON document written by a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub exported_at: String,
    pub plex_url: String,
    pub section: String,
    pub min_stars: u8,
    pub track_count: usize,
    pub tracks: Vec<ExportedTrack>,
}

impl ExportDocument {
    /// Wrap tracks into a document stamped with the current UTC time.
    pub fn new(
        plex_url: impl Into<String>,
        section: impl Into<String>,
        min_stars: u8,
        tracks: Vec<ExportedTrack>,
    ) -> Self {
        Self::at(Utc::now(), plex_url, section, min_stars, tracks)
    }

    /// Wrap tracks into a document stamped with the given time.
    pub fn at(
        now: DateTime<Utc>,
        plex_url: impl Into<String>,
        section: impl Into<String>,
        min_stars: u8,
        tracks: Vec<ExportedTrack>,
    ) -> Self {
        Self {
            exported_at: now.to_rfc3339_opts(SecondsFormat::Micros, true),
            plex_url: plex_url.into(),
            section: section.into(),
            min_stars,
            track_count: tracks.len(),
            tracks,
        }
    }
}

/// Count of exported tracks per star rating
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingSummary {
    counts: BTreeMap<u8, usize>,
}

impl RatingSummary {
    pub fn from_tracks(tracks: &[ExportedTrack]) -> Self {
        let mut counts = BTreeMap::new();
        for track in tracks {
            *counts.entry(track.rating).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// (stars, count) pairs, highest rating first
    pub fn descending(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.counts.iter().rev().map(|(&stars, &count)| (stars, count))
    }

    /// Human-readable lines such as `★★★★☆: 12 tracks`
    pub fn lines(&self) -> Vec<String> {
        self.descending()
            .map(|(stars, count)| format!("  {}: {} tracks", star_bar(stars), count))
            .collect()
    }
}

/// Render a rating as filled and empty stars
pub fn star_bar(stars: u8) -> String {
    let filled = stars.min(MAX_STARS) as usize;
    format!(
        "{}{}",
        "★".repeat(filled),
        "☆".repeat(MAX_STARS as usize - filled)
    )
}
