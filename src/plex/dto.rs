//! Plex Media Server API Data Transfer Objects
//!
//! These types match what the Plex HTTP API returns when asked for JSON
//! (`Accept: application/json`). Every payload is wrapped in a
//! `MediaContainer` object.
//! Only `adapter.rs` reads their fields - everything downstream works on
//! domain types.
//!
//! Endpoints consumed:
//! - `GET /`                                  server identity
//! - `GET /library/sections`                  library sections (`Directory`)
//! - `GET /library/sections/{key}/all?type=10` tracks in a section (`Metadata`)

use serde::{Deserialize, Serialize};

/// Top-level envelope around every Plex JSON response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    pub media_container: T,
}

/// Server identity returned by the root endpoint
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub friendly_name: Option<String>,
    pub version: Option<String>,
    pub machine_identifier: Option<String>,
}

/// Container for the section listing
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SectionsContainer {
    /// Absent when the server has no libraries
    #[serde(rename = "Directory", default)]
    pub directories: Vec<Directory>,
}

/// A library section descriptor
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Directory {
    /// Section key used in item-listing URLs (e.g. "3")
    pub key: String,
    /// Library type marker: "artist" for music, "movie", "show", "photo"
    #[serde(rename = "type")]
    pub section_type: String,
    pub title: Option<String>,
}

/// Container for an item listing
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MetadataContainer {
    /// Absent when the section is empty
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<Metadata>,
}

/// A single library item (a track when listed with `type=10`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub rating_key: Option<String>,
    pub title: Option<String>,
    /// Album artist
    pub grandparent_title: Option<String>,
    /// Track artist when it differs from the album artist
    pub original_title: Option<String>,
    /// Album
    pub parent_title: Option<String>,
    /// 0-10 scale; integer or float depending on server version, null when unrated
    pub user_rating: Option<f64>,
    /// Milliseconds
    pub duration: Option<u64>,
    #[serde(rename = "Media", default)]
    pub media: Vec<Media>,
}

/// A media version of an item
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Media {
    #[serde(rename = "Part", default)]
    pub parts: Vec<Part>,
}

/// A file making up a media version
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Part {
    pub file: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
