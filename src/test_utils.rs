//! Test utilities and fixtures.
//!
//! Factories for Plex DTO items so tests don't have to spell out the
//! nested `Media[].Part[]` structure every time. Customize the result with
//! struct update syntax or by mutating fields:
//!
//! ```ignore
//! let mut item = rated_track("Song", "Artist", "Album", 8.0, "/music/a.mp3");
//! item.media.clear();
//! ```

use crate::plex::dto::{Directory, Media, Metadata, Part};

/// Creates a track item with one media version holding one file.
pub fn rated_track(title: &str, artist: &str, album: &str, rating: f64, path: &str) -> Metadata {
    Metadata {
        rating_key: Some(format!("key-{}", title)),
        title: Some(title.to_string()),
        grandparent_title: Some(artist.to_string()),
        original_title: None,
        parent_title: Some(album.to_string()),
        user_rating: Some(rating),
        duration: Some(180_000),
        media: vec![Media {
            parts: vec![Part {
                file: Some(path.to_string()),
            }],
        }],
    }
}

/// Creates a track item that carries no user rating.
pub fn unrated_track(path: &str) -> Metadata {
    Metadata {
        user_rating: None,
        ..rated_track("Unrated", "Artist", "Album", 0.0, path)
    }
}

/// Creates a section descriptor.
pub fn directory(key: &str, section_type: &str, title: &str) -> Directory {
    Directory {
        key: key.to_string(),
        section_type: section_type.to_string(),
        title: Some(title.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rated_track_has_file() {
        let item = rated_track("Song", "Artist", "Album", 8.0, "/music/a.mp3");
        assert_eq!(item.media[0].parts[0].file.as_deref(), Some("/music/a.mp3"));
        assert_eq!(item.user_rating, Some(8.0));
    }

    #[test]
    fn test_unrated_track_has_no_rating() {
        assert!(unrated_track("/music/a.mp3").user_rating.is_none());
    }
}
