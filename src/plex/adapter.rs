//! Adapter layer: Convert Plex DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! If Plex changes its response format, only this file and dto.rs need to change.

use super::dto;
use crate::export::domain::{LibraryTrack, Section};

/// Substituted when every candidate for a text field is missing or empty
pub const UNKNOWN: &str = "Unknown";

/// Convert a section descriptor
pub fn to_section(directory: dto::Directory) -> Section {
    Section {
        key: directory.key,
        kind: directory.section_type,
        title: directory.title,
    }
}

/// File path of the first part of the first media version
pub fn file_path(item: &dto::Metadata) -> Option<&str> {
    item.media
        .first()
        .and_then(|media| media.parts.first())
        .and_then(|part| part.file.as_deref())
        .filter(|file| !file.is_empty())
}

/// Convert a listed item, resolving text fallbacks and the file path
pub fn to_library_track(item: dto::Metadata) -> LibraryTrack {
    let path = file_path(&item).map(String::from);

    LibraryTrack {
        title: first_non_empty(&[item.title.as_deref()]),
        artist: first_non_empty(&[
            item.grandparent_title.as_deref(),
            item.original_title.as_deref(),
        ]),
        album: first_non_empty(&[item.parent_title.as_deref()]),
        path,
        user_rating: item.user_rating,
        duration_ms: item.duration,
        rating_key: item.rating_key,
    }
}

/// First candidate that is present and non-empty, else [`UNKNOWN`]
fn first_non_empty(candidates: &[Option<&str>]) -> String {
    candidates
        .iter()
        .flatten()
        .find(|value| !value.is_empty())
        .copied()
        .unwrap_or(UNKNOWN)
        .to_string()
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::export::domain::MAX_STARS;
    use crate::test_utils::rated_track;
    use proptest::prelude::*;

    proptest! {
        /// A track is exported iff its rating clears the threshold and it has a file
        #[test]
        fn exported_iff_rated_and_has_file(
            rating in proptest::option::of(0u8..=10),
            min_stars in 1u8..=5,
            has_file in any::<bool>(),
        ) {
            let mut item = rated_track("Song", "Artist", "Album", 0.0, "/music/x.mp3");
            item.user_rating = rating.map(f64::from);
            if !has_file {
                item.media.clear();
            }

            let raw = rating.unwrap_or(0);
            let expected = raw >= min_stars * 2 && has_file;
            let exported = to_library_track(item).to_exported(min_stars);
            prop_assert_eq!(exported.is_some(), expected);
        }

        /// Exported ratings are the halved raw rating and stay within [min_stars, 5]
        #[test]
        fn exported_rating_in_range(rating in 0u8..=10, min_stars in 1u8..=5) {
            let item = rated_track("Song", "Artist", "Album", f64::from(rating), "/music/x.mp3");
            if let Some(track) = to_library_track(item).to_exported(min_stars) {
                prop_assert_eq!(track.rating, rating / 2);
                prop_assert!(track.rating >= min_stars);
                prop_assert!(track.rating <= MAX_STARS);
            }
        }
    }
}
