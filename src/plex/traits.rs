//! Trait definition for the library client.
//!
//! The export pipeline only needs two capabilities from a media server:
//! listing sections and listing the tracks of one section. Production code
//! uses [`PlexClient`](super::PlexClient); tests substitute [`mocks::MockLibrary`].
//!
//! # Example
//!
//! ```ignore
//! use plex_ratings_export::plex::LibraryApi;
//!
//! async fn count_tracks<L: LibraryApi>(library: &L, section: &str) -> Result<usize> {
//!     Ok(library.list_tracks(section).await?.len())
//! }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::export::domain::{LibraryTrack, Section};

/// Read access to a media server library.
#[async_trait]
pub trait LibraryApi: Send + Sync {
    /// All library sections, in server order.
    async fn list_sections(&self) -> Result<Vec<Section>>;

    /// Every track in a section, in server order.
    async fn list_tracks(&self, section_key: &str) -> Result<Vec<LibraryTrack>>;
}

#[async_trait]
impl LibraryApi for super::PlexClient {
    async fn list_sections(&self) -> Result<Vec<Section>> {
        self.list_sections().await
    }

    async fn list_tracks(&self, section_key: &str) -> Result<Vec<LibraryTrack>> {
        self.list_tracks(section_key).await
    }
}
