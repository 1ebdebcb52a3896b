//! Plex Media Server integration
//!
//! Reads library sections and track listings over the server's HTTP API.
//! - **DTOs** (`dto.rs`) - exact JSON response shapes
//! - **Adapter** (`adapter.rs`) - DTO to export domain conversion
//! - **Client** (`client.rs`) - reqwest-based HTTP client
//! - **Traits** (`traits.rs`) - the `LibraryApi` seam the exporter depends on
//!
//! API reference: https://developer.plex.tv/pms/

pub mod adapter;
mod client;
pub mod dto;
pub mod traits;

pub use client::PlexClient;
pub use traits::LibraryApi;
