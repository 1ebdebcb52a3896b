//! Plex Media Server HTTP client
//!
//! Talks to the server's JSON API. Every request carries the auth token in the
//! `X-Plex-Token` header and asks for JSON via `Accept: application/json`
//! (the server answers XML otherwise).
//!
//! Requests are bounded by a 120 second timeout; full listings of large music
//! libraries can take a while to render server-side. Nothing is retried.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use super::{adapter, dto};
use crate::error::{Error, Result};
use crate::export::domain::{LibraryTrack, Section};

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Plex item type for tracks in `/all` listings
const TRACK_TYPE: u8 = 10;

const PRODUCT: &str = env!("CARGO_PKG_NAME");

/// Plex API client
pub struct PlexClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl PlexClient {
    /// Build a client without contacting the server.
    ///
    /// Fails with a configuration error if the token can't be sent as a header.
    pub fn new(base_url: impl Into<String>, token: &str) -> Result<Self> {
        let mut token_value = HeaderValue::from_str(token)
            .map_err(|_| Error::configuration("PLEX_TOKEN contains invalid characters"))?;
        token_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-plex-token", token_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("x-plex-product", HeaderValue::from_static(PRODUCT));
        headers.insert("x-plex-client-identifier", HeaderValue::from_static(PRODUCT));

        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| Error::connection(format!("failed to build HTTP client: {}", e)))?;

        let base_url: String = base_url.into();
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client and verify the server is reachable and accepts the token.
    pub async fn connect(base_url: impl Into<String>, token: &str) -> Result<Self> {
        let client = Self::new(base_url, token)?;
        let info = client.server_info().await?;
        tracing::info!(
            "Connected to Plex server {} (version {})",
            info.friendly_name.as_deref().unwrap_or("<unnamed>"),
            info.version.as_deref().unwrap_or("unknown")
        );
        tracing::debug!(
            "Server machine identifier: {}",
            info.machine_identifier.as_deref().unwrap_or("unknown")
        );
        Ok(client)
    }

    /// Fetch the server identity. Any failure here is a connection failure.
    pub async fn server_info(&self) -> Result<dto::ServerInfo> {
        let url = format!("{}/", self.base_url);
        let response = self.send(&url).await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::connection(format!(
                "credentials rejected (HTTP {})",
                status
            )));
        }
        if !status.is_success() {
            return Err(Error::connection(format!("handshake failed (HTTP {})", status)));
        }

        let envelope: dto::Envelope<dto::ServerInfo> = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;
        Ok(envelope.media_container)
    }

    /// List all library sections
    pub async fn list_sections(&self) -> Result<Vec<Section>> {
        let url = self.sections_url();
        let container: dto::SectionsContainer = self.get_json(&url).await?;
        Ok(container
            .directories
            .into_iter()
            .map(adapter::to_section)
            .collect())
    }

    /// List every track in a section, in server order. No server-side filtering.
    pub async fn list_tracks(&self, section_key: &str) -> Result<Vec<LibraryTrack>> {
        let url = self.tracks_url(section_key);
        let container: dto::MetadataContainer = self.get_json(&url).await?;
        Ok(container
            .metadata
            .into_iter()
            .map(adapter::to_library_track)
            .collect())
    }

    fn sections_url(&self) -> String {
        format!("{}/library/sections", self.base_url)
    }

    fn tracks_url(&self, section_key: &str) -> String {
        format!(
            "{}/library/sections/{}/all?type={}",
            self.base_url,
            urlencoding::encode(section_key),
            TRACK_TYPE
        )
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response> {
        tracing::debug!("GET {}", url);
        self.http_client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::connection(describe_send_error(&e)))
    }

    /// GET a URL and unwrap its `MediaContainer`
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(status, url));
        }

        let envelope: dto::Envelope<T> = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;
        Ok(envelope.media_container)
    }
}

fn describe_send_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!(
            "request timed out after {}s: {}",
            REQUEST_TIMEOUT.as_secs(),
            e
        )
    } else if e.is_connect() {
        format!("server unreachable: {}", e)
    } else {
        e.to_string()
    }
}
