//! Configuration system using TOML files.
//!
//! Connection settings can live in a config file so the token doesn't have
//! to be passed on every invocation. Default location is the OS-standard
//! config directory:
//! - Windows: %APPDATA%\plex-ratings-export\config.toml
//! - macOS: ~/Library/Application Support/plex-ratings-export/config.toml
//! - Linux: ~/.config/plex-ratings-export/config.toml
//!
//! ```toml
//! [plex]
//! url = "http://192.168.1.20:32400"
//! token = "xxxxxxxxxxxxxxxxxxxx"
//! section = "3"
//! ```
//!
//! Command-line flags and environment variables take precedence over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Used when neither flag, environment, nor config file names a server
pub const DEFAULT_PLEX_URL: &str = "http://localhost:32400";

/// Contents of the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub plex: PlexConfig,
}

/// Plex connection settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlexConfig {
    /// Server base URL
    pub url: Option<String>,
    /// X-Plex-Token
    pub token: Option<String>,
    /// Music section key or name; auto-detected when unset
    pub section: Option<String>,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub token: Option<String>,
    pub section: Option<String>,
}

/// Resolved connection settings, built once at startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub url: String,
    pub token: String,
    pub section: Option<String>,
}

impl Settings {
    /// Merge overrides over the config file.
    ///
    /// Fails if no token is available from any source.
    pub fn resolve(overrides: Overrides, file: ConfigFile) -> Result<Self> {
        let pick = |over: Option<String>, from_file: Option<String>| {
            over.filter(|v| !v.is_empty())
                .or(from_file.filter(|v| !v.is_empty()))
        };

        let token = pick(overrides.token, file.plex.token).ok_or_else(|| {
            Error::configuration(
                "PLEX_TOKEN not set. Pass --token, set PLEX_TOKEN, or add it to the config file",
            )
        })?;

        Ok(Self {
            url: pick(overrides.url, file.plex.url)
                .unwrap_or_else(|| DEFAULT_PLEX_URL.to_string()),
            token,
            section: pick(overrides.section, file.plex.section),
        })
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("plex-ratings-export"))
}

/// Get the full path to the default config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load the config file at `path`, or the default location when `None`.
///
/// A missing file yields defaults. A file that exists but can't be read or
/// parsed is an error: it likely holds the credentials this run needs.
pub fn load(path: Option<&Path>) -> Result<ConfigFile> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => {
                tracing::warn!("Could not determine config directory, using defaults");
                return Ok(ConfigFile::default());
            }
        },
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Ok(ConfigFile::default());
    }

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| Error::configuration(format!("failed to read {:?}: {}", path, e)))?;
    let config = toml::from_str(&contents)
        .map_err(|e| Error::configuration(format!("failed to parse {:?}: {}", path, e)))?;

    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with(url: Option<&str>, token: Option<&str>, section: Option<&str>) -> ConfigFile {
        ConfigFile {
            plex: PlexConfig {
                url: url.map(String::from),
                token: token.map(String::from),
                section: section.map(String::from),
            },
        }
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[plex]
token = "my-token"
"#;
        let config: ConfigFile = toml::from_str(toml).unwrap();

        assert_eq!(config.plex.token, Some("my-token".to_string()));
        assert!(config.plex.url.is_none());
        assert!(config.plex.section.is_none());
    }

    #[test]
    fn test_empty_config_parses() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert!(config.plex.token.is_none());
    }

    #[test]
    fn test_missing_token_is_configuration_error() {
        let result = Settings::resolve(Overrides::default(), ConfigFile::default());
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_empty_token_counts_as_missing() {
        let overrides = Overrides {
            token: Some(String::new()),
            ..Default::default()
        };
        let result = Settings::resolve(overrides, ConfigFile::default());
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_file_values_used_when_not_overridden() {
        let settings = Settings::resolve(
            Overrides::default(),
            file_with(Some("http://nas:32400"), Some("file-token"), Some("5")),
        )
        .unwrap();

        assert_eq!(settings.url, "http://nas:32400");
        assert_eq!(settings.token, "file-token");
        assert_eq!(settings.section, Some("5".to_string()));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let overrides = Overrides {
            url: Some("http://cli:32400".to_string()),
            token: Some("cli-token".to_string()),
            section: None,
        };
        let settings = Settings::resolve(
            overrides,
            file_with(Some("http://nas:32400"), Some("file-token"), Some("5")),
        )
        .unwrap();

        assert_eq!(settings.url, "http://cli:32400");
        assert_eq!(settings.token, "cli-token");
        assert_eq!(settings.section, Some("5".to_string()));
    }

    #[test]
    fn test_default_url() {
        let settings =
            Settings::resolve(Overrides::default(), file_with(None, Some("t"), None)).unwrap();
        assert_eq!(settings.url, DEFAULT_PLEX_URL);
        assert!(settings.section.is_none());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(Some(dir.path().join("nope.toml").as_path())).unwrap();
        assert!(config.plex.token.is_none());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[plex]\nurl = \"http://nas:32400\"\ntoken = \"abc\"\n").unwrap();

        let config = load(Some(path.as_path())).unwrap();

        assert_eq!(config.plex.url, Some("http://nas:32400".to_string()));
        assert_eq!(config.plex.token, Some("abc".to_string()));
    }

    #[test]
    fn test_load_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[plex\ntoken = ").unwrap();

        let result = load(Some(path.as_path()));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
