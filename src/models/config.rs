//! Configuration model.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog configuration.
    pub catalog: CatalogConfig,
    /// TMDB configuration.
    pub tmdb: TmdbConfig,
}

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Root directory whose child folders are the catalog.
    pub root: Option<PathBuf>,
    /// Rename new folders to `"{title} ({year})"`.
    pub rename_folders: bool,
    /// Extensions of loose files that get moved into their own folder.
    pub media_extensions: Vec<String>,
    /// Records enriched at the same time.
    pub concurrency: usize,
}

/// TMDB configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// API key (v3) or Bearer token (v4).
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Image base URL, including the size segment.
    pub image_base_url: String,
    /// Language for responses.
    pub language: String,
    /// Include adult titles in searches.
    pub include_adult: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root: None,
            rename_folders: false,
            media_extensions: vec!["mp4".to_string(), "avi".to_string(), "mkv".to_string()],
            concurrency: 1,
        }
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("TMDB_API_KEY").ok(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/original".to_string(),
            language: "en-US".to_string(),
            include_adult: true,
        }
    }
}

impl TmdbConfig {
    /// API key, or an error when none is configured.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::TmdbApiKeyMissing)
    }
}

/// Get the configuration directory path.
pub fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("movie_catalog")
}

/// Load configuration from the default location.
///
/// Falls back to defaults when the file is missing or unreadable.
pub fn load_config() -> Config {
    let config_path = dirs_config_path().join("config.toml");

    if config_path.exists() {
        match load_config_from(&config_path) {
            Ok(config) => return config,
            Err(e) => tracing::warn!("{}; using defaults", e),
        }
    }

    Config::default()
}

/// Load configuration from an explicit file.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| Error::InvalidConfig {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
