//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Table store configuration.
    pub store: StoreConfig,
    /// TMDB configuration.
    pub tmdb: TmdbConfig,
    /// Search overlay configuration.
    pub search: SearchConfig,
    /// Embedded player configuration.
    pub player: PlayerConfig,
    /// Directory holding the watchlist and watch history.
    pub data_dir: PathBuf,
}

/// Table store (Supabase) configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: Option<String>,
    /// Anonymous API key.
    pub anon_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout: u64,
}

/// TMDB configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// API key or v4 bearer token.
    pub api_key: Option<String>,
    /// Language for responses.
    pub language: String,
}

/// Which backend powers the quick-search overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchBackendKind {
    /// TMDB multi-search.
    #[default]
    Tmdb,
    /// Substring query against the table store.
    Store,
}

impl std::str::FromStr for SearchBackendKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "tmdb" => Ok(Self::Tmdb),
            "store" | "supabase" => Ok(Self::Store),
            other => Err(crate::Error::InvalidConfig(format!(
                "unknown search backend '{}'",
                other
            ))),
        }
    }
}

/// Search overlay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Backend selection.
    pub backend: SearchBackendKind,
    /// Debounce delay in milliseconds.
    pub debounce_ms: u64,
}

/// Embedded player configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Extra origins trusted to post playback messages, on top of the
    /// embed URL's own origin.
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            tmdb: TmdbConfig::default(),
            search: SearchConfig::default(),
            player: PlayerConfig::default(),
            data_dir: dirs_config_path(),
        }
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            language: "en-US".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend: SearchBackendKind::default(),
            debounce_ms: 300,
        }
    }
}

impl Config {
    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("SUPABASE_URL") {
            self.store.url = Some(url);
        }
        if let Ok(key) = std::env::var("SUPABASE_ANON_KEY") {
            self.store.anon_key = Some(key);
        }
        if let Ok(key) = std::env::var("TMDB_API_KEY") {
            self.tmdb.api_key = Some(key);
        }
        if let Ok(backend) = std::env::var("STREAM_CATALOG_SEARCH") {
            match backend.parse() {
                Ok(kind) => self.search.backend = kind,
                Err(e) => tracing::warn!("Ignoring STREAM_CATALOG_SEARCH: {}", e),
            }
        }
    }

    /// Path of the persisted watchlist.
    pub fn watchlist_path(&self) -> PathBuf {
        self.data_dir.join("watchlist.json")
    }

    /// Path of the persisted watch history.
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history.json")
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stream_catalog")
}

/// Load configuration from a specific file, without environment overrides.
pub fn load_config_from(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load configuration from the default location and the environment.
pub fn load_config() -> Config {
    let config_path = dirs_config_path().join("config.toml");

    let mut config = if config_path.exists() {
        match load_config_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", config_path.display(), e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    config.apply_env();
    config
}
