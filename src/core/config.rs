//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.reelpress/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::StartView;
use crate::catalog::tmdb::DEFAULT_TMDB_BASE_URL;
use crate::content::api::DEFAULT_CONTENT_BASE_URL;
use crate::content::storage::DEFAULT_STORAGE_BASE_URL;
use crate::core::navigator::DEFAULT_SCROLL_MARGIN;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReelConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_view: Option<StartView>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TmdbConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub image_base_url: Option<String>,
    pub language: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ContentConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub base_url: Option<String>,
    pub bucket: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BrowseConfig {
    pub scroll_margin: Option<u32>,
    pub movie_genres: Option<Vec<String>>,
    pub tv_genres: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_REGION: &str = "IN";
pub const DEFAULT_STORAGE_BUCKET: &str = "reelpress.appspot.com";
pub const DEFAULT_MOVIE_GENRES: &[&str] = &["Horror", "Western", "Comedy", "Romance"];
pub const DEFAULT_TV_GENRES: &[&str] = &["Drama", "Animation"];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub start_view: StartView,
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub tmdb_language: String,
    pub tmdb_region: String,
    pub content_base_url: String,
    pub storage_base_url: String,
    pub storage_bucket: String,
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub session_token: Option<String>,
    pub scroll_margin: u32,
    pub movie_genres: Vec<String>,
    pub tv_genres: Vec<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.reelpress/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".reelpress").join("config.toml"))
}

/// Load config from `~/.reelpress/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ReelConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ReelConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ReelConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ReelConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: ReelConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // Not the whole struct: it may carry the API key and session token
    debug!(
        "Config: start_view={:?} tmdb_base_url={:?} content_base_url={:?}",
        config.general.start_view, config.tmdb.base_url, config.content.base_url
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# reelpress configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_view = "browse"               # "browse" or "new-post"

# [tmdb]
# api_key = "..."                     # Or set TMDB_API_KEY env var
# base_url = "https://api.themoviedb.org/3"
# image_base_url = "https://image.tmdb.org/t/p"
# language = "en-US"
# region = "IN"                       # Release region of the regional row

# [content]
# base_url = "http://localhost:3000/api"   # Or REELPRESS_CONTENT_URL

# [storage]
# base_url = "https://firebasestorage.googleapis.com/v0"
# bucket = "reelpress.appspot.com"

# [session]                           # Handed over by your identity provider
# user_id = "..."
# username = "..."
# token = "..."

# [browse]
# scroll_margin = 110
# movie_genres = ["Horror", "Western", "Comedy", "Romance"]
# tv_genres = ["Drama", "Animation"]
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_view` is the `--view` flag (None = not specified).
pub fn resolve(config: &ReelConfig, cli_view: Option<StartView>) -> ResolvedConfig {
    resolve_with_env(config, cli_view, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env<F>(config: &ReelConfig, cli_view: Option<StartView>, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Start view: CLI → config → default
    let start_view = cli_view
        .or(config.general.start_view)
        .unwrap_or_default();

    // TMDB API key: env → config
    let tmdb_api_key = env("TMDB_API_KEY").or_else(|| config.tmdb.api_key.clone());

    // TMDB base URL: env → config → default
    let tmdb_base_url = env("TMDB_BASE_URL")
        .or_else(|| config.tmdb.base_url.clone())
        .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string());

    let content_base_url = env("REELPRESS_CONTENT_URL")
        .or_else(|| config.content.base_url.clone())
        .unwrap_or_else(|| DEFAULT_CONTENT_BASE_URL.to_string());

    let storage_base_url = env("REELPRESS_STORAGE_URL")
        .or_else(|| config.storage.base_url.clone())
        .unwrap_or_else(|| DEFAULT_STORAGE_BASE_URL.to_string());

    let storage_bucket = env("REELPRESS_STORAGE_BUCKET")
        .or_else(|| config.storage.bucket.clone())
        .unwrap_or_else(|| DEFAULT_STORAGE_BUCKET.to_string());

    // Session: env → config, empty strings count as unset
    let user_id = env("REELPRESS_USER_ID")
        .or_else(|| config.session.user_id.clone())
        .filter(|s| !s.is_empty());
    let username = env("REELPRESS_USERNAME")
        .or_else(|| config.session.username.clone())
        .filter(|s| !s.is_empty());
    let session_token = env("REELPRESS_TOKEN")
        .or_else(|| config.session.token.clone())
        .filter(|s| !s.is_empty());

    ResolvedConfig {
        start_view,
        tmdb_api_key,
        tmdb_base_url,
        tmdb_image_base_url: config
            .tmdb
            .image_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string()),
        tmdb_language: config
            .tmdb
            .language
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        tmdb_region: config
            .tmdb
            .region
            .clone()
            .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        content_base_url,
        storage_base_url,
        storage_bucket,
        user_id,
        username,
        session_token,
        scroll_margin: config
            .browse
            .scroll_margin
            .unwrap_or(DEFAULT_SCROLL_MARGIN),
        movie_genres: genre_list(&config.browse.movie_genres, DEFAULT_MOVIE_GENRES),
        tv_genres: genre_list(&config.browse.tv_genres, DEFAULT_TV_GENRES),
    }
}

fn genre_list(configured: &Option<Vec<String>>, default: &[&str]) -> Vec<String> {
    match configured {
        Some(names) => names.clone(),
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}
