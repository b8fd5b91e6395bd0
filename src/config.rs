//! Configuration management for discspot.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every setting except the Spotify client
//! id has a default, so a bare `.env` with one line is enough to get going.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SCOPE: &str = "user-read-private";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up in:
/// - Linux: `~/.local/share/discspot/.env`
/// - macOS: `~/Library/Application Support/discspot/.env`
/// - Windows: `%LOCALAPPDATA%/discspot/.env`
///
/// Variables already present in the process environment are not overridden.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the `.env`
/// file cannot be read or parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(())
}

/// Returns the directory discspot keeps its `.env` and store in.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("discspot");
    path
}

/// Returns the Spotify API client ID registered for the implicit grant.
///
/// # Errors
///
/// Fails when `SPOTIFY_API_AUTH_CLIENT_ID` is not set.
pub fn spotify_client_id() -> Result<String, ConfigError> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID")
        .map_err(|_| ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))
}

/// Returns the Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the OAuth authorize endpoint.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string())
}

/// Returns the redirect URI registered with Spotify.
///
/// It must point at the callback server (see [`server_addr`]) for the CLI
/// flow to pick up the token.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string())
}

pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string())
}

/// Returns the address the local callback server binds to.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

fn number_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

/// Runtime settings for the whole pipeline.
///
/// `Settings::default()` mirrors the documented defaults with a placeholder
/// client id, which is what the tests run against.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub api_url: String,
    pub auth_url: String,
    pub redirect_uri: String,
    pub scope: String,
    pub server_addr: String,
    /// A persisted token older than this is never used.
    pub token_max_age: Duration,
    pub page_load_timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub init_debounce: Duration,
    /// `retry-after` values above this are not waited on.
    pub max_retry_after: Duration,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            client_id: "discspot-client-id".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            token_max_age: Duration::from_secs(24 * 60 * 60),
            page_load_timeout: Duration::from_millis(10_000),
            max_retries: 3,
            retry_delay: Duration::from_millis(1_000),
            init_debounce: Duration::from_millis(500),
            max_retry_after: Duration::from_secs(120),
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl Settings {
    /// Builds settings from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Fails when the client id is missing or a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            client_id: spotify_client_id()?,
            api_url: spotify_apiurl(),
            auth_url: spotify_apiauth_url(),
            redirect_uri: spotify_redirect_uri(),
            scope: spotify_scope(),
            server_addr: server_addr(),
            token_max_age: Duration::from_secs(number_var(
                "DISCSPOT_TOKEN_MAX_AGE_SECS",
                defaults.token_max_age.as_secs(),
            )?),
            page_load_timeout: Duration::from_millis(number_var(
                "DISCSPOT_PAGE_LOAD_TIMEOUT_MS",
                10_000,
            )?),
            max_retries: number_var("DISCSPOT_MAX_RETRIES", defaults.max_retries)?,
            retry_delay: Duration::from_millis(number_var("DISCSPOT_RETRY_DELAY_MS", 1_000)?),
            init_debounce: Duration::from_millis(number_var("DISCSPOT_INIT_DEBOUNCE_MS", 500)?),
            max_retry_after: Duration::from_secs(number_var(
                "DISCSPOT_MAX_RETRY_AFTER_SECS",
                defaults.max_retry_after.as_secs(),
            )?),
            request_timeout: Duration::from_secs(number_var(
                "DISCSPOT_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
        })
    }
}
