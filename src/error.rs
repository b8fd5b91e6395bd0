use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("Rate limited, retry after {0:?}")]
    RateLimited(Duration),

    #[error("Token expired or invalid")]
    AuthExpired,

    #[error("Spotify API error: {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum CallbackError {
    #[error("Consent was refused: {0}")]
    Denied(String),

    #[error("Callback carries no access token")]
    MissingToken,

    #[error("Callback state does not match the pending consent request")]
    StateMismatch,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is not a valid number: {value}")]
    Invalid { name: &'static str, value: String },
}
