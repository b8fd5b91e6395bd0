use std::{sync::Arc, time::Duration};

use url::Url;

use crate::{
    config::Settings,
    error::{ApiError, ConfigError},
    management::TokenManager,
    server::start_api_server,
    spotify::client::SpotifyClient,
    types::{AccessToken, CurrentUser},
    warning,
};

const CONSENT_WAIT: Duration = Duration::from_secs(120);
const CONSENT_POLL: Duration = Duration::from_millis(500);

/// Builds the implicit-grant authorize URL.
///
/// Spotify answers by redirecting to `redirect_uri` with the access token in
/// the URL fragment, so no code exchange is involved.
///
/// # Errors
///
/// Fails when the configured authorize endpoint is not a valid URL.
pub fn authorize_url(settings: &Settings, state: &str) -> Result<String, url::ParseError> {
    let url = Url::parse_with_params(
        &settings.auth_url,
        &[
            ("client_id", settings.client_id.as_str()),
            ("response_type", "token"),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("scope", settings.scope.as_str()),
            ("state", state),
        ],
    )?;

    Ok(url.into())
}

/// Fetches the profile of the token's owner. Used as a cheap liveness check.
///
/// # Errors
///
/// Whatever [`SpotifyClient::request`] fails with.
pub async fn current_user(client: &SpotifyClient, token: &str) -> Result<CurrentUser, ApiError> {
    client
        .get(&format!("{}/me", client.api_url()), token)
        .await
}

/// Runs the interactive consent flow for the command line.
///
/// 1. **Server Start**: launches the local callback server sharing `tokens`
/// 2. **Consent Launch**: asks `tokens` for a token, which opens the authorize
///    page in the browser when none is cached
/// 3. **Callback**: waits until the callback server has stored a token
///
/// Returns the token on success, `None` on timeout.
///
/// # Errors
///
/// Fails when the callback server address is not a valid socket address.
pub async fn auth(
    tokens: Arc<TokenManager>,
    settings: &Settings,
    location: &str,
) -> Result<Option<AccessToken>, ConfigError> {
    spawn_callback_server(Arc::clone(&tokens), settings)?;

    if let Some(token) = tokens.get_token(location).await {
        return Ok(Some(token));
    }

    Ok(wait_for_token(&tokens).await)
}

/// Starts the callback server in the background.
///
/// Call this before anything can open the authorize page, so the redirect
/// always finds a listener. A bind failure is only logged: another discspot
/// process may already be listening and will store the token for us.
///
/// # Errors
///
/// Fails when the callback server address is not a valid socket address.
pub fn spawn_callback_server(
    tokens: Arc<TokenManager>,
    settings: &Settings,
) -> Result<(), ConfigError> {
    let addr = settings
        .server_addr
        .parse()
        .map_err(|_| ConfigError::Invalid {
            name: "SERVER_ADDRESS",
            value: settings.server_addr.clone(),
        })?;

    tokio::spawn(async move {
        if let Err(e) = start_api_server(addr, tokens).await {
            warning!("Callback server stopped. Err: {}", e);
        }
    });

    Ok(())
}

/// Polls the store behind `tokens` until a callback has delivered a token,
/// for at most two minutes.
///
/// The callback may land in this process (callback server) or in another one
/// (`discspot callback`), so the store is the only thing worth watching.
pub async fn wait_for_token(tokens: &TokenManager) -> Option<AccessToken> {
    let deadline = tokio::time::Instant::now() + CONSENT_WAIT;

    while tokio::time::Instant::now() < deadline {
        if let Some(token) = tokens.cached_token().await {
            return Some(token);
        }
        tokio::time::sleep(CONSENT_POLL).await;
    }

    None
}
