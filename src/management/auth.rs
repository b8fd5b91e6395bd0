use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    config::Settings,
    error::CallbackError,
    info,
    spotify::{self, client::SpotifyClient},
    success,
    traits::{PersistentStore, TabOpener},
    types::{AccessToken, AuthFlowState, CallbackParams},
    utils, warning,
};

pub const TOKEN_KEY: &str = "spotify_token";
pub const TOKEN_TIMESTAMP_KEY: &str = "token_timestamp";
pub const RETURN_URL_KEY: &str = "return_url";
pub const OAUTH_STATE_KEY: &str = "oauth_state";

/// Owns the access token and the consent flow that produces it.
///
/// ```text
/// NoToken ──get_token──▶ Authenticating ──callback──▶ Cached ──validate──▶ Valid
///    ▲                                                  │
///    └──────────────── validate fails / too old ────────┘
/// ```
///
/// While `Authenticating`, [`TokenManager::get_token`] answers `None` without
/// launching a second consent flow.
pub struct TokenManager {
    client: Arc<SpotifyClient>,
    store: Arc<dyn PersistentStore>,
    opener: Arc<dyn TabOpener>,
    settings: Settings,
    state: Mutex<AuthFlowState>,
}

impl TokenManager {
    pub fn new(
        client: Arc<SpotifyClient>,
        store: Arc<dyn PersistentStore>,
        opener: Arc<dyn TabOpener>,
        settings: Settings,
    ) -> Self {
        TokenManager {
            client,
            store,
            opener,
            settings,
            state: Mutex::new(AuthFlowState::NoToken),
        }
    }

    pub async fn state(&self) -> AuthFlowState {
        *self.state.lock().await
    }

    pub async fn is_authenticating(&self) -> bool {
        self.state().await == AuthFlowState::Authenticating
    }

    /// Returns a usable token, or launches the consent flow and returns `None`.
    ///
    /// `location` is recorded so the callback can send the user back to it.
    pub async fn get_token(&self, location: &str) -> Option<AccessToken> {
        if self.is_authenticating().await {
            return None;
        }

        if let Some(token) = self.cached_token().await {
            let mut state = self.state.lock().await;
            if *state != AuthFlowState::Valid {
                *state = AuthFlowState::Cached;
            }
            return Some(token);
        }

        self.forget().await;

        {
            let mut state = self.state.lock().await;
            if *state == AuthFlowState::Authenticating {
                return None;
            }
            *state = AuthFlowState::Authenticating;
        }

        self.launch_consent(location).await;
        None
    }

    /// Reads the persisted token without side effects on the flow state.
    ///
    /// A token past its maximum age is deleted on the spot and never returned.
    pub async fn cached_token(&self) -> Option<AccessToken> {
        let value = self.read(TOKEN_KEY).await?;
        let obtained_at = self
            .read(TOKEN_TIMESTAMP_KEY)
            .await
            .and_then(|ts| ts.parse::<i64>().ok());

        let Some(obtained_at) = obtained_at else {
            self.forget().await;
            return None;
        };

        let max_age = i64::try_from(self.settings.token_max_age.as_millis()).unwrap_or(i64::MAX);
        let age = Utc::now().timestamp_millis().checked_sub(obtained_at);
        if !age.is_some_and(|age| (0..max_age).contains(&age)) {
            info!(
                "Cached token is older than {:?} or has a bogus timestamp, dropping it",
                self.settings.token_max_age
            );
            self.forget().await;
            return None;
        }

        Some(AccessToken { value, obtained_at })
    }

    /// Checks `token` against the API.
    ///
    /// Any failure, not just `401`, counts as invalid: the persisted token is
    /// deleted and the caller has to go through [`TokenManager::get_token`]
    /// again.
    pub async fn validate(&self, token: &AccessToken) -> bool {
        match spotify::auth::current_user(&self.client, &token.value).await {
            Ok(user) => {
                info!("Token valid for user {}", user.id);
                *self.state.lock().await = AuthFlowState::Valid;
                true
            }
            Err(e) => {
                warning!("Token validation failed. Err: {}", e);
                self.forget().await;
                let mut state = self.state.lock().await;
                if *state != AuthFlowState::Authenticating {
                    *state = AuthFlowState::NoToken;
                }
                false
            }
        }
    }

    /// Stores the token delivered by the implicit-grant redirect.
    ///
    /// Returns the page the consent flow was started from, if one was
    /// recorded. It is handed out once; the record is cleared.
    ///
    /// # Errors
    ///
    /// - [`CallbackError::Denied`] when the user refused consent
    /// - [`CallbackError::MissingToken`] when the fragment has no token
    /// - [`CallbackError::StateMismatch`] when the `state` does not match the
    ///   pending request; nothing is stored in that case
    /// - [`CallbackError::Store`] when the store fails
    pub async fn on_callback_received(
        &self,
        params: CallbackParams,
    ) -> Result<Option<String>, CallbackError> {
        if let Some(error) = params.error {
            return Err(CallbackError::Denied(error));
        }
        let token = params.access_token.ok_or(CallbackError::MissingToken)?;

        if let Some(expected) = self.store.get(OAUTH_STATE_KEY).await? {
            if params.state.as_deref() != Some(expected.as_str()) {
                return Err(CallbackError::StateMismatch);
            }
            self.store.delete(OAUTH_STATE_KEY).await?;
        }

        self.store.set(TOKEN_KEY, &token).await?;
        self.store
            .set(
                TOKEN_TIMESTAMP_KEY,
                &Utc::now().timestamp_millis().to_string(),
            )
            .await?;
        *self.state.lock().await = AuthFlowState::Cached;
        success!("Spotify token received");

        let return_url = self.store.get(RETURN_URL_KEY).await?;
        if return_url.is_some() {
            self.store.delete(RETURN_URL_KEY).await?;
        }

        Ok(return_url.filter(|url| !url.is_empty()))
    }

    /// Back to `NoToken`, as when the page context goes away.
    pub async fn reset(&self) {
        *self.state.lock().await = AuthFlowState::NoToken;
    }

    /// Deletes the persisted token.
    pub async fn forget(&self) {
        for key in [TOKEN_KEY, TOKEN_TIMESTAMP_KEY] {
            if let Err(e) = self.store.delete(key).await {
                warning!("Failed to delete {} from store. Err: {}", key, e);
            }
        }
    }

    async fn launch_consent(&self, location: &str) {
        let state = utils::generate_state();
        for (key, value) in [(RETURN_URL_KEY, location), (OAUTH_STATE_KEY, state.as_str())] {
            if let Err(e) = self.store.set(key, value).await {
                warning!("Failed to save {} to store. Err: {}", key, e);
            }
        }

        let auth_url = match spotify::auth::authorize_url(&self.settings, &state) {
            Ok(url) => url,
            Err(e) => {
                warning!("Cannot build authorize URL from {}. Err: {}", self.settings.auth_url, e);
                return;
            }
        };

        if let Err(e) = self.opener.open(&auth_url) {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}\nErr: {}",
                auth_url,
                e
            );
        }
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warning!("Failed to read {} from store. Err: {}", key, e);
                None
            }
        }
    }
}
