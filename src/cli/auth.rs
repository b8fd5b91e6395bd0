use std::sync::Arc;

use crate::{cli::context::services, error, spotify, success, warning};

/// Runs the consent flow from scratch, replacing any cached token.
pub async fn auth() {
    let services = services();
    services.tokens.forget().await;

    match spotify::auth::auth(Arc::clone(&services.tokens), &services.settings, "").await {
        Ok(Some(_)) => success!("Authentication successful."),
        Ok(None) => warning!("Timed out waiting for the Spotify callback."),
        Err(e) => error!("Cannot start authentication. Err: {}", e),
    }
}

/// Deletes the cached token.
pub async fn logout() {
    services().tokens.forget().await;
    success!("Cached Spotify token removed.");
}
