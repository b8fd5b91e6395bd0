use std::{net::SocketAddr, sync::Arc};

use axum::{Extension, Router, routing::get};

use crate::{api, info, management::TokenManager};

/// Serves the OAuth callback endpoints until the process ends.
///
/// # Errors
///
/// Fails when `addr` cannot be bound.
pub async fn start_api_server(addr: SocketAddr, tokens: Arc<TokenManager>) -> std::io::Result<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .route("/token", get(api::token).layer(Extension(tokens)));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Waiting for Spotify callback on http://{}", addr);
    axum::serve(listener, app).await
}
