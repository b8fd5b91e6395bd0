use crate::{cli::context::services, error, info, utils};

/// Completes a consent flow from a pasted redirect URL.
///
/// For when the browser landed on the redirect URI while no callback server
/// was listening.
pub async fn callback(url: String) {
    let services = services();
    let params = utils::callback_params(&url);

    match services.tokens.on_callback_received(params).await {
        Ok(Some(return_url)) => info!("Continue at {}", return_url),
        Ok(None) => {}
        Err(e) => error!("Callback rejected. Err: {}", e),
    }
}
