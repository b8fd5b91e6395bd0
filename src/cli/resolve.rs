use std::sync::Arc;

use crate::{
    cli::{
        context::services,
        host::{CommandLinePage, TerminalRenderer},
    },
    coordinator::Coordinator,
    error, info, spotify,
    types::InitOutcome,
    warning,
};

/// Resolves a Discogs page to a Spotify album and prints the player.
///
/// `title` is the page heading as shown on Discogs, `artist` the linked
/// artist. When the run leaves a consent flow open, whether no token was
/// cached or the cached one was rejected, the pipeline is retried once the
/// token arrives.
pub async fn resolve(url: String, title: String, artist: String) {
    let services = services();
    let page = Arc::new(CommandLinePage::new(url.clone(), &title, &artist));
    let coordinator = Coordinator::new(
        page,
        Arc::new(TerminalRenderer::new()),
        Arc::clone(&services.tokens),
        services.matcher(),
        services.settings.clone(),
    );

    let server_tokens = Arc::clone(&services.tokens);
    if let Err(e) = spotify::auth::spawn_callback_server(server_tokens, &services.settings) {
        error!("Cannot start callback server. Err: {}", e);
    }

    let mut outcome = coordinator.trigger().await;

    if coordinator.awaiting_consent().await {
        info!("Waiting for Spotify authorization in the browser...");
        if spotify::auth::wait_for_token(&services.tokens).await.is_none() {
            error!("Timed out waiting for the Spotify callback.");
        }

        coordinator.on_navigation().await;
        outcome = coordinator.trigger().await;
    }

    report(&url, outcome);
}

fn report(url: &str, outcome: InitOutcome) {
    match outcome {
        InitOutcome::Rendered(_) | InitOutcome::Skipped => {}
        InitOutcome::Redirect(return_url) => info!("Continue at {}", return_url),
        InitOutcome::NotApplicable => {
            warning!("{} is not a Discogs release or master page.", url)
        }
        InitOutcome::PageNotReady => warning!("Page did not become ready in time."),
        InitOutcome::NoRelease => warning!("Both a title and an artist are required."),
        InitOutcome::AwaitingConsent => warning!("Still waiting for Spotify authorization."),
        InitOutcome::TokenRejected => {
            warning!("Spotify rejected the cached token. Run `discspot auth` to sign in again.")
        }
    }
}
