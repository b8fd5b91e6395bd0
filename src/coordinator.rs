//! Drives one page through token acquisition, matching and rendering.
//!
//! A host calls [`Coordinator::trigger`] whenever something suggests the page
//! may need a player: first load, in-page navigation, a DOM burst. Only one run
//! is active at a time and bursts inside the debounce window are dropped, so a
//! noisy host never produces duplicate prompts or duplicate searches.

use std::sync::Arc;

use tokio::{sync::Mutex, time::Instant};

use crate::{
    config::Settings,
    error::CallbackError,
    info,
    management::{PipelineState, TokenManager},
    spotify::search::CatalogMatcher,
    traits::{PageExtractor, Renderer},
    types::{CallbackParams, InitOutcome},
    utils, warning,
};

pub struct Coordinator {
    page: Arc<dyn PageExtractor>,
    renderer: Arc<dyn Renderer>,
    tokens: Arc<TokenManager>,
    matcher: CatalogMatcher,
    settings: Settings,
    pipeline: Mutex<PipelineState>,
}

impl Coordinator {
    pub fn new(
        page: Arc<dyn PageExtractor>,
        renderer: Arc<dyn Renderer>,
        tokens: Arc<TokenManager>,
        matcher: CatalogMatcher,
        settings: Settings,
    ) -> Self {
        Self {
            page,
            renderer,
            tokens,
            matcher,
            settings,
            pipeline: Mutex::new(PipelineState::new()),
        }
    }

    /// True when the last run left a consent flow open, either because no
    /// token was cached or because the cached one was rejected. The host
    /// should wait for the callback and trigger again.
    pub async fn awaiting_consent(&self) -> bool {
        self.tokens.is_authenticating().await
    }

    pub async fn is_initializing(&self) -> bool {
        self.pipeline.lock().await.is_initializing()
    }

    /// Entry point for a regular page load.
    ///
    /// Runs the pipeline unless a run is already active or the last accepted
    /// trigger was less than the debounce window ago, in which case it returns
    /// [`InitOutcome::Skipped`] without touching anything.
    pub async fn trigger(&self) -> InitOutcome {
        {
            let mut pipeline = self.pipeline.lock().await;
            if !pipeline.try_begin(Instant::now(), self.settings.init_debounce) {
                info!("Initialization already in progress or too soon, skipping");
                return InitOutcome::Skipped;
            }
        }

        let location = self.page.location();
        info!("Initializing... {}", location);

        if utils::is_callback_page(&location) {
            let params = utils::callback_params(&location);
            if params.access_token.is_some() {
                match self.callback_entry(params).await {
                    Ok(Some(return_url)) => return InitOutcome::Redirect(return_url),
                    Ok(None) => {}
                    Err(e) => warning!("Callback rejected. Err: {}", e),
                }
            }
        }

        if !utils::is_catalog_page(&location) {
            self.finish().await;
            return InitOutcome::NotApplicable;
        }

        if !self
            .page
            .wait_until_ready(self.settings.page_load_timeout)
            .await
        {
            warning!("Page not fully loaded after {:?}", self.settings.page_load_timeout);
            self.finish().await;
            return InitOutcome::PageNotReady;
        }

        let Some(query) = self
            .page
            .extract()
            .filter(|q| !q.title.is_empty() && !q.artist.is_empty())
        else {
            warning!("Missing title or artist on {}", location);
            self.finish().await;
            return InitOutcome::NoRelease;
        };
        info!("Extracted: {} by {}", query.title, query.artist);

        let anchor = self.page.find_anchor();

        // No token means a consent flow is pending. The run stays claimed
        // until the callback arrives or the page goes away.
        let Some(token) = self.tokens.get_token(&location).await else {
            self.renderer.show_auth_prompt(&anchor);
            return InitOutcome::AwaitingConsent;
        };

        if !self.tokens.validate(&token).await {
            if self.tokens.get_token(&location).await.is_none() {
                self.renderer.show_auth_prompt(&anchor);
            }
            self.finish().await;
            return InitOutcome::TokenRejected;
        }

        self.renderer.show_loading(&anchor);
        let album_id = self.matcher.resolve(&query, &token.value).await;
        self.renderer.show_player(&anchor, album_id.as_deref());
        self.finish().await;

        InitOutcome::Rendered(album_id)
    }

    /// Entry point for the OAuth callback context.
    ///
    /// Stores the token and hands back the page to return to, if the consent
    /// flow recorded one. Without a return page the pipeline is released so
    /// the next trigger can run with the new token.
    ///
    /// # Errors
    ///
    /// See [`TokenManager::on_callback_received`].
    pub async fn callback_entry(
        &self,
        params: CallbackParams,
    ) -> Result<Option<String>, CallbackError> {
        let return_url = self.tokens.on_callback_received(params).await?;
        if return_url.is_none() {
            self.finish().await;
        }
        Ok(return_url)
    }

    /// The page context went away: forget the active run, the debounce window
    /// and any pending consent flow.
    pub async fn on_navigation(&self) {
        self.pipeline.lock().await.clear();
        self.tokens.reset().await;
    }

    async fn finish(&self) {
        self.pipeline.lock().await.finish();
    }
}
