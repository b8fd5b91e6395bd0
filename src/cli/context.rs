use std::sync::Arc;

use crate::{
    Res,
    cli::host::BrowserOpener,
    config::Settings,
    error,
    management::{FileStore, TokenManager},
    spotify::{client::SpotifyClient, search::CatalogMatcher, transport::ReqwestTransport},
};

/// Everything a command needs, wired against the real network, disk and
/// browser.
pub struct Services {
    pub settings: Settings,
    pub client: Arc<SpotifyClient>,
    pub tokens: Arc<TokenManager>,
}

impl Services {
    pub fn matcher(&self) -> CatalogMatcher {
        CatalogMatcher::new(Arc::clone(&self.client))
    }
}

/// Builds [`Services`] from the environment. Exits on bad configuration.
pub fn services() -> Services {
    match build() {
        Ok(services) => services,
        Err(e) => error!("Cannot set up discspot. Err: {}", e),
    }
}

fn build() -> Res<Services> {
    let settings = Settings::from_env()?;
    let transport = ReqwestTransport::new(&settings)?;

    let client = Arc::new(SpotifyClient::new(Arc::new(transport), &settings));
    let tokens = Arc::new(TokenManager::new(
        Arc::clone(&client),
        Arc::new(FileStore::open_default()),
        Arc::new(BrowserOpener),
        settings.clone(),
    ));

    Ok(Services {
        settings,
        client,
        tokens,
    })
}
