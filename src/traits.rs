//! Seams to the environment the pipeline runs in.
//!
//! The core never talks to a browser, a disk or a socket directly. Hosts plug
//! in implementations of these traits: the CLI ships terminal and file backed
//! ones, the tests ship scripted fakes.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, sleep};

use crate::{
    error::{StoreError, TransportError},
    types::{Anchor, CatalogQuery, HttpRequest, HttpResponse},
};

const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Performs raw HTTP exchanges. Status codes are not interpreted here.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Key-value storage that outlives a single page context.
#[async_trait]
pub trait PersistentStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads the catalog entry off the current page.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Full URL of the current page, fragment included.
    fn location(&self) -> String;

    fn is_ready(&self) -> bool;

    fn extract(&self) -> Option<CatalogQuery>;

    fn find_anchor(&self) -> Anchor;

    /// Resolves to `true` as soon as the page is ready, or to the final
    /// readiness once `timeout` has passed.
    async fn wait_until_ready(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.is_ready() {
                return true;
            }
            if Instant::now() >= deadline {
                return self.is_ready();
            }
            sleep(READY_POLL_INTERVAL).await;
        }
    }
}

/// Shows one of the pipeline's visible states. Every call replaces whatever
/// was shown before, and repeating a call is harmless.
pub trait Renderer: Send + Sync {
    fn show_loading(&self, anchor: &Anchor);

    /// `None` renders the not-found message.
    fn show_player(&self, anchor: &Anchor, album_id: Option<&str>);

    fn show_auth_prompt(&self, anchor: &Anchor);
}

pub trait TabOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), String>;
}
