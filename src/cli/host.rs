use std::{
    sync::{Mutex, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    info, success,
    traits::{PageExtractor, Renderer, TabOpener},
    types::{Anchor, CatalogQuery},
    utils, warning,
};

/// A "page" assembled from command-line arguments.
///
/// The title and artist go through the same cleanup a scraper would apply,
/// so `--title "The Beatles – Abbey Road (Remastered)"` works as expected.
pub struct CommandLinePage {
    location: String,
    query: CatalogQuery,
}

impl CommandLinePage {
    pub fn new(location: String, title: &str, artist: &str) -> Self {
        Self {
            location,
            query: utils::clean_release(title, artist),
        }
    }
}

#[async_trait]
impl PageExtractor for CommandLinePage {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn extract(&self) -> Option<CatalogQuery> {
        if self.query.title.is_empty() || self.query.artist.is_empty() {
            return None;
        }
        Some(self.query.clone())
    }

    fn find_anchor(&self) -> Anchor {
        Anchor("terminal".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum View {
    Hidden,
    Loading,
    Player(Option<String>),
    AuthPrompt,
}

struct Screen {
    view: View,
    spinner: Option<ProgressBar>,
}

/// Renders the pipeline's visible states to the terminal.
///
/// Tracks what is on screen so repeated calls print nothing new.
pub struct TerminalRenderer {
    screen: Mutex<Screen>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            screen: Mutex::new(Screen {
                view: View::Hidden,
                spinner: None,
            }),
        }
    }

    /// Switches to `view`; returns `false` when it is already showing.
    fn switch(&self, view: View) -> bool {
        let mut screen = self.screen.lock().unwrap_or_else(PoisonError::into_inner);
        if screen.view == view {
            return false;
        }

        if let Some(spinner) = screen.spinner.take() {
            spinner.finish_and_clear();
        }
        if view == View::Loading {
            let pb = ProgressBar::new_spinner();
            pb.set_message("Searching Spotify...");
            pb.enable_steady_tick(Duration::from_millis(100));
            if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
                pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
            }
            screen.spinner = Some(pb);
        }

        screen.view = view;
        true
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TerminalRenderer {
    fn show_loading(&self, _anchor: &Anchor) {
        self.switch(View::Loading);
    }

    fn show_player(&self, _anchor: &Anchor, album_id: Option<&str>) {
        if !self.switch(View::Player(album_id.map(str::to_string))) {
            return;
        }

        match album_id {
            Some(id) => {
                success!("Found on Spotify: https://open.spotify.com/album/{}", id);
                info!("Embed: {}", utils::embed_html(id));
            }
            None => warning!("{}", utils::NOT_FOUND_MESSAGE),
        }
    }

    fn show_auth_prompt(&self, _anchor: &Anchor) {
        if self.switch(View::AuthPrompt) {
            info!("Connect to Spotify to see if this release is available to stream.");
        }
    }
}

pub struct BrowserOpener;

impl TabOpener for BrowserOpener {
    fn open(&self, url: &str) -> Result<(), String> {
        webbrowser::open(url).map_err(|e| e.to_string())
    }
}
