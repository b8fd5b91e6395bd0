use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// A release title and artist as read from a catalog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub title: String,
    pub artist: String,
}

impl CatalogQuery {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

/// An album returned by the search endpoint, flattened for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateAlbum {
    pub id: String,
    pub name: String,
    pub artist_name: String,
}

impl From<SearchAlbum> for CandidateAlbum {
    fn from(album: SearchAlbum) -> Self {
        let artist_name = album
            .artists
            .into_iter()
            .next()
            .map(|a| a.name)
            .unwrap_or_default();

        Self {
            id: album.id,
            name: album.name,
            artist_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub albums: Option<SearchAlbumPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAlbumPage {
    #[serde(default)]
    pub items: Vec<SearchAlbum>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtist {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
}

/// An access token together with the moment it was handed to us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    /// Milliseconds since the Unix epoch.
    pub obtained_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthFlowState {
    #[default]
    NoToken,
    Cached,
    Authenticating,
    Valid,
}

/// Fields carried back in the fragment of the implicit-grant redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub access_token: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// What a single coordinator trigger ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Skipped,
    Redirect(String),
    NotApplicable,
    PageNotReady,
    NoRelease,
    AwaitingConsent,
    TokenRejected,
    Rendered(Option<String>),
}

/// Where a renderer should place its container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor(pub String);

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    /// Header names are lower-cased.
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[derive(Tabled)]
pub struct CandidateTableRow {
    pub query: String,
    pub name: String,
    pub artist: String,
    pub artist_sim: String,
    pub title_sim: String,
    pub accepted: String,
    pub id: String,
}
