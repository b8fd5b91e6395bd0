use std::sync::Arc;

use url::Url;

use crate::{
    error::ApiError,
    info,
    spotify::client::SpotifyClient,
    success,
    types::{CandidateAlbum, CatalogQuery, SearchResponse},
    utils, warning,
};

const SEARCH_LIMIT: &str = "10";
const SHORT_TITLE_WORDS: usize = 3;

/// Produces one search query on demand.
pub type QueryProducer<'a> = Box<dyn Fn() -> String + Send + Sync + 'a>;

/// Builds the ordered search queries for a catalog entry.
///
/// Compilations are searched by title alone, since the artist string names
/// no performer:
///
/// ```text
/// album:<title>
/// <first three words of title>
/// <title>
/// ```
///
/// Anything else starts with field filters and loosens up:
///
/// ```text
/// album:<title> artist:<artist>
/// artist:<artist> <first three words of title>
/// <artist> <title>
/// ```
///
/// Producers are only called when the previous query found nothing.
pub fn search_strategies(query: &CatalogQuery) -> Vec<QueryProducer<'_>> {
    let title = query.title.as_str();
    let artist = query.artist.as_str();

    if utils::is_various_artists(artist) {
        vec![
            Box::new(move || format!("album:{title}")) as QueryProducer<'_>,
            Box::new(move || utils::first_words(title, SHORT_TITLE_WORDS)),
            Box::new(move || title.to_string()),
        ]
    } else {
        vec![
            Box::new(move || format!("album:{title} artist:{artist}")) as QueryProducer<'_>,
            Box::new(move || {
                format!(
                    "artist:{artist} {}",
                    utils::first_words(title, SHORT_TITLE_WORDS)
                )
            }),
            Box::new(move || format!("{artist} {title}")),
        ]
    }
}

/// Similarities of one candidate against the catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    pub artist: f64,
    pub title: f64,
    pub accepted: bool,
}

/// Scores `candidate` and applies the acceptance rule.
///
/// Compilations only need `title > 0.6`. Everything else needs
/// `(artist > 0.8 && title > 0.6) || (artist > 0.7 && title > 0.8)`.
pub fn score(query: &CatalogQuery, candidate: &CandidateAlbum) -> MatchScore {
    let artist = utils::similarity(&query.artist, &candidate.artist_name);
    let title = utils::similarity(&query.title, &candidate.name);

    let accepted = if utils::is_various_artists(&query.artist) {
        title > 0.6
    } else {
        (artist > 0.8 && title > 0.6) || (artist > 0.7 && title > 0.8)
    };

    MatchScore {
        artist,
        title,
        accepted,
    }
}

/// Resolves catalog entries to Spotify album ids.
#[derive(Clone)]
pub struct CatalogMatcher {
    client: Arc<SpotifyClient>,
}

impl CatalogMatcher {
    pub fn new(client: Arc<SpotifyClient>) -> Self {
        Self { client }
    }

    /// Runs one album search and flattens the results.
    ///
    /// # Errors
    ///
    /// Whatever [`SpotifyClient::request`] fails with.
    pub async fn search(&self, q: &str, token: &str) -> Result<Vec<CandidateAlbum>, ApiError> {
        let url = Url::parse_with_params(
            &format!("{}/search", self.client.api_url()),
            &[("q", q), ("type", "album"), ("limit", SEARCH_LIMIT)],
        )?;

        let response: SearchResponse = self.client.get(url.as_str(), token).await?;

        Ok(response
            .albums
            .map(|page| page.items.into_iter().map(CandidateAlbum::from).collect())
            .unwrap_or_default())
    }

    /// Tries each search strategy in turn and returns the first accepted
    /// album id.
    ///
    /// A failing search is logged and the next strategy is tried. `None`
    /// means no strategy produced an acceptable candidate.
    pub async fn resolve(&self, query: &CatalogQuery, token: &str) -> Option<String> {
        if query.title.is_empty() || query.artist.is_empty() {
            return None;
        }

        for produce in search_strategies(query) {
            let q = produce();
            info!("Searching: {}", q);

            let candidates = match self.search(&q, token).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    warning!("Search failed for '{}'. Err: {}", q, e);
                    continue;
                }
            };

            if let Some(album) = candidates.iter().find(|c| score(query, c).accepted) {
                success!("Match found: {} ({})", album.name, album.id);
                return Some(album.id.clone());
            }
        }

        None
    }
}
