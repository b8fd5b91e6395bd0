use tabled::Table;

use crate::{
    cli::context::services,
    error::ApiError,
    error, info,
    spotify::search::{score, search_strategies},
    types::{CandidateAlbum, CandidateTableRow, CatalogQuery},
    utils, warning,
};

/// Runs every search strategy for `title`/`artist` and tabulates how each
/// candidate scores.
///
/// Unlike `resolve` this does not stop at the first acceptable candidate,
/// so it shows why a release does or does not match.
pub async fn search(title: String, artist: String) {
    let services = services();
    let Some(token) = services.tokens.cached_token().await else {
        warning!("No valid Spotify token cached. Run `discspot auth` first.");
        return;
    };

    let query = utils::clean_release(&title, &artist);
    if query.title.is_empty() || query.artist.is_empty() {
        warning!("Both a title and an artist are required.");
        return;
    }
    info!("Cleaned up: {} by {}", query.title, query.artist);

    let matcher = services.matcher();
    let mut rows: Vec<CandidateTableRow> = Vec::new();

    for produce in search_strategies(&query) {
        let q = produce();
        info!("Searching: {}", q);

        match matcher.search(&q, &token.value).await {
            Ok(candidates) => rows.extend(
                candidates
                    .iter()
                    .map(|candidate| row(&q, &query, candidate)),
            ),
            Err(ApiError::AuthExpired) => {
                services.tokens.forget().await;
                error!("Spotify rejected the cached token. Run `discspot auth` to sign in again.");
            }
            Err(e) => warning!("Search failed for '{}'. Err: {}", q, e),
        }
    }

    if rows.is_empty() {
        warning!("{}", utils::NOT_FOUND_MESSAGE);
        return;
    }

    let table = Table::new(rows);
    println!("{}", table);
}

fn row(q: &str, query: &CatalogQuery, candidate: &CandidateAlbum) -> CandidateTableRow {
    let score = score(query, candidate);
    CandidateTableRow {
        query: q.to_string(),
        name: candidate.name.clone(),
        artist: candidate.artist_name.clone(),
        artist_sim: format!("{:.2}", score.artist),
        title_sim: format!("{:.2}", score.title),
        accepted: if score.accepted { "yes" } else { "no" }.to_string(),
        id: candidate.id.clone(),
    }
}
