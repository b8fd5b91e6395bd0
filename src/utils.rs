use std::{collections::HashSet, sync::LazyLock, time::Duration};

use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use url::Url;

use crate::types::{CallbackParams, CatalogQuery};

pub const NOT_FOUND_MESSAGE: &str = "Release not found on Spotify";

const CATALOG_HOST: &str = "www.discogs.com";
const EMBED_ALBUM_URL: &str = "https://open.spotify.com/embed/album";

static STOPWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:the|a|an|and|or|but|in|on|at|to|for|of|with|by)\b")
        .expect("stopword pattern is valid")
});
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("punctuation pattern is valid"));
static VARIOUS_ARTISTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:various|various artists|v[\s/]?a|compilation|various producers)$")
        .expect("various artists pattern is valid")
});
static ARTIST_COUNTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[(\[]\d+[)\]]").expect("counter pattern is valid"));
static HEADING_EDGES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-–—:,\s]+|[-–—:,\s]+$").expect("edge pattern is valid"));
static TRAILING_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]+\)\s*$").expect("parens pattern is valid"));
static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\[[^\]]+\]\s*").expect("bracket pattern is valid"));

/// Lower-cases `input`, drops stopwords and punctuation, and trims the result.
///
/// Whitespace inside the string is left untouched, so removed stopwords may
/// leave runs of spaces behind. Word splitting in [`similarity`] copes with that.
pub fn normalize(input: &str) -> String {
    let lower = input.to_lowercase();
    let without_stopwords = STOPWORDS.replace_all(&lower, "");
    let without_punctuation = PUNCTUATION.replace_all(&without_stopwords, "");
    without_punctuation.trim().to_string()
}

/// Scores how alike two free-text names are, from `0.0` to `1.0`.
///
/// Rules are applied in order and the first one that fires wins:
///
/// 1. either input empty: `0.0`
/// 2. equal after [`normalize`]: `1.0`
/// 3. either normalized side shorter than two characters: `0.0`
/// 4. one normalized side contains the other: `0.8`
/// 5. otherwise the share of distinct words (longer than one character) found on
///    both sides, over the larger word set
///
/// The acceptance thresholds in [`crate::spotify::search`] are tuned against these
/// exact values.
pub fn similarity(s1: &str, s2: &str) -> f64 {
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }

    let n1 = normalize(s1);
    let n2 = normalize(s2);

    if n1 == n2 {
        return 1.0;
    }
    if n1.chars().count() < 2 || n2.chars().count() < 2 {
        return 0.0;
    }
    if n1.contains(&n2) || n2.contains(&n1) {
        return 0.8;
    }

    let words1: HashSet<&str> = n1.split_whitespace().collect();
    let words2: HashSet<&str> = n2.split_whitespace().collect();
    let common = words1
        .iter()
        .filter(|w| words2.contains(*w) && w.chars().count() > 1)
        .count();

    common as f64 / words1.len().max(words2.len()) as f64
}

/// True when `artist` names a multi-artist release rather than a performer.
pub fn is_various_artists(artist: &str) -> bool {
    let artist = artist.trim();
    !artist.is_empty() && VARIOUS_ARTISTS.is_match(artist)
}

/// First `count` space-separated words of `text`.
pub fn first_words(text: &str, count: usize) -> String {
    text.split(' ').take(count).collect::<Vec<_>>().join(" ")
}

/// Reads a `retry-after` header value, falling back to one second.
pub fn parse_retry_after(value: Option<&str>) -> Duration {
    let secs = value
        .map(str::trim)
        .and_then(|v| {
            let digits: String = v.chars().take_while(char::is_ascii_digit).collect();
            match digits.parse::<u64>() {
                Ok(secs) => Some(secs),
                // too many digits for u64
                Err(_) if !digits.is_empty() => Some(u64::MAX),
                Err(_) => None,
            }
        })
        .unwrap_or(1);

    Duration::from_secs(secs)
}

/// Cleans the heading and artist text scraped from a release page.
///
/// Discogs headings usually read `Artist – Title (Remastered)`; the artist
/// link may carry a disambiguation counter such as `Nirvana (2)`.
pub fn clean_release(heading: &str, artist: &str) -> CatalogQuery {
    let artist = ARTIST_COUNTER.replace_all(artist.trim(), "").trim().to_string();

    let mut title = heading.trim().to_string();
    if !artist.is_empty() && title.contains(&artist) {
        title = title.replacen(&artist, "", 1).trim().to_string();
    }

    let title = HEADING_EDGES.replace_all(&title, "");
    let title = TRAILING_PARENS.replace_all(&title, "");
    let title = BRACKETED.replace_all(&title, " ");

    CatalogQuery::new(title.trim(), artist)
}

pub fn is_catalog_page(location: &str) -> bool {
    let Ok(url) = Url::parse(location) else {
        return false;
    };

    url.host_str() == Some(CATALOG_HOST)
        && (url.path().contains("/release/") || url.path().contains("/master/"))
}

pub fn is_callback_page(location: &str) -> bool {
    Url::parse(location)
        .map(|url| url.path().contains("/callback"))
        .unwrap_or(false)
}

/// Parses the fragment of an implicit-grant redirect URL.
pub fn callback_params(location: &str) -> CallbackParams {
    Url::parse(location)
        .ok()
        .and_then(|url| url.fragment().map(parse_fragment))
        .unwrap_or_default()
}

/// Parses a form-encoded fragment, with or without its leading `#`.
pub fn parse_fragment(fragment: &str) -> CallbackParams {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let mut params = CallbackParams::default();

    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        let value = Some(value.into_owned()).filter(|v| !v.is_empty());
        match key.as_ref() {
            "access_token" => params.access_token = value,
            "state" => params.state = value,
            "error" => params.error = value,
            _ => {}
        }
    }

    params
}

pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

pub fn embed_url(album_id: &str) -> String {
    format!("{EMBED_ALBUM_URL}/{album_id}")
}

pub fn embed_html(album_id: &str) -> String {
    format!(
        r#"<iframe src="{src}" width="100%" height="80" frameborder="0" allowtransparency="true" allow="encrypted-media"></iframe>"#,
        src = embed_url(album_id)
    )
}
