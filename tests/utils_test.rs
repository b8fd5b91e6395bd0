use std::time::Duration;

use discspot::utils::*;

const RELEASE_URL_WITHOUT_FRAGMENT: &str = "https://www.discogs.com/release/1234";

#[test]
fn test_similarity_empty_input() {
    assert_eq!(similarity("", "Abbey Road"), 0.0);
    assert_eq!(similarity("Abbey Road", ""), 0.0);
}

#[test]
fn test_similarity_ignores_case_stopwords_and_punctuation() {
    assert_eq!(similarity("The Beatles", "beatles"), 1.0);
    assert_eq!(similarity("Sgt. Pepper's", "sgt peppers"), 1.0);
    assert_eq!(similarity("Björk", "BJÖRK"), 1.0);
    assert_eq!(
        similarity("Dark Side of the Moon", "The Dark Side Of The Moon"),
        1.0
    );
}

#[test]
fn test_similarity_containment() {
    assert_eq!(similarity("Abbey Road", "Abbey Road (Remastered)"), 0.8);
    assert_eq!(similarity("Abbey Road (Remastered)", "Abbey Road"), 0.8);
}

#[test]
fn test_similarity_too_short() {
    assert_eq!(similarity("x", "xy"), 0.0);
    // "a" is a stopword and normalizes to nothing
    assert_eq!(similarity("a", "ab"), 0.0);
}

#[test]
fn test_similarity_word_overlap() {
    // dark, moon shared; larger side has four words
    assert_eq!(similarity("Dark Side Moon", "Dark Star Moon Light"), 0.5);
    assert_eq!(similarity("Completely Different", "Classic Hits"), 0.0);
}

#[test]
fn test_similarity_is_symmetric_and_bounded() {
    let pairs = [
        ("Kind of Blue", "Blue Train"),
        ("OK Computer", "OK Computer OKNOTOK"),
        ("Nevermind", "Never Mind the Bollocks"),
    ];

    for (a, b) in pairs {
        let ab = similarity(a, b);
        assert_eq!(ab, similarity(b, a));
        assert!((0.0..=1.0).contains(&ab));
    }
}

#[test]
fn test_is_various_artists() {
    for artist in ["Various", "various artists", "VA", "V/A", "v a", "Compilation", " Various "] {
        assert!(is_various_artists(artist), "{artist}");
    }
    for artist in ["", "Vanilla Fudge", "Various Artists Orchestra", "The Beatles"] {
        assert!(!is_various_artists(artist), "{artist}");
    }
}

#[test]
fn test_first_words() {
    assert_eq!(first_words("Now That's What I Call Music", 3), "Now That's What");
    assert_eq!(first_words("Abbey", 3), "Abbey");
}

#[test]
fn test_parse_retry_after() {
    assert_eq!(parse_retry_after(Some("5")), Duration::from_secs(5));
    assert_eq!(parse_retry_after(Some(" 7 ")), Duration::from_secs(7));
    assert_eq!(parse_retry_after(Some("soon")), Duration::from_secs(1));
    assert_eq!(parse_retry_after(None), Duration::from_secs(1));
    assert_eq!(
        parse_retry_after(Some("99999999999999999999999")),
        Duration::from_secs(u64::MAX)
    );
}

#[test]
fn test_clean_release_strips_artist_and_suffixes() {
    let query = clean_release("The Beatles – Abbey Road (Remastered)", "The Beatles");
    assert_eq!(query.title, "Abbey Road");
    assert_eq!(query.artist, "The Beatles");

    let query = clean_release("Nirvana – Nevermind [Deluxe]", "Nirvana (2)");
    assert_eq!(query.title, "Nevermind");
    assert_eq!(query.artist, "Nirvana");
}

#[test]
fn test_clean_release_without_artist_in_heading() {
    let query = clean_release("  Kind Of Blue  ", "Miles Davis");
    assert_eq!(query.title, "Kind Of Blue");
}

#[test]
fn test_is_catalog_page() {
    assert!(is_catalog_page("https://www.discogs.com/release/1234-Abbey-Road"));
    assert!(is_catalog_page("https://www.discogs.com/master/24047"));
    assert!(!is_catalog_page("https://www.discogs.com/artist/82730"));
    assert!(!is_catalog_page("https://discogs.com/release/1234"));
    assert!(!is_catalog_page("not a url"));
}

#[test]
fn test_callback_params() {
    let url = "http://127.0.0.1:8888/callback#access_token=abc&token_type=Bearer&expires_in=3600&state=xyz";
    assert!(is_callback_page(url));

    let params = callback_params(url);
    assert_eq!(params.access_token.as_deref(), Some("abc"));
    assert_eq!(params.state.as_deref(), Some("xyz"));
    assert_eq!(params.error, None);

    assert_eq!(callback_params(RELEASE_URL_WITHOUT_FRAGMENT).access_token, None);
}

#[test]
fn test_parse_fragment_with_error() {
    let params = parse_fragment("#error=access_denied&state=s1");
    assert_eq!(params.error.as_deref(), Some("access_denied"));
    assert_eq!(params.state.as_deref(), Some("s1"));
    assert_eq!(params.access_token, None);
}

#[test]
fn test_generate_state() {
    let state = generate_state();
    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_embed() {
    assert_eq!(embed_url("abc123"), "https://open.spotify.com/embed/album/abc123");
    assert!(embed_html("abc123").contains(r#"src="https://open.spotify.com/embed/album/abc123""#));
}
