#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use chrono::Utc;
use discspot::{
    config::Settings,
    coordinator::Coordinator,
    error::{StoreError, TransportError},
    management::{TOKEN_KEY, TOKEN_TIMESTAMP_KEY, TokenManager},
    spotify::{client::SpotifyClient, search::CatalogMatcher},
    traits::{HttpTransport, PageExtractor, PersistentStore, Renderer, TabOpener},
    types::{Anchor, CatalogQuery, HttpRequest, HttpResponse},
};

pub const RELEASE_URL: &str = "https://www.discogs.com/release/1234-The-Beatles-Abbey-Road";

type Responder = Box<dyn FnMut(&HttpRequest) -> Result<HttpResponse, TransportError> + Send>;

/// Transport answering from a script or a routing function, recording every
/// request it sees.
pub struct FakeTransport {
    responder: Mutex<Responder>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    /// Answers with `responses` in order, then with 500s.
    pub fn scripted(responses: Vec<Result<HttpResponse, TransportError>>) -> Arc<Self> {
        let mut queue = VecDeque::from(responses);
        Self::routed(move |_| queue.pop_front().unwrap_or_else(|| Ok(json(500, "{}"))))
    }

    pub fn routed(
        f: impl FnMut(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Mutex::new(Box::new(f)),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responder = self.responder.lock().unwrap();
        (*responder)(&request)
    }
}

pub fn json(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: HashMap::new(),
        body: body.to_string(),
    }
}

pub fn rate_limited(retry_after: &str) -> HttpResponse {
    HttpResponse {
        status: 429,
        headers: HashMap::from([("retry-after".to_string(), retry_after.to_string())]),
        body: String::new(),
    }
}

pub fn albums(items: &[(&str, &str, &str)]) -> HttpResponse {
    let items: Vec<serde_json::Value> = items
        .iter()
        .map(|(id, name, artist)| {
            serde_json::json!({
                "id": id,
                "name": name,
                "artists": [{ "id": format!("{id}-artist"), "name": artist }],
            })
        })
        .collect();

    json(200, &serde_json::json!({ "albums": { "items": items } }).to_string())
}

/// Routes `/me` to a profile and `/search` to `search`.
pub fn spotify_api(search: HttpResponse) -> Arc<FakeTransport> {
    FakeTransport::routed(move |request| {
        if request.url.ends_with("/me") {
            Ok(json(200, r#"{"id":"user-1","display_name":"Tester"}"#))
        } else {
            Ok(search.clone())
        }
    })
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store holding a token obtained `age` ago.
    pub fn with_token(value: &str, age: chrono::Duration) -> Arc<Self> {
        let store = Self::new();
        store.put(TOKEN_KEY, value);
        store.put(
            TOKEN_TIMESTAMP_KEY,
            &(Utc::now() - age).timestamp_millis().to_string(),
        );
        store
    }

    pub fn put(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl PersistentStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.put(key, value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl TabOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), String> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<String>>,
}

impl RecordingRenderer {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn show_loading(&self, _anchor: &Anchor) {
        self.events.lock().unwrap().push("loading".to_string());
    }

    fn show_player(&self, _anchor: &Anchor, album_id: Option<&str>) {
        self.events
            .lock()
            .unwrap()
            .push(format!("player:{}", album_id.unwrap_or("not-found")));
    }

    fn show_auth_prompt(&self, _anchor: &Anchor) {
        self.events.lock().unwrap().push("auth-prompt".to_string());
    }
}

pub struct FakePage {
    location: String,
    ready: AtomicBool,
    query: Option<CatalogQuery>,
}

impl FakePage {
    pub fn new(location: &str, query: Option<CatalogQuery>) -> Arc<Self> {
        Arc::new(Self {
            location: location.to_string(),
            ready: AtomicBool::new(true),
            query,
        })
    }

    pub fn abbey_road() -> Arc<Self> {
        Self::new(RELEASE_URL, Some(CatalogQuery::new("Abbey Road", "The Beatles")))
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }
}

#[async_trait]
impl PageExtractor for FakePage {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn extract(&self) -> Option<CatalogQuery> {
        self.query.clone()
    }

    fn find_anchor(&self) -> Anchor {
        Anchor("h1".to_string())
    }
}

pub fn client(transport: Arc<FakeTransport>) -> Arc<SpotifyClient> {
    Arc::new(SpotifyClient::new(transport, &Settings::default()))
}

pub fn token_manager(
    transport: Arc<FakeTransport>,
    store: Arc<MemoryStore>,
    opener: Arc<RecordingOpener>,
) -> TokenManager {
    TokenManager::new(client(transport), store, opener, Settings::default())
}

/// A coordinator wired entirely against fakes.
pub struct Harness {
    pub coordinator: Coordinator,
    pub tokens: Arc<TokenManager>,
    pub transport: Arc<FakeTransport>,
    pub store: Arc<MemoryStore>,
    pub opener: Arc<RecordingOpener>,
    pub renderer: Arc<RecordingRenderer>,
}

impl Harness {
    pub fn new(page: Arc<FakePage>, transport: Arc<FakeTransport>, store: Arc<MemoryStore>) -> Self {
        let opener = Arc::new(RecordingOpener::default());
        let renderer = Arc::new(RecordingRenderer::default());
        let client = client(Arc::clone(&transport));
        let tokens = Arc::new(TokenManager::new(
            Arc::clone(&client),
            Arc::clone(&store) as Arc<dyn PersistentStore>,
            Arc::clone(&opener) as Arc<dyn TabOpener>,
            Settings::default(),
        ));
        let coordinator = Coordinator::new(
            page,
            Arc::clone(&renderer) as Arc<dyn Renderer>,
            Arc::clone(&tokens),
            CatalogMatcher::new(client),
            Settings::default(),
        );

        Self {
            coordinator,
            tokens,
            transport,
            store,
            opener,
            renderer,
        }
    }
}
