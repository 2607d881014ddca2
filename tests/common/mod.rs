// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use gameshelf::config::Config;
use gameshelf::db::LibraryStore;
use gameshelf::routes::create_router;
use gameshelf::services::{IgdbClient, TokenCache};
use gameshelf::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

/// Behaviour knobs for the fake IGDB/Twitch server.
#[derive(Clone, Copy)]
#[allow(dead_code)]
pub struct FakeIgdbOptions {
    /// `expires_in` returned by the token endpoint
    pub expires_in: i64,
    pub fail_auth: bool,
    pub fail_catalog: bool,
}

impl Default for FakeIgdbOptions {
    fn default() -> Self {
        Self {
            expires_in: 3600,
            fail_auth: false,
            fail_catalog: false,
        }
    }
}

#[derive(Clone)]
struct FakeState {
    options: FakeIgdbOptions,
    token_requests: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<String>>>,
}

/// In-process stand-in for the Twitch token endpoint and IGDB `/games`.
#[allow(dead_code)]
pub struct FakeIgdb {
    pub auth_url: String,
    pub api_url: String,
    token_requests: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl FakeIgdb {
    /// Number of credential exchanges served so far.
    pub fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }

    /// Query bodies received by `/games`, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

async fn fake_token(
    State(state): State<FakeState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let n = state.token_requests.fetch_add(1, Ordering::SeqCst) + 1;

    if state.options.fail_auth
        || params.get("grant_type").map(String::as_str) != Some("client_credentials")
        || params.get("client_id").map(String::as_str) != Some("test_client_id")
        || params.get("client_secret").map(String::as_str) != Some("test_secret")
    {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "invalid client"})))
            .into_response();
    }

    Json(json!({
        "access_token": format!("token-{}", n),
        "expires_in": state.options.expires_in,
        "token_type": "bearer"
    }))
    .into_response()
}

async fn fake_games(State(state): State<FakeState>, headers: HeaderMap, body: String) -> Response {
    let client_id = headers.get("Client-ID").and_then(|h| h.to_str().ok());
    let authorized = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .is_some_and(|h| h.starts_with("Bearer token-"));

    if client_id != Some("test_client_id") || !authorized {
        return (StatusCode::UNAUTHORIZED, "missing credentials").into_response();
    }

    state.queries.lock().unwrap().push(body);

    if state.options.fail_catalog {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }

    Json(json!([
        {"id": 740, "name": "Halo: Combat Evolved", "rating": 88.5, "genres": [5], "platforms": [6]},
        {"id": 1942, "name": "The Witcher 3", "rating": 93.4, "genres": [12, 31]}
    ]))
    .into_response()
}

/// Start the fake server on an ephemeral port.
pub async fn spawn_fake_igdb(options: FakeIgdbOptions) -> FakeIgdb {
    let token_requests = Arc::new(AtomicUsize::new(0));
    let queries = Arc::new(Mutex::new(Vec::new()));

    let state = FakeState {
        options,
        token_requests: token_requests.clone(),
        queries: queries.clone(),
    };

    let app = Router::new()
        .route("/oauth2/token", post(fake_token))
        .route("/v4/games", post(fake_games))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeIgdb {
        auth_url: format!("http://{}/oauth2/token", addr),
        api_url: format!("http://{}/v4", addr),
        token_requests,
        queries,
    }
}

/// Build the token cache and catalog client against the fake server.
#[allow(dead_code)]
pub fn igdb_client(config: &Config) -> (Arc<TokenCache>, IgdbClient) {
    let http = reqwest::Client::new();
    let tokens = Arc::new(TokenCache::new(
        http.clone(),
        config.igdb_auth_url.clone(),
        config.igdb_client_id.clone(),
        config.igdb_client_secret.clone(),
    ));
    let client = IgdbClient::new(
        http,
        config.igdb_api_url.clone(),
        config.igdb_client_id.clone(),
        tokens.clone(),
    );
    (tokens, client)
}

/// Test application backed by a temp-dir library and a fake IGDB.
#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub igdb: FakeIgdb,
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_options(FakeIgdbOptions::default()).await
    }

    pub async fn with_options(options: FakeIgdbOptions) -> Self {
        let dir = TempDir::new().unwrap();
        let igdb = spawn_fake_igdb(options).await;
        let (router, state) = build_app(dir.path(), &igdb);
        Self {
            router,
            state,
            igdb,
            dir,
        }
    }

    /// Rebuild the app from the same library file, as after a restart.
    pub fn restart(&mut self) {
        let (router, state) = build_app(self.dir.path(), &self.igdb);
        self.router = router;
        self.state = state;
    }

    /// Send a request and decode the JSON response body.
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

fn build_app(dir: &Path, igdb: &FakeIgdb) -> (Router, Arc<AppState>) {
    let config = Config {
        igdb_auth_url: igdb.auth_url.clone(),
        igdb_api_url: igdb.api_url.clone(),
        library_path: dir.join("games.json"),
        public_dir: dir.join("public"),
        ..Config::test_default()
    };

    let library = LibraryStore::load_from_file(&config.library_path);
    let (_, client) = igdb_client(&config);

    let state = Arc::new(AppState {
        config,
        library,
        igdb: client,
    });

    (create_router(state.clone()), state)
}
