use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub use axum::http::StatusCode;

pub const PUBLIC_KEY: &str = "mock-public-key";
pub const PRIVATE_KEY: &str = "mock-private-key";
pub const API_KEY: &str = "mock-roster-key";

pub const COMICS_PATH: &str = "/v1/public/characters";
pub const HEROES_PATH: &str = "/api/v1/heroes";

const MAX_LIMIT: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Thumbnail {
    pub path: String,
    pub extension: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComicCharacter {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub thumbnail: Thumbnail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub code: i64,
    pub status: String,
    pub copyright: String,
    pub attribution_text: String,
    pub data: EnvelopeData,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnvelopeData {
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
    pub count: usize,
    pub results: Vec<ComicCharacter>,
}

#[derive(Deserialize)]
pub struct CharacterQuery {
    pub apikey: Option<String>,
    pub ts: Option<String>,
    pub hash: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
}

struct Inner {
    public_key: String,
    private_key: String,
    api_key: String,
    comics: Vec<ComicCharacter>,
    heroes: Vec<Value>,
    comics_requests: AtomicUsize,
    roster_requests: AtomicUsize,
    forced_status: RwLock<Option<StatusCode>>,
}

/// Shared state behind both routes. Cloning shares the counters.
#[derive(Clone)]
pub struct MockState {
    inner: Arc<Inner>,
}

impl Default for MockState {
    fn default() -> Self {
        Self::new(default_comics(), default_heroes())
    }
}

impl MockState {
    pub fn new(comics: Vec<ComicCharacter>, heroes: Vec<Value>) -> Self {
        Self {
            inner: Arc::new(Inner {
                public_key: PUBLIC_KEY.to_string(),
                private_key: PRIVATE_KEY.to_string(),
                api_key: API_KEY.to_string(),
                comics,
                heroes,
                comics_requests: AtomicUsize::new(0),
                roster_requests: AtomicUsize::new(0),
                forced_status: RwLock::new(None),
            }),
        }
    }

    pub fn comics_requests(&self) -> usize {
        self.inner.comics_requests.load(Ordering::SeqCst)
    }

    pub fn roster_requests(&self) -> usize {
        self.inner.roster_requests.load(Ordering::SeqCst)
    }

    /// Answer every request with `status` until reset with `None`.
    pub async fn fail_with(&self, status: Option<StatusCode>) {
        *self.inner.forced_status.write().await = status;
    }
}

/// Hex MD5 of `ts + private_key + public_key`.
pub fn sign(ts: &str, private_key: &str, public_key: &str) -> String {
    hex::encode(Md5::digest(format!("{ts}{private_key}{public_key}").as_bytes()))
}

pub fn app() -> Router {
    app_with(MockState::default())
}

pub fn app_with(state: MockState) -> Router {
    Router::new()
        .route(COMICS_PATH, get(list_characters))
        .route(HEROES_PATH, get(list_heroes))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, MockState::default()).await
}

pub async fn run_with(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(state)).await
}

fn error_body(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "code": code, "message": message }))).into_response()
}

async fn list_characters(State(state): State<MockState>, Query(query): Query<CharacterQuery>) -> Response {
    state.inner.comics_requests.fetch_add(1, Ordering::SeqCst);
    if let Some(status) = *state.inner.forced_status.read().await {
        return (status, "forced failure").into_response();
    }

    let (Some(apikey), Some(ts), Some(hash)) = (&query.apikey, &query.ts, &query.hash) else {
        return error_body(
            StatusCode::CONFLICT,
            "MissingParameter",
            "You must provide a hash, timestamp and apikey.",
        );
    };
    if *apikey != state.inner.public_key || *hash != sign(ts, &state.inner.private_key, &state.inner.public_key) {
        return error_body(
            StatusCode::UNAUTHORIZED,
            "InvalidCredentials",
            "That hash, timestamp and key combination is invalid.",
        );
    }

    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.unwrap_or(20);
    if limit == 0 || limit > MAX_LIMIT {
        return error_body(
            StatusCode::CONFLICT,
            "409",
            "You may not request more than 100 items.",
        );
    }

    let mut comics = state.inner.comics.clone();
    match query.order_by.as_deref() {
        Some("name") => comics.sort_by(|a, b| a.name.cmp(&b.name)),
        Some("-name") => comics.sort_by(|a, b| b.name.cmp(&a.name)),
        _ => {}
    }
    let total = comics.len();
    let results: Vec<ComicCharacter> = comics.into_iter().skip(offset).take(limit).collect();

    tracing::debug!(offset, limit, count = results.len(), "served comics characters");
    Json(Envelope {
        code: 200,
        status: "Ok".to_string(),
        copyright: "© Mock".to_string(),
        attribution_text: "Data provided by the mock server".to_string(),
        data: EnvelopeData {
            offset,
            limit,
            total,
            count: results.len(),
            results,
        },
    })
    .into_response()
}

async fn list_heroes(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.inner.roster_requests.fetch_add(1, Ordering::SeqCst);
    if let Some(status) = *state.inner.forced_status.read().await {
        return (status, "forced failure").into_response();
    }

    match headers.get("x-api-key").and_then(|value| value.to_str().ok()) {
        Some(key) if key == state.inner.api_key => Json(state.inner.heroes.clone()).into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": true, "message": "Invalid or missing API key" })),
        )
            .into_response(),
    }
}

fn comic(id: i64, name: &str, path: &str) -> ComicCharacter {
    ComicCharacter {
        id,
        name: name.to_string(),
        description: format!("{name} from the mock server"),
        thumbnail: Thumbnail {
            path: path.to_string(),
            extension: "jpg".to_string(),
        },
        modified: Some("2014-04-29T14:18:17-0400".to_string()),
    }
}

/// Deliberately unsorted so `orderBy=name` is observable.
pub fn default_comics() -> Vec<ComicCharacter> {
    vec![
        comic(1009664, "Thor", "http://i.annihil.us/u/prod/marvel/i/mg/d/d0/5269657a74350"),
        comic(1009368, "Iron Man", "http://i.annihil.us/u/prod/marvel/i/mg/9/c0/527bb7b37ff55"),
        comic(1009220, "Captain America", "http://i.annihil.us/u/prod/marvel/i/mg/3/50/537ba56d31087"),
        comic(1009610, "Spider-Man", "http://i.annihil.us/u/prod/marvel/i/mg/3/50/526548a343e4b"),
        comic(1009351, "Hulk", "http://i.annihil.us/u/prod/marvel/i/mg/5/a0/538615ca33ab0"),
    ]
}

pub fn default_heroes() -> Vec<Value> {
    vec![
        json!({
            "id": "1011",
            "name": "Hulk",
            "real_name": "Bruce Banner",
            "imageUrl": "/rivals/heroes/card/hulk.png",
            "role": "Vanguard",
            "attack_type": "Melee Heroes",
            "team": ["Avengers"],
            "difficulty": "4",
            "bio": "Brilliant scientist Dr. Bruce Banner...",
            "transformations": [
                {"id": "1", "name": "Bruce Banner", "icon": "/rivals/heroes/transformations/banner.png", "health": "250", "movement_speed": "6m/s"},
                {"id": "2", "name": "Hero Hulk", "health": "650", "movement_speed": "6m/s"}
            ],
            "costumes": [
                {"id": "101101", "name": "Default", "icon": "/rivals/costumes/hulk.png", "quality": "NO_QUALITY"},
                {"id": "101102", "name": "Gamma Glow", "quality": "GOLD", "appearance": "Glowing green"}
            ],
            "abilities": [
                {"id": 101101, "name": "Gamma Ray Gun", "type": "Weapon", "transformation_id": "1", "isCollab": false,
                 "additional_fields": {"Damage": "25", "Range": "20m"}},
                {"id": 101102, "name": "Heavy Blow", "type": "Weapon", "transformation_id": "2", "isCollab": false},
                {"id": 101103, "name": "Puny Banner", "type": "Passive", "transformation_id": "1", "isCollab": false}
            ]
        }),
        json!({
            "id": "1014",
            "name": "The Punisher",
            "imageUrl": "rivals/heroes/card/punisher.png",
            "role": "Duelist",
            "difficulty": 2,
            "season_added": "S0"
        }),
    ]
}
