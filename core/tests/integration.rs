//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port and drives the real
//! reqwest transport through sources, repositories and the view-state. One
//! test executes the build/parse split over a blocking ureq agent to keep the
//! host-does-IO path honest.

use std::net::SocketAddr;
use std::time::Duration;

use hero_core::config::{ENV_COMICS_BASE_URL, ENV_COMICS_PRIVATE_KEY, ENV_COMICS_PUBLIC_KEY};
use hero_core::config::{ENV_HTTP_TIMEOUT_SECS, ENV_ROSTER_API_KEY, ENV_ROSTER_BASE_URL};
use hero_core::demo::{comics_demo_characters, roster_demo_characters};
use hero_core::{
    AppViewState, CharacterRepository, CharacterSource, CharacterSummary, ComicsClient, ComicsSource,
    Config, Credentials, Fallback, HttpMethod, HttpRequest, HttpResponse, LoadOutcome, Origin, Page,
    ReqwestTransport, RosterClient, RosterSource,
};
use mock_server::{MockState, API_KEY, PRIVATE_KEY, PUBLIC_KEY};

async fn start_mock(state: MockState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run_with(listener, state));
    addr
}

/// An address nothing listens on.
async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn config_for(addr: SocketAddr, public_key: &str, roster_key: &str) -> Config {
    let comics = format!("http://{addr}/v1/public");
    let roster = format!("http://{addr}/api/v1");
    let pairs = [
        (ENV_COMICS_BASE_URL, comics.as_str()),
        (ENV_COMICS_PUBLIC_KEY, public_key),
        (ENV_COMICS_PRIVATE_KEY, PRIVATE_KEY),
        (ENV_ROSTER_BASE_URL, roster.as_str()),
        (ENV_ROSTER_API_KEY, roster_key),
        (ENV_HTTP_TIMEOUT_SECS, "5"),
    ];
    Config::from_lookup(|key| {
        pairs
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.to_string())
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn comics_live_fetch_is_signed_and_sorted() {
    let state = MockState::default();
    let addr = start_mock(state.clone()).await;
    let repo = config_for(addr, PUBLIC_KEY, API_KEY).comics_repository().unwrap();

    let fetched = repo.fetch_characters(Page::default()).await.unwrap();
    assert_eq!(fetched.origin, Origin::Live);
    let names: Vec<_> = fetched.characters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Captain America", "Hulk", "Iron Man", "Spider-Man", "Thor"]);
    assert_eq!(
        fetched.characters[0].image_url(),
        "https://i.annihil.us/u/prod/marvel/i/mg/3/50/537ba56d31087.jpg"
    );
    assert_eq!(state.comics_requests(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn comics_pagination_is_server_side() {
    let addr = start_mock(MockState::default()).await;
    let source = ComicsSource::new(
        ComicsClient::new(&format!("http://{addr}/v1/public"), Credentials::new(PUBLIC_KEY, PRIVATE_KEY)),
        ReqwestTransport::new(),
    );

    let page = source.fetch_characters(Page::new(3, 2)).await.unwrap();
    let names: Vec<_> = page.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Spider-Man", "Thor"]);

    let beyond = source.fetch_characters(Page::new(10, 20)).await.unwrap();
    assert!(beyond.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn comics_bad_credentials_fall_back_by_page() {
    let addr = start_mock(MockState::default()).await;
    let repo = config_for(addr, "not-the-key", API_KEY).comics_repository().unwrap();

    let first = repo.fetch_characters(Page::default()).await.unwrap();
    assert_eq!(first.characters, comics_demo_characters());
    assert!(first.fallback_reason().unwrap().contains("401"));

    let later = repo.fetch_characters(Page::new(20, 20)).await.unwrap();
    assert!(later.characters.is_empty());
    assert!(later.is_fallback());
}

#[tokio::test(flavor = "multi_thread")]
async fn transport_failure_serves_first_three_demo_characters() {
    let addr = closed_addr().await;
    let repo = config_for(addr, PUBLIC_KEY, API_KEY).comics_repository().unwrap();

    let fetched = repo.fetch_characters(Page::default()).await.unwrap();
    let names: Vec<_> = fetched.characters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Captain America", "Iron Man", "Thor"]);
    assert!(fetched.fallback_reason().unwrap().starts_with("transport failed"));

    let later = repo.fetch_characters(Page::new(3, 20)).await.unwrap();
    assert!(later.characters.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn injected_fallback_replaces_demo_data() {
    let addr = closed_addr().await;
    let custom = roster_demo_characters()
        .into_iter()
        .map(|mut hero| {
            hero.name = "Offline Hulk".to_string();
            hero
        })
        .collect();
    let repo = CharacterRepository::new(
        RosterSource::new(RosterClient::new(&format!("http://{addr}/api/v1"), API_KEY), ReqwestTransport::new()),
        Fallback::Always(custom),
    );

    let fetched = repo.fetch_characters(Page::default()).await.unwrap();
    assert_eq!(fetched.characters[0].name, "Offline Hulk");
}

#[tokio::test(flavor = "multi_thread")]
async fn roster_live_fetch_decodes_nested_records() {
    let addr = start_mock(MockState::default()).await;
    let repo = config_for(addr, PUBLIC_KEY, API_KEY).roster_repository().unwrap();

    let fetched = repo.fetch_characters(Page::default()).await.unwrap();
    assert_eq!(fetched.origin, Origin::Live);
    assert_eq!(fetched.characters.len(), 2);

    let hulk = &fetched.characters[0];
    assert_eq!(hulk.image_url(), "https://marvelrivalsapi.com/rivals/heroes/card/hulk.png");
    let groups = hulk.ability_groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].transformation.map(|t| t.name.as_str()), Some("Bruce Banner"));
    assert_eq!(groups[0].abilities.len(), 2);

    let punisher = &fetched.characters[1];
    assert_eq!(punisher.difficulty.as_deref(), Some("2"));
    assert!(punisher.real_name.is_none());
    assert!(punisher.team.is_none());
    assert!(punisher.abilities.is_none());
    assert_eq!(punisher.image_url(), "https://marvelrivalsapi.com/rivals/heroes/card/punisher.png");
}

#[tokio::test(flavor = "multi_thread")]
async fn roster_server_error_serves_demo_roster() {
    let state = MockState::default();
    state.fail_with(Some(axum_status(500))).await;
    let addr = start_mock(state).await;
    let repo = config_for(addr, PUBLIC_KEY, API_KEY).roster_repository().unwrap();

    let fetched = repo.fetch_characters(Page::new(40, 5)).await.unwrap();
    assert_eq!(fetched.characters, roster_demo_characters());
    assert_eq!(fetched.fallback_reason(), Some("HTTP 500: forced failure"));
}

#[tokio::test(flavor = "multi_thread")]
async fn view_state_loads_once_over_http() {
    let state = MockState::default();
    let addr = start_mock(state.clone()).await;
    let view = AppViewState::new(config_for(addr, PUBLIC_KEY, API_KEY).roster_repository().unwrap());

    assert_eq!(
        view.load_characters().await,
        LoadOutcome::Loaded {
            count: 2,
            degraded: false
        }
    );
    assert_eq!(view.load_characters().await, LoadOutcome::AlreadyLoaded);
    assert_eq!(state.roster_requests(), 1);

    assert!(view.select_character_by_id("1014"));
    assert_eq!(view.selected_character().map(|c| c.name), Some("The Punisher".to_string()));
    view.select_character(None);
    assert!(!view.is_detail_view());
    assert_eq!(view.characters().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn view_state_marks_degraded_when_backend_is_down() {
    let addr = closed_addr().await;
    let view = AppViewState::new(config_for(addr, PUBLIC_KEY, API_KEY).comics_repository().unwrap());

    let outcome = view.load_characters().await;
    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            count: 3,
            degraded: true
        }
    );
    assert!(view.degraded().is_some());
    assert!(view.error().is_none());
}

/// Execute an `HttpRequest` with ureq, returning statuses as data.
fn execute_blocking(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(5)))
        .build()
        .new_agent();

    let mut request = match req.method {
        HttpMethod::Get => agent.get(&req.url),
    };
    for (name, value) in &req.headers {
        request = request.header(name.as_str(), value.as_str());
    }
    let mut response = request.call().expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    HttpResponse { status, body }
}

#[tokio::test(flavor = "multi_thread")]
async fn build_and_parse_over_blocking_host() {
    let addr = start_mock(MockState::default()).await;
    let roster = RosterClient::new(&format!("http://{addr}/api/v1"), API_KEY);
    let comics = ComicsClient::new(
        &format!("http://{addr}/v1/public"),
        Credentials::new(PUBLIC_KEY, PRIVATE_KEY),
    );

    let heroes_req = roster.build_list_heroes();
    let comics_req = comics.build_list_characters(Page::new(0, 2), 1_700_000_000_000);
    let (heroes_resp, comics_resp) = tokio::task::spawn_blocking(move || {
        (execute_blocking(heroes_req), execute_blocking(comics_req))
    })
    .await
    .unwrap();

    let heroes = roster.parse_list_heroes(heroes_resp).unwrap();
    assert_eq!(heroes.len(), 2);

    let envelope = comics.parse_envelope(comics_resp).unwrap();
    assert_eq!(envelope.code, 200);
    assert_eq!(envelope.data.total, 5);
    assert_eq!(envelope.data.results.len(), 2);
    assert!(envelope.attribution_text.is_some());

    let unauthorized = RosterClient::new(&format!("http://{addr}/api/v1"), "wrong");
    let req = unauthorized.build_list_heroes();
    let resp = tokio::task::spawn_blocking(move || execute_blocking(req)).await.unwrap();
    assert_eq!(resp.status, 401);
    assert!(unauthorized.parse_list_heroes(resp).unwrap_err().is_invalid_credentials());
}

fn axum_status(code: u16) -> mock_server::StatusCode {
    mock_server::StatusCode::from_u16(code).unwrap()
}
