//! Session behaviour against a local HTTP stand-in for PokeAPI.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use roster_core::testing::RecordingView;
use roster_core::{
    CreatureFetcher, FetchError, PokeApiFetcher, RosterSession, SessionConfig, ROSTER_CAPACITY,
};
use serde_json::json;

async fn spawn_server(app: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("read test listener addr");
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}/api/v2"), handle)
}

fn payload(id: u32, name: &str, types: &[&str]) -> serde_json::Value {
    let types: Vec<_> = types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"slot": i + 1, "type": {"name": t, "url": ""}}))
        .collect();
    json!({
        "id": id,
        "name": name,
        "types": types,
        "sprites": {"front_default": format!("https://img/{id}.png")}
    })
}

async fn pokemon_route(Path(name): Path<String>) -> impl IntoResponse {
    match name.as_str() {
        "pikachu" => Json(payload(25, "pikachu", &["electric"])).into_response(),
        "charmander" => Json(payload(4, "charmander", &["fire"])).into_response(),
        "bulbasaur" => Json(payload(1, "bulbasaur", &["grass", "poison"])).into_response(),
        "typeless" => Json(payload(9999, "typeless", &[])).into_response(),
        "teapot" => (StatusCode::IM_A_TEAPOT, "short and stout").into_response(),
        _ => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

async fn session_for_local_api() -> (RosterSession, tokio::task::JoinHandle<()>) {
    let app = Router::new().route("/api/v2/pokemon/{name}/", get(pokemon_route));
    let (base_url, server) = spawn_server(app).await;
    let session = RosterSession::new(SessionConfig::new().with_api_base(base_url))
        .expect("local base url is valid");
    (session, server)
}

#[tokio::test]
async fn builds_a_team_over_http() {
    let (mut session, server) = session_for_local_api().await;
    let mut view = RecordingView::new();

    for name in ["pikachu", "charmander", "bulbasaur"] {
        session.add_creature(name, &mut view).await.expect("lookup succeeds");
    }
    server.abort();

    assert_eq!(session.roster().len(), ROSTER_CAPACITY);
    assert_eq!(session.history().len(), 1);
    let bulbasaur = &session.roster()[2];
    assert_eq!(bulbasaur.types(), ["grass", "poison"]);
    assert_eq!(bulbasaur.image_url(), "https://img/1.png");
}

#[tokio::test]
async fn http_404_is_not_found() {
    let (mut session, server) = session_for_local_api().await;
    let mut view = RecordingView::new();

    let err = session
        .add_creature("not-a-real-pokemon", &mut view)
        .await
        .unwrap_err();
    server.abort();

    assert!(err.is_not_found());
    assert!(session.roster().is_empty());
    assert!(session.history().is_empty());
    assert_eq!(view.notices, vec!["Creature not found: not-a-real-pokemon"]);
}

#[tokio::test]
async fn any_non_success_status_is_not_found() {
    let (mut session, server) = session_for_local_api().await;
    let mut view = RecordingView::new();

    let err = session.add_creature("teapot", &mut view).await.unwrap_err();
    server.abort();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn malformed_payload_is_transport_error() {
    let (mut session, server) = session_for_local_api().await;
    let mut view = RecordingView::new();

    let err = session.add_creature("typeless", &mut view).await.unwrap_err();
    server.abort();

    assert!(err.is_transport(), "unexpected error: {err:?}");
    assert!(session.roster().is_empty());
}

#[tokio::test]
async fn unreachable_api_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = pokeapi::PokeApi::new()
        .unwrap()
        .with_base_url(format!("http://{addr}/api/v2"))
        .unwrap();
    let fetcher = PokeApiFetcher::new(api);

    let err = fetcher.fetch("pikachu").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "unexpected error: {err:?}");
}
