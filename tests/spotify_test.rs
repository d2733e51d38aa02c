use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde_json::{Value, json};

use spshuffle::error::ServiceError;
use spshuffle::management::TokenManager;
use spshuffle::shuffle::{PlaylistRef, PlaylistService};
use spshuffle::spotify::playlist::SpotifyPlaylists;
use spshuffle::types::{Credentials, Token};

const ACCESS_TOKEN: &str = "test-access-token";

#[derive(Debug, Clone, PartialEq)]
struct Request {
    method: &'static str,
    playlist: String,
    payload: Value,
}

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<Request>>>,
}

impl Recorded {
    fn push(&self, method: &'static str, playlist: String, payload: Value) {
        self.requests.lock().unwrap().push(Request {
            method,
            playlist,
            payload,
        });
    }

    fn all(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", ACCESS_TOKEN))
}

fn spotify_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({"error": {"status": status.as_u16(), "message": message}})),
    )
        .into_response()
}

async fn get_tracks(
    State(recorded): State<Recorded>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return spotify_error(StatusCode::UNAUTHORIZED, "No token provided");
    }
    recorded.push("GET", id.clone(), json!(query));

    match id.as_str() {
        "missing" => spotify_error(StatusCode::NOT_FOUND, "Invalid playlist Id"),
        "broken" => StatusCode::BAD_GATEWAY.into_response(),
        _ => Json(json!({
            "items": [
                {"track": {"uri": "spotify:track:a", "name": "A"}},
                {"track": null},
                {"track": {"uri": "spotify:track:b", "name": "B"}}
            ],
            "next": null,
            "total": 3
        }))
        .into_response(),
    }
}

async fn remove_tracks(
    State(recorded): State<Recorded>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorded.push("DELETE", id, body);
    Json(json!({"snapshot_id": "s1"}))
}

async fn add_tracks(
    State(recorded): State<Recorded>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if id == "readonly" {
        return spotify_error(StatusCode::FORBIDDEN, "You cannot add tracks to a playlist you don't own.");
    }
    recorded.push("POST", id, body);
    (StatusCode::CREATED, Json(json!({"snapshot_id": "s2"}))).into_response()
}

async fn get_playlist(
    State(recorded): State<Recorded>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    recorded.push("GET", id, json!(query));
    Json(json!({
        "name": "Road Trip",
        "external_urls": {"spotify": "https://open.spotify.com/playlist/abc"},
        "tracks": {"total": 3}
    }))
}

async fn spawn_api() -> (SpotifyPlaylists, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route(
            "/playlists/{id}/tracks",
            get(get_tracks).delete(remove_tracks).post(add_tracks),
        )
        .route("/playlists/{id}", get(get_playlist))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let token = Token {
        access_token: ACCESS_TOKEN.to_string(),
        refresh_token: "refresh".to_string(),
        scope: String::new(),
        expires_in: 3600,
        obtained_at: Utc::now().timestamp() as u64,
    };
    let credentials = Credentials {
        client_id: "client".to_string(),
        client_secret: None,
    };
    let service = SpotifyPlaylists::with_api_url(
        TokenManager::new(token, credentials),
        format!("http://{}/", addr),
    );

    (service, recorded)
}

#[tokio::test]
async fn test_fetch_page_keeps_unavailable_entries() {
    let (service, recorded) = spawn_api().await;

    let items = service
        .fetch_page(&PlaylistRef::parse("abc"), 100, 200)
        .await
        .unwrap();

    let uris: Vec<Option<&str>> = items.iter().map(|i| i.uri()).collect();
    assert_eq!(uris, vec![Some("spotify:track:a"), None, Some("spotify:track:b")]);

    let requests = recorded.all();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].playlist, "abc");
    assert_eq!(requests[0].payload["limit"], "100");
    assert_eq!(requests[0].payload["offset"], "200");
    assert_eq!(requests[0].payload["additional_types"], "track");
}

#[tokio::test]
async fn test_error_body_message_is_used() {
    let (service, _) = spawn_api().await;

    let err = service
        .fetch_page(&PlaylistRef::parse("missing"), 100, 0)
        .await
        .unwrap_err();

    match err {
        ServiceError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Invalid playlist Id");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_error_body_falls_back_to_reason() {
    let (service, _) = spawn_api().await;

    let err = service
        .fetch_page(&PlaylistRef::parse("broken"), 100, 0)
        .await
        .unwrap_err();

    match err {
        ServiceError::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_remove_and_add_payloads() {
    let (service, recorded) = spawn_api().await;
    let playlist = PlaylistRef::parse("spotify:playlist:abc");
    let uris = vec!["spotify:track:a".to_string(), "spotify:track:b".to_string()];

    service.remove_items(&playlist, &uris).await.unwrap();
    service.add_items(&playlist, &[uris[1].clone(), uris[0].clone()]).await.unwrap();

    assert_eq!(
        recorded.all(),
        vec![
            Request {
                method: "DELETE",
                playlist: "abc".to_string(),
                payload: json!({"tracks": [{"uri": "spotify:track:a"}, {"uri": "spotify:track:b"}]}),
            },
            Request {
                method: "POST",
                playlist: "abc".to_string(),
                payload: json!({"uris": ["spotify:track:b", "spotify:track:a"]}),
            },
        ]
    );
}

#[tokio::test]
async fn test_add_forbidden_maps_to_api_error() {
    let (service, recorded) = spawn_api().await;

    let err = service
        .add_items(&PlaylistRef::parse("readonly"), &["spotify:track:a".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Api { status: 403, .. }));
    assert!(recorded.all().is_empty());
}

#[tokio::test]
async fn test_playlist_metadata() {
    let (service, recorded) = spawn_api().await;

    let metadata = service
        .get_playlist_metadata(&PlaylistRef::parse("abc"))
        .await
        .unwrap();

    assert_eq!(metadata.name, "Road Trip");
    assert_eq!(metadata.external_url, "https://open.spotify.com/playlist/abc");
    assert_eq!(metadata.total_tracks, 3);
    assert_eq!(
        recorded.all()[0].payload["fields"],
        "name,external_urls,tracks.total"
    );
}
