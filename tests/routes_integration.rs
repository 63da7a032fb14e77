//! End-to-end tests for the HTTP API: router, handlers, and error mapping.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use lineup_builder::http::{create_router, AppState};
use lineup_builder::models::Player;
use lineup_builder::services::{FormationCatalog, PlayerStore, ScrapeClient};

fn test_state() -> AppState {
    let players = PlayerStore::new();
    players.add_players(vec![
        test_player("p1", "Erling Haaland", "Manchester City", "Norway"),
        test_player("p2", "Mesut Özil", "Arsenal", "Germany"),
    ]);
    AppState::new(
        Arc::new(FormationCatalog::new()),
        Arc::new(players),
        // points nowhere; scraper endpoints under test never reach a live upstream
        Arc::new(ScrapeClient::new("http://localhost:59999", Duration::from_millis(200)).unwrap()),
    )
}

fn test_player(id: &str, name: &str, club: &str, nationality: &str) -> Player {
    Player {
        id: id.to_string(),
        name: name.to_string(),
        display_name: None,
        positions: vec!["ST".to_string()],
        club: Some(club.to_string()),
        nationality: Some(nationality.to_string()),
        league: Some("Premier League".to_string()),
        photo_url: None,
        number: Some(9),
    }
    .normalized()
}

async fn get(path: &str) -> (StatusCode, serde_json::Value) {
    let app = create_router(test_state());
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn post_json(path: &str, body: serde_json::Value) -> (StatusCode, Vec<u8>) {
    let app = create_router(test_state());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn health_reports_counts() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["players"], 2);
    assert!(body["formations"].as_u64().unwrap() >= 8);
}

#[tokio::test]
async fn formations_listing_and_lookup() {
    let (status, body) = get("/api/formations").await;
    assert_eq!(status, StatusCode::OK);
    let formations = body.as_array().unwrap();
    assert!(formations.iter().any(|f| f["id"] == "4-3-3"));
    // each formation serializes eleven positions
    assert_eq!(formations[0]["positions"].as_array().unwrap().len(), 11);

    let (status, body) = get("/api/formations/4-4-2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["displayName"], "4-4-2");

    let (status, body) = get("/api/formations/0-0-0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn formation_flip_query_mirrors_coordinates() {
    let (_, plain) = get("/api/formations/4-3-3").await;
    let (status, flipped) = get("/api/formations/4-3-3?flipH=true").await;
    assert_eq!(status, StatusCode::OK);
    let x = plain["positions"][1]["x"].as_f64().unwrap();
    let x_flipped = flipped["positions"][1]["x"].as_f64().unwrap();
    assert_eq!(x_flipped, 100.0 - x);
}

#[tokio::test]
async fn formations_by_category() {
    let (status, body) = get("/api/formations/category/attacking").await;
    assert_eq!(status, StatusCode::OK);
    let formations = body.as_array().unwrap();
    assert!(!formations.is_empty());
    assert!(formations.iter().all(|f| f["category"] == "attacking"));
}

#[tokio::test]
async fn player_search_and_lookup() {
    let (status, body) = get("/api/players/search?query=ozil").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["name"], "Mesut Özil");

    let (status, body) = get("/api/players/p1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["displayName"], "Haaland");

    let (status, _) = get("/api/players/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn player_enumerations() {
    let (status, body) = get("/api/players/clubs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, leagues) = get("/api/players/leagues").await;
    assert_eq!(leagues[0], "Premier League");
}

#[tokio::test]
async fn export_rejects_empty_lineup() {
    let (status, body) = post_json(
        "/api/lineup/export",
        serde_json::json!({"formationId": "4-3-3", "players": []}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn export_resolves_dimensions() {
    let (status, body) = post_json(
        "/api/lineup/export",
        serde_json::json!({
            "formationId": "4-3-3",
            "players": [{"playerId": "p1", "positionId": "st", "name": "Haaland"}],
            "settings": {"aspectRatio": "square"},
            "format": "png"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["metadata"]["width"], 1080);
    assert_eq!(json["metadata"]["height"], 1080);
}

#[tokio::test]
async fn export_svg_returns_attachment() {
    let app = create_router(test_state());
    let body = serde_json::json!({
        "formationId": "4-3-3",
        "players": [{
            "playerId": "p1",
            "positionId": "st",
            "name": "Haaland",
            "customX": 50.0,
            "customY": 18.0
        }]
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/lineup/export/svg")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let svg = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Haaland"));
}

#[tokio::test]
async fn scraper_league_enumeration() {
    let (status, body) = get("/api/scraper/leagues").await;
    assert_eq!(status, StatusCode::OK);
    let leagues = body["leagues"].as_array().unwrap();
    assert_eq!(leagues.len(), 5);
    assert!(leagues.iter().any(|l| l["id"] == "la-liga"));
}

#[tokio::test]
async fn scraper_unknown_league_is_not_found() {
    let (status, body) = get("/api/scraper/leagues/mars-league/teams").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn scraper_upstream_failure_maps_to_bad_gateway() {
    // Known league, but the upstream base URL points at a closed port.
    let (status, body) = get("/api/scraper/leagues/premier-league/teams").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}
