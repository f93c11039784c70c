//! Integration tests for mapgen-server API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use mapgen_server::{create_router, AppState};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> axum::Router {
    let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data");
    let state = Arc::new(AppState::load(&data_dir).unwrap());
    create_router(state)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read(response).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_status_endpoint() {
    let (status, json) = get("/api/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["tiles"].as_u64().unwrap() > 0);
    assert!(json["maps"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_maps_endpoints() {
    let (status, json) = get("/api/maps").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!json.as_array().unwrap().is_empty());

    let (status, json) = get("/api/maps/6").await;
    assert_eq!(status, StatusCode::OK);
    let maps = json.as_array().unwrap();
    assert!(maps.iter().all(|m| m["players"] == 6));

    let (status, json) = get("/api/maps/6/normal").await;
    assert_eq!(status, StatusCode::OK);
    let layout = json[0]["layout"].as_array().unwrap();
    // center + 6 homes + 30 systems
    assert_eq!(layout.len(), 37);
    assert_eq!(layout[0]["number"], 18);

    let (status, json) = get("/api/maps/5/hyperlanes").await;
    assert_eq!(status, StatusCode::OK);
    let layout = json[0]["layout"].as_array().unwrap();
    assert_eq!(layout.len(), 37);
    let lanes = layout.iter().filter(|t| t["kind"] == "hyperlane").count();
    assert_eq!(lanes, 6);

    let (status, json) = get("/api/maps/2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.as_array().unwrap().is_empty());

    let (status, json) = get("/api/maps/6/spiral").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("spiral"));
}

#[tokio::test]
async fn test_tiles_endpoints() {
    let (status, json) = get("/api/tiles?kind=home&release=pok").await;
    assert_eq!(status, StatusCode::OK);
    let tiles = json.as_array().unwrap();
    assert!(!tiles.is_empty());
    assert!(tiles
        .iter()
        .all(|t| t["kind"] == "home" && t["release"] == "pok"));

    let (status, json) = get("/api/tiles/18").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["kind"], "center");
    assert_eq!(json["system"]["influence"], 6);

    let (status, json) = get("/api/tiles/83A").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["kind"], "hyperlane");
    assert_eq!(json["hyperlanes"][0][0], json!({"q": 0, "r": -1, "s": 1}));

    let (status, _) = get("/api/tiles/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get("/api/tiles/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_factions_endpoint() {
    let (status, json) = get("/api/factions").await;
    assert_eq!(status, StatusCode::OK);

    let factions = json.as_array().unwrap();
    let sol = factions
        .iter()
        .find(|f| f["name"] == "The Federation of Sol")
        .unwrap();
    assert_eq!(sol["home_tile"], 1);
    let keleres = factions
        .iter()
        .find(|f| f["name"] == "The Council Keleres")
        .unwrap();
    assert!(keleres["home_tile"].is_null());
    assert_eq!(keleres["release"], "codex-3");

    let (status, json) = get("/api/factions?release=pok").await;
    assert_eq!(status, StatusCode::OK);
    let factions = json.as_array().unwrap();
    assert_eq!(factions.len(), 7);
    assert!(factions.iter().all(|f| f["release"] == "pok"));
    assert!(factions.iter().any(|f| f["name"] == "The Argent Flight"));

    let (status, _) = get("/api/factions?release=expansion").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_is_reproducible_with_seed() {
    let request = json!({
        "players": 6,
        "style": "normal",
        "factions": ["The Federation of Sol", "The Emirates of Hacan", "The Xxcha Kingdom"],
        "seed": 42,
        "mutations": 2
    });

    let (status, first) = post("/api/generate", request.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["seed"], 42);

    let tiles = first["board"]["tiles"].as_array().unwrap();
    assert_eq!(tiles.len(), 37);
    let homes: Vec<_> = tiles
        .iter()
        .filter(|t| t["kind"] == "home" && t["number"].is_u64())
        .map(|t| t["number"].as_u64().unwrap())
        .collect();
    assert_eq!(homes, vec![1, 16, 14]);

    let (_, second) = post("/api/generate", request).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_generate_reports_seed_when_omitted() {
    let (status, json) = post(
        "/api/generate",
        json!({"players": 6, "style": "normal", "factions": []}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["seed"].is_u64());
}

#[tokio::test]
async fn test_generate_errors() {
    let (status, _) = post(
        "/api/generate",
        json!({"players": 5, "style": "normal", "factions": []}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let factions: Vec<_> = [
        "The Arborec",
        "The Barony of Letnev",
        "The Clan of Saar",
        "The Embers of Muaat",
        "The Emirates of Hacan",
        "The Federation of Sol",
        "The Ghosts of Creuss",
    ]
    .into_iter()
    .collect();
    let (status, json) = post(
        "/api/generate",
        json!({"players": 6, "style": "normal", "factions": factions}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("7 factions"));
}

#[tokio::test]
async fn test_hex_ring_and_spiral() {
    let (status, json) = post(
        "/api/hex/ring",
        json!({"center": [0, 0, 0], "radius": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let positions = json["positions"].as_array().unwrap();
    assert_eq!(positions.len(), 6);
    assert_eq!(positions[0], json!({"q": 0, "r": -1, "s": 1}));
    assert_eq!(positions[1], json!({"q": 1, "r": -1, "s": 0}));

    let (status, json) = post(
        "/api/hex/spiral",
        json!({"center": {"q": 0, "r": 0, "s": 0}, "radius": 2, "rotation": "counterclockwise"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let positions = json["positions"].as_array().unwrap();
    assert_eq!(positions.len(), 19);
    assert_eq!(positions[1], json!({"q": 0, "r": -1, "s": 1}));
    assert_eq!(positions[2], json!({"q": -1, "r": 0, "s": 1}));
}

#[tokio::test]
async fn test_hex_operand_errors() {
    let (status, json) = post(
        "/api/hex/ring",
        json!({"center": [1, 1, 1], "radius": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "attributes 'q', 'r', 's' must have a sum of 0, not 3"
    );

    let (status, json) = post(
        "/api/hex/distance",
        json!({"a": [0, 0], "b": [0, 0, 0]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "sequence must have length 3, not 2");

    let (status, _) = post(
        "/api/hex/spiral",
        json!({"center": [0, 0, 0], "radius": 1000}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_hex_rotate_and_distance() {
    let (status, json) = post(
        "/api/hex/rotate",
        json!({"point": [0, -1, 1], "center": [0, 0, 0], "angle": 60}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["position"], json!({"q": 1, "r": -1, "s": 0}));

    let (status, json) = post(
        "/api/hex/rotate",
        json!({"point": [0, -1, 1], "angle": 45}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "argument 'angle' must be in 60 degree increments, not 45"
    );

    let (status, json) = post(
        "/api/hex/distance",
        json!({"a": [0, 0, 0], "b": [2, -3, 1]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["distance"], 3);
}

#[tokio::test]
async fn test_hex_extreme_coordinates() {
    let (status, json) = post(
        "/api/hex/distance",
        json!({"a": [2147483647, -2147483647, 0], "b": [-2147483647, 2147483647, 0]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["distance"], 4294967294u64);

    let (status, json) = post(
        "/api/hex/rotate",
        json!({
            "point": [2147483647, -2147483647, 0],
            "center": [-2147483647, 2147483647, 0],
            "angle": 60
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "integer overflow in rotate");

    let (status, json) = post(
        "/api/hex/ring",
        json!({"center": [2147483647, -2147483647, 0], "radius": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "integer overflow in ring");
}
