//! Map generator server - HTTP API over the board engine
//!
//! This crate provides the web backend:
//! - Tile catalog and map template queries
//! - Board generation with optional seeds and mutation passes
//! - Hex geometry helpers for clients drawing the board

mod error;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `tiles.json` and `maps.json`
    pub data_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8002,
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(routes::status::status_handler))
        // Map templates
        .route("/api/maps", get(routes::maps::list_maps))
        .route("/api/maps/:players", get(routes::maps::maps_for_players))
        .route(
            "/api/maps/:players/:style",
            get(routes::maps::maps_with_style),
        )
        // Tile catalog
        .route("/api/tiles", get(routes::tiles::list_tiles))
        .route("/api/tiles/:code", get(routes::tiles::get_tile))
        .route("/api/factions", get(routes::factions::list_factions))
        // Board generation
        .route("/api/generate", post(routes::generate::generate_board))
        // Geometry
        .route("/api/hex/ring", post(routes::hex::ring_handler))
        .route("/api/hex/spiral", post(routes::hex::spiral_handler))
        .route("/api/hex/rotate", post(routes::hex::rotate_handler))
        .route("/api/hex/distance", post(routes::hex::distance_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Load catalog data and start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::load(&config.data_dir)?);
    tracing::info!(
        "Serving {} tiles and {} maps from {}",
        state.catalog.len(),
        state.maps.len(),
        config.data_dir.display()
    );

    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;

    tracing::info!(
        "Map generator server starting on http://{}:{}",
        config.host,
        config.port
    );
    axum::serve(listener, router).await?;

    Ok(())
}
