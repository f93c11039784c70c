//! Board generation endpoint

use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, Json};
use mapgen_core::{generate, Faction, GenerateOptions, GeneratedBoard, Release};
use serde::Deserialize;
use std::sync::Arc;

/// Generation request
#[derive(Deserialize)]
pub struct GenerateRequest {
    pub players: u8,
    pub style: String,
    pub factions: Vec<Faction>,
    pub seed: Option<u64>,
    #[serde(default)]
    pub releases: Vec<Release>,
    #[serde(default)]
    pub mutations: u32,
}

/// Assemble a board for the requested map; the seed used is echoed back
pub async fn generate_board(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GeneratedBoard>, ApiError> {
    let map = state.maps.find(req.players, &req.style)?;
    let options = GenerateOptions {
        factions: req.factions,
        releases: req.releases,
        seed: req.seed,
        mutations: req.mutations,
    };
    let generated = generate(map, &state.catalog, &options)?;
    Ok(Json(generated))
}
