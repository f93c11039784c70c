//! Map template endpoints

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use mapgen_core::{CatalogError, Map};
use std::sync::Arc;

/// All map templates
pub async fn list_maps(State(state): State<Arc<AppState>>) -> Json<Vec<Map>> {
    Json(state.maps.all().to_vec())
}

/// Templates for a player count; empty when there are none
pub async fn maps_for_players(
    State(state): State<Arc<AppState>>,
    Path(players): Path<u8>,
) -> Json<Vec<Map>> {
    Json(state.maps.for_players(players).into_iter().cloned().collect())
}

/// Templates for a player count and style
pub async fn maps_with_style(
    State(state): State<Arc<AppState>>,
    Path((players, style)): Path<(u8, String)>,
) -> Result<Json<Vec<Map>>, ApiError> {
    let maps: Vec<Map> = state
        .maps
        .with_style(players, &style)
        .into_iter()
        .cloned()
        .collect();
    if maps.is_empty() {
        return Err(CatalogError::MapNotFound { players, style }.into());
    }
    Ok(Json(maps))
}
