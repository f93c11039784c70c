//! Tile catalog endpoints

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use mapgen_core::{Tile, TileQuery};
use std::sync::Arc;

/// Tiles matching every field given in the query string
pub async fn list_tiles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TileQuery>,
) -> Json<Vec<Tile>> {
    Json(state.catalog.filter(&query).into_iter().cloned().collect())
}

/// One tile by printed code, e.g. `/api/tiles/83A`
pub async fn get_tile(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Tile>, ApiError> {
    let tile = state.catalog.by_code(&code)?;
    Ok(Json(tile.clone()))
}
