//! Faction list endpoint

use axum::extract::Query;
use axum::Json;
use mapgen_core::{Faction, Release};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct FactionQuery {
    pub release: Option<Release>,
}

#[derive(Serialize)]
pub struct FactionInfo {
    pub name: &'static str,
    pub home_tile: Option<u16>,
    pub release: Release,
}

/// Every faction with the number of its home system tile, optionally
/// limited to one release via `?release=`
pub async fn list_factions(Query(query): Query<FactionQuery>) -> Json<Vec<FactionInfo>> {
    let factions = Faction::ALL
        .iter()
        .filter(|faction| query.release.map_or(true, |r| faction.release() == r))
        .map(|&faction| FactionInfo {
            name: faction.name(),
            home_tile: faction.home_tile_number(),
            release: faction.release(),
        })
        .collect();
    Json(factions)
}
