//! Server state
//!
//! Catalog data is loaded once at startup and shared read-only; each
//! request clones the pools it draws from.

use mapgen_core::{Catalog, MapSet};
use std::path::Path;

/// Tile data file name inside the data directory
pub const TILES_FILE: &str = "tiles.json";
/// Map data file name inside the data directory
pub const MAPS_FILE: &str = "maps.json";

/// Server-wide shared state
pub struct AppState {
    pub catalog: Catalog,
    pub maps: MapSet,
}

impl AppState {
    pub fn new(catalog: Catalog, maps: MapSet) -> Self {
        Self { catalog, maps }
    }

    /// Load `tiles.json` then `maps.json` from `data_dir`
    pub fn load(data_dir: &Path) -> anyhow::Result<Self> {
        let catalog = Catalog::load(&data_dir.join(TILES_FILE))?;
        let maps = MapSet::load(&data_dir.join(MAPS_FILE), &catalog)?;
        Ok(Self::new(catalog, maps))
    }
}
