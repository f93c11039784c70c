//! Map templates
//!
//! Upstream map data numbers board slots by their index in
//! `spiral(origin, 4)`. [`Map::from_source`] converts those flat indices
//! into positioned slot tiles:
//! - the center tile at the origin
//! - a green-backed home slot per home world index
//! - a blue-backed system slot per primary, secondary and tertiary index
//! - catalog hyperlane tiles, placed and rotated as listed

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::hex::{spiral_index, Cube};
use crate::tile::{Tile, TileKind};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hyperlane placement: `[slot index, tile code, rotation in 60 degree steps]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperlaneEntry(pub usize, pub String, pub i32);

/// A map record in upstream, index-based form
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapSource {
    pub players: u8,
    pub style: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
    pub home_worlds: Vec<usize>,
    #[serde(default)]
    pub primary_tiles: Vec<usize>,
    #[serde(default)]
    pub secondary_tiles: Vec<usize>,
    #[serde(default)]
    pub tertiary_tiles: Vec<usize>,
    #[serde(default)]
    pub hyperlane_tiles: Vec<HyperlaneEntry>,
}

/// A map template: ordered slots with roles and fixed positions
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Map {
    pub players: u8,
    pub style: String,
    pub description: String,
    pub source: String,
    pub layout: Vec<Tile>,
}

fn position(index: usize) -> Result<Cube, CatalogError> {
    spiral_index(index).ok_or(CatalogError::UnknownIndex(index))
}

impl Map {
    pub fn from_source(source: &MapSource, catalog: &Catalog) -> Result<Self, CatalogError> {
        let mut layout = Vec::new();

        let mut center = catalog.center_tile()?.clone();
        center.position = Some(Cube::ORIGIN);
        layout.push(center);

        for &index in &source.home_worlds {
            layout.push(Tile::home_slot(position(index)?));
        }

        let systems = source
            .primary_tiles
            .iter()
            .chain(&source.secondary_tiles)
            .chain(&source.tertiary_tiles);
        for &index in systems {
            layout.push(Tile::system_slot(position(index)?));
        }

        for HyperlaneEntry(index, code, rotation) in &source.hyperlane_tiles {
            let mut tile = catalog.by_code(code)?.clone();
            tile.position = Some(position(*index)?);
            tile.rotate(rotation * 60)?;
            layout.push(tile);
        }

        Ok(Self {
            players: source.players,
            style: source.style.clone(),
            description: source.description.clone(),
            source: source.source.clone(),
            layout,
        })
    }

    pub fn slots(&self, kind: TileKind) -> usize {
        self.layout.iter().filter(|t| t.kind == kind).count()
    }

    pub fn home_slots(&self) -> usize {
        self.slots(TileKind::Home)
    }

    pub fn system_slots(&self) -> usize {
        self.slots(TileKind::System)
    }
}

/// Every map template known to the service
#[derive(Clone, Debug, Default)]
pub struct MapSet {
    maps: Vec<Map>,
}

impl MapSet {
    pub fn new(maps: Vec<Map>) -> Self {
        Self { maps }
    }

    /// Load upstream map records from JSON and convert them against `catalog`
    pub fn load(path: &Path, catalog: &Catalog) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading map data from {}", path.display()))?;
        let sources: Vec<MapSource> = serde_json::from_str(&content)
            .with_context(|| format!("parsing map data from {}", path.display()))?;

        let maps = sources
            .iter()
            .map(|source| {
                Map::from_source(source, catalog).with_context(|| {
                    format!("converting {} player map {:?}", source.players, source.style)
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        tracing::info!("Loaded {} maps from {}", maps.len(), path.display());
        Ok(Self::new(maps))
    }

    pub fn all(&self) -> &[Map] {
        &self.maps
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn for_players(&self, players: u8) -> Vec<&Map> {
        self.maps.iter().filter(|m| m.players == players).collect()
    }

    pub fn with_style(&self, players: u8, style: &str) -> Vec<&Map> {
        self.maps
            .iter()
            .filter(|m| m.players == players && m.style == style)
            .collect()
    }

    pub fn find(&self, players: u8, style: &str) -> Result<&Map, CatalogError> {
        self.maps
            .iter()
            .find(|m| m.players == players && m.style == style)
            .ok_or_else(|| CatalogError::MapNotFound {
                players,
                style: style.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::small_catalog;
    use crate::hex::Direction;
    use crate::tile::Letter;

    fn three_player_source() -> MapSource {
        MapSource {
            players: 3,
            style: "normal".to_string(),
            description: "test".to_string(),
            source: "unit test".to_string(),
            home_worlds: vec![19, 25, 31],
            primary_tiles: vec![1, 2, 3],
            secondary_tiles: vec![7, 8],
            tertiary_tiles: vec![20],
            hyperlane_tiles: vec![HyperlaneEntry(22, "83A".to_string(), 1)],
        }
    }

    #[test]
    fn test_from_source_layout() {
        let map = Map::from_source(&three_player_source(), &small_catalog()).unwrap();

        assert_eq!(map.layout.len(), 1 + 3 + 6 + 1);
        assert_eq!(map.slots(TileKind::Center), 1);
        assert_eq!(map.home_slots(), 3);
        assert_eq!(map.system_slots(), 6);

        let center = &map.layout[0];
        assert_eq!(center.number, Some(18));
        assert_eq!(center.position, Some(Cube::ORIGIN));

        // home world 19 is the north corner of ring 3
        assert_eq!(map.layout[1].position, Some(Direction::N.vector() * 3));
        assert_eq!(map.layout[4].position, spiral_index(1));
        assert!(map.layout[1..10].iter().all(|t| t.is_empty_slot()));
    }

    #[test]
    fn test_from_source_rotates_hyperlanes() {
        let map = Map::from_source(&three_player_source(), &small_catalog()).unwrap();
        let lane = map.layout.last().unwrap();
        assert_eq!(lane.kind, TileKind::Hyperlane);
        assert_eq!(lane.letter, Some(Letter::A));
        assert_eq!(lane.position, spiral_index(22));
        assert_eq!(lane.rotation, 60);
        assert_eq!(
            lane.hyperlanes,
            vec![vec![Direction::NE.vector(), Direction::SW.vector()]]
        );
    }

    #[test]
    fn test_from_source_errors() {
        let catalog = small_catalog();

        let mut source = three_player_source();
        source.home_worlds.push(61);
        assert_eq!(
            Map::from_source(&source, &catalog).unwrap_err(),
            CatalogError::UnknownIndex(61)
        );

        let mut source = three_player_source();
        source.hyperlane_tiles = vec![HyperlaneEntry(22, "91B".to_string(), 0)];
        assert_eq!(
            Map::from_source(&source, &catalog).unwrap_err(),
            CatalogError::TileNotFound("91B".to_string())
        );
    }

    #[test]
    fn test_map_source_from_upstream_json() {
        let source: MapSource = serde_json::from_str(
            r#"{
                "players": 3,
                "style": "normal",
                "home_worlds": [19, 25, 31],
                "primary_tiles": [1, 2, 3],
                "hyperlane_tiles": [[22, "83A", 1]]
            }"#,
        )
        .unwrap();
        assert_eq!(source.hyperlane_tiles[0], HyperlaneEntry(22, "83A".to_string(), 1));
        assert!(source.secondary_tiles.is_empty());
    }

    #[test]
    fn test_map_set_queries() {
        let catalog = small_catalog();
        let mut six = three_player_source();
        six.players = 6;
        six.hyperlane_tiles.clear();
        let maps = MapSet::new(vec![
            Map::from_source(&three_player_source(), &catalog).unwrap(),
            Map::from_source(&six, &catalog).unwrap(),
        ]);

        assert_eq!(maps.for_players(3).len(), 1);
        assert_eq!(maps.with_style(6, "normal").len(), 1);
        assert!(maps.with_style(6, "large").is_empty());
        assert!(maps.find(3, "normal").is_ok());
        assert_eq!(
            maps.find(4, "normal").unwrap_err(),
            CatalogError::MapNotFound {
                players: 4,
                style: "normal".to_string()
            }
        );
    }
}
