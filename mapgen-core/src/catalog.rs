//! Tile catalog - static tile records loaded once at startup

use crate::error::CatalogError;
use crate::tile::{Color, Faction, Letter, Release, Tile, TileCode, TileKind};
use anyhow::Context;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Center tile (Mecatol Rex)
pub const CENTER_TILE: u16 = 18;

/// Field filters for catalog queries; unset fields match everything
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileQuery {
    pub kind: Option<TileKind>,
    pub number: Option<u16>,
    pub letter: Option<Letter>,
    pub release: Option<Release>,
    pub back: Option<Color>,
    pub faction: Option<Faction>,
}

impl TileQuery {
    pub fn matches(&self, tile: &Tile) -> bool {
        fn check<T: PartialEq>(want: &Option<T>, have: &Option<T>) -> bool {
            want.as_ref().map_or(true, |w| have.as_ref() == Some(w))
        }

        self.kind.map_or(true, |k| tile.kind == k)
            && check(&self.number, &tile.number)
            && check(&self.letter, &tile.letter)
            && check(&self.release, &tile.release)
            && check(&self.back, &tile.back)
            && check(&self.faction, &tile.faction)
    }
}

/// All known tiles, indexed by code
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    tiles: Vec<Tile>,
    index: FxHashMap<TileCode, usize>,
}

impl Catalog {
    pub fn from_tiles(mut tiles: Vec<Tile>) -> Self {
        tiles.sort_by_key(|t| t.code());
        let index = tiles
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.code().map(|code| (code, i)))
            .collect();
        Self { tiles, index }
    }

    /// Load from a JSON array of tile records
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading tile data from {}", path.display()))?;
        let tiles: Vec<Tile> = serde_json::from_str(&content)
            .with_context(|| format!("parsing tile data from {}", path.display()))?;

        let mut seen = FxHashSet::default();
        for tile in &tiles {
            if let Some(code) = tile.code() {
                if !seen.insert(code) {
                    anyhow::bail!("duplicate tile code {} in {}", code, path.display());
                }
            }
            if let Some(number) = tile.number {
                let expected = TileKind::from_number(number)?;
                if tile.kind != expected {
                    anyhow::bail!(
                        "tile {} is tagged {:?} but its number makes it {:?}",
                        number,
                        tile.kind,
                        expected
                    );
                }
            }
        }

        tracing::info!("Loaded {} tiles from {}", tiles.len(), path.display());
        Ok(Self::from_tiles(tiles))
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile(&self, code: TileCode) -> Option<&Tile> {
        self.index.get(&code).map(|&i| &self.tiles[i])
    }

    /// Look up a tile by its printed code, e.g. `"83A"`
    pub fn by_code(&self, code: &str) -> Result<&Tile, CatalogError> {
        let parsed: TileCode = code.parse()?;
        self.tile(parsed)
            .ok_or_else(|| CatalogError::TileNotFound(parsed.to_string()))
    }

    pub fn center_tile(&self) -> Result<&Tile, CatalogError> {
        let code = TileCode {
            number: CENTER_TILE,
            letter: None,
        };
        self.tile(code)
            .ok_or_else(|| CatalogError::TileNotFound(code.to_string()))
    }

    pub fn filter(&self, query: &TileQuery) -> Vec<&Tile> {
        self.tiles.iter().filter(|t| query.matches(t)).collect()
    }

    /// Fresh copies of every drawable system tile; empty `releases` means all
    pub fn system_pool(&self, releases: &[Release]) -> Vec<Tile> {
        self.tiles
            .iter()
            .filter(|t| t.kind == TileKind::System)
            .filter(|t| {
                releases.is_empty() || t.release.map_or(false, |r| releases.contains(&r))
            })
            .cloned()
            .collect()
    }

    /// Home tiles for `factions`, in the order given
    pub fn home_pool(&self, factions: &[Faction]) -> Result<Vec<Tile>, CatalogError> {
        factions
            .iter()
            .map(|&faction| {
                let number = faction
                    .home_tile_number()
                    .ok_or_else(|| CatalogError::NoHomeSystem(faction.to_string()))?;
                self.tile(TileCode {
                    number,
                    letter: None,
                })
                .cloned()
                .ok_or_else(|| CatalogError::TileNotFound(number.to_string()))
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lookup_by_code() {
        let catalog = small_catalog();
        assert_eq!(catalog.by_code("18").unwrap().kind, TileKind::Center);
        assert_eq!(catalog.by_code("83B").unwrap().letter, Some(Letter::B));
        assert_eq!(
            catalog.by_code("83").unwrap_err(),
            CatalogError::TileNotFound("83".to_string())
        );
        assert!(matches!(
            catalog.by_code("foo"),
            Err(CatalogError::InvalidTileCode(_))
        ));
        assert_eq!(catalog.center_tile().unwrap().number, Some(CENTER_TILE));
    }

    #[test]
    fn test_filter() {
        let catalog = small_catalog();
        let query = TileQuery {
            kind: Some(TileKind::System),
            release: Some(Release::Pok),
            ..Default::default()
        };
        let found = catalog.filter(&query);
        assert_eq!(found.len(), 4);
        assert!(found.iter().all(|t| t.number.unwrap() >= 59));

        let query = TileQuery {
            faction: Some(Faction::Hacan),
            ..Default::default()
        };
        let found = catalog.filter(&query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].number, Some(16));

        assert_eq!(catalog.filter(&TileQuery::default()).len(), catalog.len());
    }

    #[test]
    fn test_system_pool() {
        let catalog = small_catalog();
        assert_eq!(catalog.system_pool(&[]).len(), 16);
        assert_eq!(catalog.system_pool(&[Release::Base]).len(), 12);
        assert!(catalog
            .system_pool(&[])
            .iter()
            .all(|t| t.kind == TileKind::System && t.position.is_none()));
    }

    #[test]
    fn test_home_pool_keeps_caller_order() {
        let catalog = small_catalog();
        let homes = catalog
            .home_pool(&[Faction::Xxcha, Faction::Sol, Faction::Argent])
            .unwrap();
        let numbers: Vec<_> = homes.iter().map(|t| t.number.unwrap()).collect();
        assert_eq!(numbers, vec![14, 1, 58]);

        assert_eq!(
            catalog.home_pool(&[Faction::Keleres]).unwrap_err(),
            CatalogError::NoHomeSystem("The Council Keleres".to_string())
        );
        assert_eq!(
            catalog.home_pool(&[Faction::Winnu]).unwrap_err(),
            CatalogError::TileNotFound("7".to_string())
        );
    }

    #[test]
    fn test_load_rejects_mismatched_kind() {
        let mut tile = system_tile(19, 1, 1);
        tile.kind = TileKind::Home;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&vec![tile]).unwrap()).unwrap();
        assert!(Catalog::load(file.path()).is_err());
    }

    #[test]
    fn test_load_round_trip() {
        let catalog = small_catalog();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(catalog.tiles()).unwrap()).unwrap();
        let loaded = Catalog::load(file.path()).unwrap();
        assert_eq!(loaded.tiles(), catalog.tiles());
    }

    #[test]
    fn test_load_rejects_duplicate_codes() {
        let tiles = vec![system_tile(19, 1, 1), system_tile(20, 2, 0), system_tile(19, 0, 2)];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&tiles).unwrap()).unwrap();
        let err = Catalog::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("duplicate tile code 19"));
    }
}
