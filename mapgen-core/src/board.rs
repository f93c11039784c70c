//! Board assembly
//!
//! A board starts as a copy of a map layout. Home slots are filled from the
//! home pool in caller order, system slots from the shuffled system pool.
//! Running out of tiles is not an error: the remaining slots stay empty.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::hex::Cube;
use crate::map::Map;
use crate::tile::{Faction, Release, Tile, TileKind};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A populated board
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    /// System tiles left over after the draw
    #[serde(skip)]
    reserve: Vec<Tile>,
    #[serde(skip)]
    spare_homes: Vec<Tile>,
}

impl Board {
    /// Fill `layout` from the given pools.
    ///
    /// The system pool is shuffled once before any slot is visited; home
    /// tiles are placed in the order given.
    pub fn assemble<R: Rng + ?Sized>(
        layout: &[Tile],
        mut systems: Vec<Tile>,
        homes: Vec<Tile>,
        rng: &mut R,
    ) -> Self {
        systems.shuffle(rng);
        let mut systems = systems.into_iter();
        let mut homes = homes.into_iter();

        let tiles = layout
            .iter()
            .map(|slot| {
                let drawn = match slot.kind {
                    TileKind::Home => homes.next(),
                    TileKind::System => systems.next(),
                    _ => None,
                };
                match drawn {
                    Some(mut tile) => {
                        tile.position = slot.position;
                        tile
                    }
                    None => slot.clone(),
                }
            })
            .collect();

        Self {
            tiles,
            reserve: systems.collect(),
            spare_homes: homes.collect(),
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }

    pub fn reserve(&self) -> &[Tile] {
        &self.reserve
    }

    pub fn spare_homes(&self) -> &[Tile] {
        &self.spare_homes
    }

    pub fn tile_at(&self, position: Cube) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.position == Some(position))
    }

    /// Home and system slots no tile was drawn for
    pub fn empty_slots(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| matches!(t.kind, TileKind::Home | TileKind::System) && t.is_empty_slot())
            .count()
    }

    fn placed_systems(&self) -> Vec<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == TileKind::System && !t.is_empty_slot())
            .map(|(i, _)| i)
            .collect()
    }

    /// One mutation pass with the default `1/n` probability per placed system
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.mutate_with(rng, |n| 1.0 / n as f64)
    }

    /// One mutation pass.
    ///
    /// `probability` receives the number of placed system tiles. A triggered
    /// tile trades places with a random reserve tile; the slot keeps its
    /// position and the tile sent back to the reserve loses it. Returns the
    /// number of swaps made.
    pub fn mutate_with<R, F>(&mut self, rng: &mut R, mut probability: F) -> usize
    where
        R: Rng + ?Sized,
        F: FnMut(usize) -> f64,
    {
        let placed = self.placed_systems();
        let n = placed.len();
        let mut swaps = 0;

        for index in placed {
            if self.reserve.is_empty() {
                break;
            }
            let p = probability(n);
            if p.is_nan() || p <= 0.0 || !rng.gen_bool(p.min(1.0)) {
                continue;
            }

            let pick = rng.gen_range(0..self.reserve.len());
            let slot = &mut self.tiles[index];
            let position = slot.position;
            std::mem::swap(slot, &mut self.reserve[pick]);
            slot.position = position;
            self.reserve[pick].position = None;
            swaps += 1;
        }

        swaps
    }
}

/// Parameters for generating a board from catalog data
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenerateOptions {
    pub factions: Vec<Faction>,
    /// Releases the system pool is drawn from; empty means all
    #[serde(default)]
    pub releases: Vec<Release>,
    pub seed: Option<u64>,
    /// Mutation passes run after assembly
    #[serde(default)]
    pub mutations: u32,
}

/// A generated board together with what produced it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedBoard {
    pub players: u8,
    pub style: String,
    pub factions: Vec<Faction>,
    pub seed: u64,
    pub mutations: usize,
    pub board: Board,
}

/// Assemble a board for `map` from fresh catalog pools
pub fn generate(
    map: &Map,
    catalog: &Catalog,
    options: &GenerateOptions,
) -> Result<GeneratedBoard, CatalogError> {
    let slots = map.home_slots();
    if options.factions.len() > slots {
        return Err(CatalogError::TooManyFactions {
            factions: options.factions.len(),
            slots,
        });
    }

    let homes = catalog.home_pool(&options.factions)?;
    let systems = catalog.system_pool(&options.releases);
    let seed = options.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut board = Board::assemble(&map.layout, systems, homes, &mut rng);
    let mutations: usize = (0..options.mutations)
        .map(|_| board.mutate(&mut rng))
        .sum();

    tracing::debug!(
        players = map.players,
        style = %map.style,
        seed,
        mutations,
        "Generated board"
    );
    if board.empty_slots() > 0 {
        tracing::warn!(
            "Board for {} players ({}) has {} empty slots",
            map.players,
            map.style,
            board.empty_slots()
        );
    }

    Ok(GeneratedBoard {
        players: map.players,
        style: map.style.clone(),
        factions: options.factions.clone(),
        seed,
        mutations,
        board,
    })
}
