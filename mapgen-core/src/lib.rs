//! TI4 Mapgen Core - Hex geometry and board assembly
//!
//! This crate provides the core logic for the map generator:
//! - Hex geometry (cube coordinates, rings, spirals, rotation)
//! - Tile records and the tile catalog
//! - Map templates converted from upstream slot indices
//! - Board assembly from shuffled tile pools

pub mod board;
pub mod catalog;
pub mod error;
pub mod hex;
pub mod map;
pub mod tile;

// Re-exports for convenient access
pub use board::{generate, Board, GenerateOptions, GeneratedBoard};
pub use catalog::{Catalog, TileQuery, CENTER_TILE};
pub use error::{CatalogError, HexError, OperandError};
pub use hex::{
    adjacent, diagonal_neighbor, distance, length, ring, rotate, spiral, spiral_index, Cube,
    Diagonal, Direction, Rotation, BOARD_RADIUS,
};
pub use map::{HyperlaneEntry, Map, MapSet, MapSource};
pub use tile::{Faction, Release, System, Tile, TileCode, TileKind};
