//! HTTP route handlers

pub mod factions;
pub mod generate;
pub mod hex;
pub mod maps;
pub mod status;
pub mod tiles;
