//! Maps command - list available map templates

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use mapgen_core::Map;
use mapgen_server::AppState;

use crate::server::validate_data_dir;

#[derive(Args)]
pub struct MapsArgs {
    /// Only list maps for this player count
    #[arg(long)]
    pub players: Option<u8>,

    /// Directory containing tiles.json and maps.json
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}

/// Run maps command
pub fn run(args: MapsArgs) -> Result<()> {
    validate_data_dir(&args.data_dir)?;
    let state = AppState::load(&args.data_dir)?;

    let maps: Vec<&Map> = match args.players {
        Some(players) => state.maps.for_players(players),
        None => state.maps.all().iter().collect(),
    };

    if maps.is_empty() {
        println!("No maps found");
        return Ok(());
    }

    println!("{:<8} {:<12} {:>6} {:>8}  DESCRIPTION", "PLAYERS", "STYLE", "HOMES", "SYSTEMS");
    for map in maps {
        println!("{}", format_map_row(map));
    }
    Ok(())
}

fn format_map_row(map: &Map) -> String {
    format!(
        "{:<8} {:<12} {:>6} {:>8}  {}",
        map.players,
        map.style,
        map.home_slots(),
        map.system_slots(),
        map.description
    )
}
