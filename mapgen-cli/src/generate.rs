//! Generate command - assemble one board from catalog data
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_options(), generate_board(), write_output()
//! - Level 3: parse_factions(), parse_releases()
//! - Level 4: argument definitions

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mapgen_core::{generate, Faction, GenerateOptions, GeneratedBoard, Release};
use mapgen_server::AppState;

use crate::server::validate_data_dir;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct GenerateArgs {
    /// Player count of the map template
    #[arg(long, default_value = "6")]
    pub players: u8,

    /// Map style, e.g. "normal"
    #[arg(long, default_value = "normal")]
    pub style: String,

    /// Faction to seat, by full or short name (repeatable, seat order)
    #[arg(long = "faction", value_name = "NAME")]
    pub factions: Vec<String>,

    /// Restrict the system pool to a release (repeatable): base, pok, codex-3
    #[arg(long = "release", value_name = "RELEASE")]
    pub releases: Vec<String>,

    /// RNG seed; a random one is chosen and reported when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Mutation passes to run after assembly
    #[arg(long, default_value = "0")]
    pub mutations: u32,

    /// Directory containing tiles.json and maps.json
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Write the board here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run generate command
pub fn run(args: GenerateArgs) -> Result<()> {
    validate_data_dir(&args.data_dir)?;
    let state = AppState::load(&args.data_dir)?;

    let options = build_options(&args)?;
    let generated = generate_board(&state, &args, &options)?;

    tracing::info!(
        "Generated {} player {} board with seed {}",
        generated.players,
        generated.style,
        generated.seed
    );

    write_output(&generated, args.output.as_ref())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_options(args: &GenerateArgs) -> Result<GenerateOptions> {
    Ok(GenerateOptions {
        factions: parse_factions(&args.factions)?,
        releases: parse_releases(&args.releases)?,
        seed: args.seed,
        mutations: args.mutations,
    })
}

fn generate_board(
    state: &AppState,
    args: &GenerateArgs,
    options: &GenerateOptions,
) -> Result<GeneratedBoard> {
    let map = state.maps.find(args.players, &args.style)?;
    Ok(generate(map, &state.catalog, options)?)
}

fn write_output(generated: &GeneratedBoard, output: Option<&PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(generated)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing board to {}", path.display()))?;
            tracing::info!("Board written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn parse_factions(names: &[String]) -> Result<Vec<Faction>> {
    names
        .iter()
        .map(|name| name.parse::<Faction>().map_err(anyhow::Error::from))
        .collect()
}

fn parse_releases(names: &[String]) -> Result<Vec<Release>> {
    names
        .iter()
        .map(|name| {
            serde_json::from_value(serde_json::Value::String(name.to_lowercase()))
                .with_context(|| format!("unknown release: {:?}", name))
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
