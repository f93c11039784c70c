//! TI4 Mapgen CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the HTTP map generator service
//! - generate: Assemble one board and print it as JSON
//! - maps: List the available map templates

mod generate;
mod maps;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mapgen")]
#[command(about = "Galaxy map generator for hex tile strategy boards")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service
    Serve(server::ServerArgs),
    /// Generate a board
    Generate(generate::GenerateArgs),
    /// List map templates
    Maps(maps::MapsArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so generated JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args),
        Commands::Generate(args) => generate::run(args),
        Commands::Maps(args) => maps::run(args),
    }
}
