//! Example to run the map generator server standalone
//!
//! Run with: cargo run -p mapgen-server --example run_server

use mapgen_server::{run_server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::default();
    println!("Starting map generator on port {}", config.port);
    println!("Tile and map data from: {}", config.data_dir.display());
    println!(
        "Try: curl -X POST localhost:{}/api/generate -H 'content-type: application/json' \
         -d '{{\"players\": 6, \"style\": \"normal\", \"factions\": []}}'",
        config.port
    );

    run_server(config).await
}
