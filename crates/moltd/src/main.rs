//! Molt update server daemon.

use anyhow::Result;
use clap::Parser;
use moltd::config::ServerConfig;
use moltd::server;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = ServerConfig::parse();
    info!("moltd v{} starting", env!("CARGO_PKG_VERSION"));

    server::run(config).await
}
