//! Molt - a binary that can replace itself with the build served by moltd.

use anyhow::Result;
use clap::Parser;
use molt::apply::{self, Outcome};
use molt::config::{self, UpdateConfig};
use molt::exec::ExecImage;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "molt", version = config::RUNNING_VERSION)]
#[command(about = "Self-updating client for the molt update server", long_about = None)]
struct Cli {
    /// Update server base URL
    #[arg(long, default_value = config::DEFAULT_SERVER_URL)]
    server: String,

    /// Where the downloaded executable is written
    #[arg(long, default_value = config::DEFAULT_ARTIFACT_PATH)]
    artifact_path: PathBuf,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr so user-facing output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = UpdateConfig {
        server_url: cli.server,
        artifact_path: cli.artifact_path,
        ..UpdateConfig::builtin()
    };

    println!("Hello, I am {}", config.running_version);

    match apply::run_update(&config, &mut ExecImage)? {
        Outcome::AlreadyLatest => println!("Already the latest version"),
        // A real replacement never reaches this arm; exec does not return.
        Outcome::Replaced => {}
    }

    Ok(())
}
