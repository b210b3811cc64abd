//! Runtime configuration for moltd.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Update server settings. The defaults describe the demo deployment;
/// every value can be overridden on the command line.
#[derive(Debug, Clone, Parser)]
#[command(name = "moltd", version)]
#[command(about = "Serves version metadata and update artifacts", long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    pub listen: SocketAddr,

    /// Version token advertised as the latest build
    #[arg(long, default_value = "v0.0.2")]
    pub latest: String,

    /// Artifact identifier handed out with the version
    #[arg(long, default_value = "v0.0.2-molt.tar.gz")]
    pub artifact: String,

    /// Directory artifacts are served from
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}
