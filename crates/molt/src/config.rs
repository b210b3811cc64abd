//! Build-time update settings.

use std::path::PathBuf;

/// Version token baked into this binary.
pub const RUNNING_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Update server consulted for new builds.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Where the downloaded executable lands.
pub const DEFAULT_ARTIFACT_PATH: &str = "molt.next";

/// Settings for one update pass, passed explicitly into every stage.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Base URL of the update server.
    pub server_url: String,
    /// Token the server's answer is compared against, exact match only.
    pub running_version: String,
    /// Directory archive directory entries are materialized under.
    pub work_dir: PathBuf,
    /// Fixed destination every archive file entry is written to.
    pub artifact_path: PathBuf,
}

impl UpdateConfig {
    /// The configuration the shipped binary runs with.
    pub fn builtin() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            running_version: RUNNING_VERSION.to_string(),
            work_dir: PathBuf::from("."),
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
        }
    }
}
