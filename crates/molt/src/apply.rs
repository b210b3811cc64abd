//! Update orchestration: check, download, hand off to the new image.

use crate::check;
use crate::config::UpdateConfig;
use crate::download;
use crate::exec::ProcessImage;
use crate::http;
use anyhow::{Context, Result};
use tracing::info;

/// How an update pass ended, for the paths that do return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Server and client agree on the version; nothing was downloaded.
    AlreadyLatest,
    /// The artifact was installed and the image handoff was accepted.
    /// With the real exec-backed image this variant is never observed.
    Replaced,
}

/// Run one update pass: check, download+extract, replace.
///
/// Strictly sequential, single attempt per stage, no recovery. Every
/// error is wrapped with the stage that produced it and bubbles to the
/// caller; with [`crate::exec::ExecImage`] a successful replacement does
/// not come back at all.
pub fn run_update(config: &UpdateConfig, image: &mut dyn ProcessImage) -> Result<Outcome> {
    let client = http::client().context("building HTTP client")?;

    println!("Checking for updates...");
    let descriptor = check::check_latest(config, &client).context("update check failed")?;

    if descriptor.version == config.running_version {
        info!(
            "Running version {} matches the server",
            config.running_version
        );
        return Ok(Outcome::AlreadyLatest);
    }

    println!("Downloading latest version...");
    download::download(config, &client, &descriptor.path)
        .with_context(|| format!("downloading `{}` failed", descriptor.path))?;

    info!(
        "Version {} written to {}",
        descriptor.version,
        config.artifact_path.display()
    );

    image
        .replace(&config.artifact_path)
        .context("process image replacement failed")?;

    Ok(Outcome::Replaced)
}
