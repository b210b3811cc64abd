//! Gzip+tar extraction of update artifacts.
//!
//! The archive is treated as a transport wrapper around a single
//! executable: directory entries are materialized, every regular file
//! entry is written to one fixed destination, and anything else aborts
//! the run.

use flate2::read::GzDecoder;
use molt_common::ExtractError;
use std::fs::{self, File, Permissions};
use std::io::{self, Read};
use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
use std::path::Path;
use tar::{Archive, Entry, EntryType};
use tracing::debug;

/// Unpack a gzip-compressed tar stream.
///
/// Entries are processed in stream order; the sequence is not seekable
/// and is never buffered whole. Directory entries are created beneath
/// `work_dir`. Regular file entries all land at `artifact_path`; the
/// entry's own name carries no meaning here, and a later entry
/// overwrites an earlier one. Any other entry type is rejected.
pub fn unpack<R: Read>(
    stream: R,
    work_dir: &Path,
    artifact_path: &Path,
) -> Result<(), ExtractError> {
    let mut archive = Archive::new(GzDecoder::new(stream));

    for entry in archive.entries().map_err(ExtractError::Archive)? {
        let mut entry = entry.map_err(ExtractError::Archive)?;
        let name = entry_name(&entry);

        match entry.header().entry_type() {
            EntryType::Directory => {
                debug!("Creating directory {}", name);
                fs::DirBuilder::new()
                    .mode(0o755)
                    .create(work_dir.join(&name))
                    .map_err(|source| ExtractError::CreateDir { name, source })?;
            }
            EntryType::Regular => {
                debug!("Writing artifact {}", artifact_path.display());
                write_artifact(&mut entry, artifact_path)?;
            }
            other => {
                return Err(ExtractError::UnsupportedEntry {
                    kind: other.as_byte() as char,
                    name,
                });
            }
        }
    }

    Ok(())
}

/// Copy one file entry's bytes to the artifact path and mirror the
/// entry's mode bits so a packaged executable stays runnable.
fn write_artifact<R: Read>(
    entry: &mut Entry<'_, R>,
    artifact_path: &Path,
) -> Result<(), ExtractError> {
    let mut out = File::create(artifact_path)
        .map_err(|source| write_error(artifact_path, source))?;

    // The handle is closed before a copy failure surfaces, and the copy
    // error takes precedence; a flush failure after a clean copy is
    // fatal on its own.
    let copied = io::copy(entry, &mut out).and_then(|_| out.sync_all());
    drop(out);
    copied.map_err(|source| write_error(artifact_path, source))?;

    let mode = entry
        .header()
        .mode()
        .map_err(ExtractError::Archive)?;
    fs::set_permissions(artifact_path, Permissions::from_mode(mode & 0o7777))
        .map_err(|source| write_error(artifact_path, source))?;

    Ok(())
}

fn write_error(path: &Path, source: io::Error) -> ExtractError {
    ExtractError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    }
}

fn entry_name<R: Read>(entry: &Entry<'_, R>) -> String {
    entry
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| String::from("<unreadable name>"))
}
