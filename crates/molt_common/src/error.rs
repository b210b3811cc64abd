//! Error taxonomy for the update pipeline.
//!
//! One type per stage, so a failure always identifies whether the check,
//! the download, the extraction or the final image replacement broke.
//! There is no retry and no partial-success state anywhere; every one of
//! these is fatal to the run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fetching or decoding the version descriptor failed.
#[derive(Debug, Error)]
pub enum UpdateCheckError {
    #[error("version check request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("version descriptor could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Fetching the artifact failed, or the archive it carried did.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("artifact request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Anything other than 200 is fatal; the body is not an artifact.
    #[error("artifact request returned status {0}")]
    Status(reqwest::StatusCode),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Unpacking the gzip+tar stream failed.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Gzip framing or tar parsing failed while advancing the stream.
    #[error("archive read failed: {0}")]
    Archive(#[source] io::Error),

    #[error("creating directory `{name}` failed: {source}")]
    CreateDir {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("writing artifact {path:?} failed: {source}")]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Only directories and regular files are valid archive entries.
    #[error("unsupported tar entry type `{kind}` for `{name}`")]
    UnsupportedEntry { kind: char, name: String },
}

/// The exec-style handoff to the new binary failed.
///
/// Reaching this means the artifact was downloaded and unpacked but the
/// process image could not be substituted; the run is over either way.
#[derive(Debug, Error)]
#[error("replacing process image with {path:?} failed: {source}")]
pub struct ReplaceError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_entry_names_the_offender() {
        let err = ExtractError::UnsupportedEntry {
            kind: '2',
            name: "lib/link".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains('2'));
        assert!(message.contains("lib/link"));
    }

    #[test]
    fn replace_error_names_the_artifact() {
        let err = ReplaceError {
            path: PathBuf::from("molt.next"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("molt.next"));
    }
}
