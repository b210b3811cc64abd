//! Artifact download, streamed straight into extraction.

use crate::config::UpdateConfig;
use crate::extract;
use molt_common::{DownloadError, FILE_ENDPOINT, FILE_QUERY_PARAM};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

/// Fetch the artifact identified by `path` and unpack it.
///
/// The response body is an `io::Read` and is consumed by the extractor
/// as it arrives; the payload is never buffered whole. One attempt only;
/// any failure goes straight back to the caller.
pub fn download(config: &UpdateConfig, client: &Client, path: &str) -> Result<(), DownloadError> {
    let url = format!("{}{}", config.server_url, FILE_ENDPOINT);
    debug!("Downloading artifact {} from {}", path, url);

    let response = client
        .get(&url)
        .query(&[(FILE_QUERY_PARAM, path)])
        .send()?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(DownloadError::Status(status));
    }

    extract::unpack(response, &config.work_dir, &config.artifact_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http;
    use crate::testkit::{archive, http_response, serve, ArchiveEntry};
    use std::fs;
    use std::path::Path;

    fn config_for(dir: &Path, server_url: String) -> UpdateConfig {
        UpdateConfig {
            server_url,
            running_version: "v0.0.1".to_string(),
            work_dir: dir.to_path_buf(),
            artifact_path: dir.join("molt.next"),
        }
    }

    #[test]
    fn non_ok_status_fails_without_touching_disk() {
        let stub = serve(vec![http_response("404 Not Found", b"no such artifact")]);
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), stub.base_url());
        let client = http::client().unwrap();

        let err = download(&config, &client, "v0.0.2-molt.tar.gz").unwrap_err();

        match err {
            DownloadError::Status(status) => assert_eq!(status.as_u16(), 404),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!config.artifact_path.exists());
        // Exactly one request went out; there is no retry loop.
        assert_eq!(stub.finish().len(), 1);
    }

    #[test]
    fn ok_response_streams_into_extraction() {
        let body = archive(&[ArchiveEntry::File("app2", b"BINARY")]);
        let stub = serve(vec![http_response("200 OK", &body)]);
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), stub.base_url());
        let client = http::client().unwrap();

        download(&config, &client, "v0.0.2-molt.tar.gz").unwrap();

        assert_eq!(fs::read(&config.artifact_path).unwrap(), b"BINARY");
        assert_eq!(
            stub.finish(),
            vec!["GET /file?path=v0.0.2-molt.tar.gz HTTP/1.1"]
        );
    }

    #[test]
    fn artifact_identifier_is_url_encoded() {
        let body = archive(&[ArchiveEntry::File("app2", b"BINARY")]);
        let stub = serve(vec![http_response("200 OK", &body)]);
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), stub.base_url());
        let client = http::client().unwrap();

        download(&config, &client, "v0.0.2 molt.tar.gz").unwrap();

        assert_eq!(
            stub.finish(),
            vec!["GET /file?path=v0.0.2%20molt.tar.gz HTTP/1.1"]
        );
    }

    #[test]
    fn broken_archive_surfaces_as_extract_error() {
        let stub = serve(vec![http_response("200 OK", b"this is not gzip")]);
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), stub.base_url());
        let client = http::client().unwrap();

        let err = download(&config, &client, "v0.0.2-molt.tar.gz").unwrap_err();

        assert!(matches!(err, DownloadError::Extract(_)));
        stub.finish();
    }
}
