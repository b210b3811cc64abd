//! Version check against the update server.

use crate::config::UpdateConfig;
use molt_common::{UpdateCheckError, VersionDescriptor, LATEST_ENDPOINT};
use reqwest::blocking::Client;
use tracing::debug;

/// Ask the server which build is current.
///
/// Returns the raw descriptor; comparing it against the running version
/// is the applier's job.
pub fn check_latest(
    config: &UpdateConfig,
    client: &Client,
) -> Result<VersionDescriptor, UpdateCheckError> {
    let url = format!("{}{}", config.server_url, LATEST_ENDPOINT);
    debug!("Fetching version descriptor from {}", url);

    let response = client
        .get(&url)
        .send()
        .map_err(UpdateCheckError::Transport)?;

    let descriptor: VersionDescriptor = response.json().map_err(UpdateCheckError::Decode)?;
    debug!(
        "Server reports {} at {}",
        descriptor.version, descriptor.path
    );

    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http;
    use crate::testkit::{http_response, serve};
    use std::path::PathBuf;

    fn config(server_url: String) -> UpdateConfig {
        UpdateConfig {
            server_url,
            running_version: "v0.0.1".to_string(),
            work_dir: PathBuf::from("."),
            artifact_path: PathBuf::from("molt.next"),
        }
    }

    #[test]
    fn decodes_the_version_descriptor() {
        let stub = serve(vec![http_response(
            "200 OK",
            br#"{"version":"v0.0.2","path":"v0.0.2-molt.tar.gz"}"#,
        )]);
        let client = http::client().unwrap();

        let descriptor = check_latest(&config(stub.base_url()), &client).unwrap();

        assert_eq!(descriptor.version, "v0.0.2");
        assert_eq!(descriptor.path, "v0.0.2-molt.tar.gz");
        assert_eq!(stub.finish(), vec!["GET /latest HTTP/1.1"]);
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let stub = serve(vec![http_response("200 OK", b"not json at all")]);
        let client = http::client().unwrap();

        let err = check_latest(&config(stub.base_url()), &client).unwrap_err();

        assert!(matches!(err, UpdateCheckError::Decode(_)));
        stub.finish();
    }

    #[test]
    fn missing_field_is_a_decode_error() {
        let stub = serve(vec![http_response("200 OK", br#"{"version":"v0.0.2"}"#)]);
        let client = http::client().unwrap();

        let err = check_latest(&config(stub.base_url()), &client).unwrap_err();

        assert!(matches!(err, UpdateCheckError::Decode(_)));
        stub.finish();
    }

    #[test]
    fn unreachable_server_is_a_transport_error() {
        // Bind and drop to obtain a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = http::client().unwrap();

        let err = check_latest(&config(format!("http://{}", addr)), &client).unwrap_err();

        assert!(matches!(err, UpdateCheckError::Transport(_)));
    }
}
