//! Wire protocol between the molt client and moltd.

use serde::{Deserialize, Serialize};

/// Endpoint returning the latest build descriptor.
pub const LATEST_ENDPOINT: &str = "/latest";

/// Endpoint streaming an artifact back by identifier.
pub const FILE_ENDPOINT: &str = "/file";

/// Query parameter naming the artifact on the file endpoint.
pub const FILE_QUERY_PARAM: &str = "path";

/// Latest-build descriptor handed out by the update server.
///
/// `version` is an opaque token compared for exact equality only. `path`
/// identifies the artifact to the server; the client never treats it as a
/// local filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDescriptor {
    pub version: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_decodes_from_server_json() {
        let descriptor: VersionDescriptor =
            serde_json::from_str(r#"{"version":"v0.0.2","path":"v0.0.2-molt.tar.gz"}"#).unwrap();
        assert_eq!(descriptor.version, "v0.0.2");
        assert_eq!(descriptor.path, "v0.0.2-molt.tar.gz");
    }

    #[test]
    fn descriptor_requires_both_fields() {
        assert!(serde_json::from_str::<VersionDescriptor>(r#"{"version":"v0.0.2"}"#).is_err());
        assert!(serde_json::from_str::<VersionDescriptor>(r#"{"path":"a.tar.gz"}"#).is_err());
    }
}
