//! Shared HTTP client construction.

use reqwest::blocking::Client;

const USER_AGENT: &str = concat!("molt/", env!("CARGO_PKG_VERSION"));

/// Build the blocking client used for the version check and the artifact
/// download.
///
/// Every call through this client is a single attempt with no deadline:
/// the blocking client ships with a 30 second default timeout, which
/// would cut large artifact transfers short, so it is disabled here.
pub fn client() -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(USER_AGENT).timeout(None).build()
}
