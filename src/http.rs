//! Shared outbound HTTP client construction.

use std::time::Duration;

use reqwest::Client;

use crate::constants::USER_AGENT;

/// Builds the client every adapter, the backend and the transport share.
///
/// The timeout is the only bound on an outbound call; nothing upstream of the
/// client enforces one.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Returns the host part of `link`, or an empty string if it does not parse.
pub fn host_of(link: &str) -> String {
    url::Url::parse(link)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}
