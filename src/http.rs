//! Shared blocking HTTP client.
//!
//! GitHub rejects requests without a User-Agent, so every client built here
//! carries one.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Long enough for slow model responses.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

pub fn user_agent() -> String {
    format!("now-sc/{}", env!("CARGO_PKG_VERSION"))
}

/// Build the blocking client used by every command.
pub fn client() -> Result<Client> {
    Client::builder()
        .user_agent(user_agent())
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")
}

/// GET a URL and return the body bytes; any non-200 status is an error.
pub fn get_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    tracing::debug!(%url, "GET");
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to GET {}", url))?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        anyhow::bail!("download failed with status {}: {}", status.as_u16(), url);
    }

    let bytes = response
        .bytes()
        .with_context(|| format!("Failed to read response body from {}", url))?;
    Ok(bytes.to_vec())
}
