// src/core/net.rs

// Blocking HTTPS GET for the dictionary API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::StatusCode;

use crate::config::consts::HTTP_TIMEOUT_SECS;
use crate::error::LookupError;

pub fn http_client() -> Result<Client, LookupError> {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .map_err(|e| LookupError::Http(format!("HTTP client build failed: {e}")))
}

/// GET `url` and return the body. A 404 is `Ok(None)`: the resource simply
/// isn't there. Any other non-200 status is an error.
pub fn http_get(client: &Client, url: &str) -> Result<Option<String>, LookupError> {
    let resp = client
        .get(url)
        .header(USER_AGENT, concat!("wordcards/", env!("CARGO_PKG_VERSION")))
        .header(ACCEPT, "application/json")
        .send()?;

    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(LookupError::Http(format!("HTTP error: {status} {url}")));
    }
    Ok(Some(resp.text()?))
}
