//! reqwest-backed photo listing client.
//!
//! Thin GET wrapper around the listing endpoint. Pure parsing lives in
//! `parse_listing` for testability.

use super::config::PhotoConfig;
use super::{PhotoError, PhotoRecord, PhotoSource};

pub struct HttpPhotoSource {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpPhotoSource {
    /// Build a client for `config.endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the reqwest client cannot be constructed.
    pub fn new(config: &PhotoConfig) -> Result<Self, PhotoError> {
        let http = build_client(config)?;
        Ok(Self { http, endpoint: config.endpoint.clone() })
    }

    /// Wrap an already-configured reqwest client.
    #[must_use]
    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self { http, endpoint: endpoint.into() }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(config: &PhotoConfig) -> Result<reqwest::Client, PhotoError> {
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeouts.request_secs))
        .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
        .build()
        .map_err(|e| PhotoError::HttpClientBuild(e.to_string()))
}

// The browser's fetch owns timeouts on wasm.
#[cfg(target_arch = "wasm32")]
fn build_client(_config: &PhotoConfig) -> Result<reqwest::Client, PhotoError> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| PhotoError::HttpClientBuild(e.to_string()))
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl PhotoSource for HttpPhotoSource {
    async fn list(&self) -> Result<Vec<PhotoRecord>, PhotoError> {
        let response = self
            .http
            .get(&self.endpoint)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| PhotoError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| PhotoError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(PhotoError::Response { status, body: text });
        }

        parse_listing(&text)
    }
}

/// Parse a listing body: a JSON array of records.
///
/// # Errors
///
/// Returns `Parse` if the body is not a JSON array of objects.
pub fn parse_listing(json: &str) -> Result<Vec<PhotoRecord>, PhotoError> {
    serde_json::from_str(json).map_err(|e| PhotoError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
