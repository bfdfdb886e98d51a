//! Photo source configuration parsed from environment variables.

use std::str::FromStr;

use super::{PhotoError, is_usable_url};

pub const DEFAULT_PHOTO_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/photos";
pub const DEFAULT_FETCH_RETRIES: u32 = 2;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for FetchTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoConfig {
    pub endpoint: String,
    pub retries: u32,
    pub fallback_url: Option<String>,
    pub timeouts: FetchTimeouts,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PHOTO_ENDPOINT.to_string(),
            retries: DEFAULT_FETCH_RETRIES,
            fallback_url: None,
            timeouts: FetchTimeouts::default(),
        }
    }
}

impl PhotoConfig {
    /// Build typed photo config from environment variables.
    ///
    /// Optional:
    /// - `PHOTO_ENDPOINT`: listing URL, default jsonplaceholder
    /// - `PHOTO_FETCH_RETRIES`: default 2
    /// - `PHOTO_FALLBACK_URL`: image used when fetching fails
    /// - `PHOTO_REQUEST_TIMEOUT_SECS`: default 10
    /// - `PHOTO_CONNECT_TIMEOUT_SECS`: default 5
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` for non-numeric counts or non-http(s) URLs.
    pub fn from_env() -> Result<Self, PhotoError> {
        let endpoint = env_string("PHOTO_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_PHOTO_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();
        if !is_usable_url(&endpoint) {
            return Err(PhotoError::ConfigParse(format!("PHOTO_ENDPOINT is not an http(s) URL: {endpoint}")));
        }

        let fallback_url = env_string("PHOTO_FALLBACK_URL");
        if let Some(url) = &fallback_url {
            if !is_usable_url(url) {
                return Err(PhotoError::ConfigParse(format!("PHOTO_FALLBACK_URL is not an http(s) URL: {url}")));
            }
        }

        Ok(Self {
            endpoint,
            retries: env_parse("PHOTO_FETCH_RETRIES", DEFAULT_FETCH_RETRIES)?,
            fallback_url,
            timeouts: FetchTimeouts {
                request_secs: env_parse("PHOTO_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
                connect_secs: env_parse("PHOTO_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
            },
        })
    }
}

fn env_string(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Parse `key` as `T`, or return `default` when it is unset.
///
/// # Errors
///
/// Returns `ConfigParse` when the variable is set but does not parse.
pub fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, PhotoError> {
    match env_string(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| PhotoError::ConfigParse(format!("{key} has invalid value '{raw}'"))),
        None => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
