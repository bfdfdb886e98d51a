//! Photo source — where new tiles get their pictures.
//!
//! DESIGN
//! ======
//! A `PhotoSource` lists candidate photos; `fetch_photo` wraps one listing
//! call in the retry-or-fallback policy and picks a usable record at random.
//! `HttpPhotoSource` is the reqwest implementation used by both hosts; tests
//! substitute their own sources through the trait.

pub mod config;
pub mod http;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::ids::Picker;

pub use config::PhotoConfig;
pub use http::HttpPhotoSource;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while obtaining a photo.
#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request failed before a response arrived.
    #[error("photo request failed: {0}")]
    Request(String),

    /// The endpoint returned a non-success HTTP status.
    #[error("photo endpoint returned status {status}")]
    Response { status: u16, body: String },

    /// The listing body could not be deserialized.
    #[error("photo listing parse failed: {0}")]
    Parse(String),

    /// The listing contained no records.
    #[error("photo listing is empty")]
    EmptyListing,

    /// None of the listed records has an http(s) URL.
    #[error("no usable photo URL among {count} records")]
    NoUsableUrl { count: usize },
}

impl PhotoError {
    /// Whether trying again might succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Response { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// TYPES
// =============================================================================

/// One entry of a photo listing. Records without a `url` are tolerated and
/// skipped when choosing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PhotoRecord {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl PhotoRecord {
    /// The record's URL if it is non-empty and http(s).
    #[must_use]
    pub fn usable_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| is_usable_url(u))
    }
}

/// Whether `url` can be handed to an image element.
#[must_use]
pub fn is_usable_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    rest.is_some_and(|r| !r.is_empty())
}

/// The photo a new tile will show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoOutcome {
    /// A URL chosen from the listing.
    Fetched { url: String },
    /// The configured fallback, used because fetching failed.
    Fallback { url: String, cause: String },
}

impl PhotoOutcome {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Fetched { url } | Self::Fallback { url, .. } => url,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Retry budget and fallback image for `fetch_photo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Extra attempts after the first, spent only on retryable errors.
    pub retries: u32,
    /// Image used when every attempt fails.
    pub fallback_url: Option<String>,
}

impl From<&PhotoConfig> for FetchPolicy {
    fn from(config: &PhotoConfig) -> Self {
        Self { retries: config.retries, fallback_url: config.fallback_url.clone() }
    }
}

// =============================================================================
// SOURCE
// =============================================================================

/// Anything that can list candidate photos.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait PhotoSource: Send + Sync {
    /// Fetch the current listing.
    ///
    /// # Errors
    ///
    /// Returns a [`PhotoError`] if the request fails or the body is malformed.
    async fn list(&self) -> Result<Vec<PhotoRecord>, PhotoError>;
}

/// Pick one usable record from `records`.
///
/// # Errors
///
/// Returns `EmptyListing` for an empty listing and `NoUsableUrl` when no
/// record has an http(s) URL.
pub fn choose_photo(records: &[PhotoRecord], picker: &mut dyn Picker) -> Result<String, PhotoError> {
    if records.is_empty() {
        return Err(PhotoError::EmptyListing);
    }
    let usable: Vec<&str> = records.iter().filter_map(PhotoRecord::usable_url).collect();
    if usable.is_empty() {
        return Err(PhotoError::NoUsableUrl { count: records.len() });
    }
    let index = picker.pick(usable.len()) % usable.len();
    Ok(usable[index].to_string())
}

/// List photos from `source` and choose one, retrying retryable failures and
/// falling back to `policy.fallback_url` when every attempt fails.
///
/// # Errors
///
/// Returns the last error when all attempts fail and no fallback is set.
pub async fn fetch_photo(
    source: &dyn PhotoSource,
    picker: &mut dyn Picker,
    policy: &FetchPolicy,
) -> Result<PhotoOutcome, PhotoError> {
    let attempts = policy.retries.saturating_add(1);
    let mut attempt = 0;

    let err = loop {
        attempt += 1;
        let result = match source.list().await {
            Ok(records) => choose_photo(&records, picker),
            Err(e) => Err(e),
        };
        match result {
            Ok(url) => {
                debug!(%url, attempt, "photo chosen");
                return Ok(PhotoOutcome::Fetched { url });
            }
            Err(e) if e.retryable() && attempt < attempts => {
                warn!(error = %e, attempt, attempts, "photo fetch failed, retrying");
            }
            Err(e) => break e,
        }
    };

    match &policy.fallback_url {
        Some(url) => {
            warn!(error = %err, %url, "photo fetch failed, using fallback");
            Ok(PhotoOutcome::Fallback { url: url.clone(), cause: err.to_string() })
        }
        None => {
            warn!(error = %err, "photo fetch failed");
            Err(err)
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
