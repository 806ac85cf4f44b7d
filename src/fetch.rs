// src/fetch.rs

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::SwapError;

/// Reads the identity reference image. Called exactly once at startup; a
/// missing file has already been caught by config validation, but any read
/// failure here is still fatal.
pub fn read_identity(path: &Path) -> Result<Vec<u8>, SwapError> {
    Ok(fs::read(path)?)
}

/// Downloads structure reference images. One blocking client with a bounded
/// timeout is shared across the whole run.
pub struct ImageFetcher {
    client: reqwest::blocking::Client,
}

impl ImageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, SwapError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches raw bytes for a URL. Transport failures and non-2xx statuses
    /// are errors the caller treats as "skip this reference"; they never
    /// abort the run. No retry.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, SwapError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| SwapError::Download {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(SwapError::DownloadStatus {
                url: url.to_string(),
                status,
            });
        }
        let bytes = response.bytes().map_err(|source| SwapError::Download {
            url: url.to_string(),
            source,
        })?;
        Ok(bytes.to_vec())
    }
}
