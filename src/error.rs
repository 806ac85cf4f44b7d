// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Error types for the batch run.
///
/// The configuration/dataset variants are fatal: they halt the run before or
/// between stages with a user-visible message. The download and API variants
/// are per-reference: the orchestrator logs them and moves on to the next
/// column or row.
#[derive(Error, Debug)]
pub enum SwapError {
    #[error("API key is missing or a placeholder; set GEMINI_API_KEY in the environment or .env")]
    MissingCredential,
    #[error("identity image not found: {0}")]
    IdentityImageMissing(PathBuf),
    #[error("failed to read dataset {path}: {source}")]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("dataset has no data rows")]
    EmptyDataset,
    #[error("no image columns detected in dataset")]
    NoImageColumns,
    #[error("no rows with image references found")]
    NoSelectableRows,
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("download failed for {url}: HTTP {status}")]
    DownloadStatus {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("generation request failed: {0}")]
    Api(#[from] reqwest::Error),
    #[error("generation API returned HTTP {status}: {body}")]
    ApiStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
