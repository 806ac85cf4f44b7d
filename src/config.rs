// src/config.rs

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::SwapError;

/// Values that mean "nobody set a real key". The original tooling shipped
/// with `xxx` in its config; clap help text uses `YOUR_API_KEY_HERE`.
const PLACEHOLDER_KEYS: [&str; 3] = ["", "xxx", "YOUR_API_KEY_HERE"];

#[derive(Parser, Debug)]
#[command(
    name = "identity-swap",
    about = "Batch identity swap: composite a fixed identity image onto every image URL in a CSV via the Gemini image API"
)]
pub struct Cli {
    /// CSV dataset; the header row names the fields, image columns are auto-detected
    #[arg(long, default_value = "data.csv")]
    pub dataset: PathBuf,

    /// Identity reference image, loaded once and reused for every generation
    #[arg(long, default_value = "face.png")]
    pub identity_image: PathBuf,

    /// Base directory for per-row output folders
    #[arg(long, default_value = "generated_images")]
    pub output_dir: PathBuf,

    /// Gemini model to use for generation
    #[arg(long, default_value = "gemini-3-pro-image-preview")]
    pub model: String,

    /// API base URL
    #[arg(long, default_value = "https://generativelanguage.googleapis.com/v1beta")]
    pub api_base: String,

    /// Aspect ratio requested for generated images
    #[arg(long, default_value = "9:16")]
    pub aspect_ratio: String,

    /// Seconds to sleep after each processed image column
    #[arg(long, default_value_t = 2)]
    pub column_delay: u64,

    /// Timeout in seconds for structure image downloads
    #[arg(long, default_value_t = 30)]
    pub fetch_timeout: u64,

    /// Timeout in seconds for generation API calls
    #[arg(long, default_value_t = 120)]
    pub api_timeout: u64,
}

/// Immutable run configuration, built once at startup and passed to the
/// orchestrator. The credential comes from the environment (`GEMINI_API_KEY`),
/// everything else from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub dataset: PathBuf,
    pub identity_image: PathBuf,
    pub output_dir: PathBuf,
    pub aspect_ratio: String,
    pub column_delay: Duration,
    pub fetch_timeout: Duration,
    pub api_timeout: Duration,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: cli.model,
            api_base: cli.api_base,
            dataset: cli.dataset,
            identity_image: cli.identity_image,
            output_dir: cli.output_dir,
            aspect_ratio: cli.aspect_ratio,
            column_delay: Duration::from_secs(cli.column_delay),
            fetch_timeout: Duration::from_secs(cli.fetch_timeout),
            api_timeout: Duration::from_secs(cli.api_timeout),
        }
    }

    /// Startup validation. Runs before the dataset is touched or any network
    /// request is made; either failure halts the run with no partial work.
    pub fn validate(&self) -> Result<(), SwapError> {
        if PLACEHOLDER_KEYS.contains(&self.api_key.trim()) {
            return Err(SwapError::MissingCredential);
        }
        if !self.identity_image.exists() {
            return Err(SwapError::IdentityImageMissing(self.identity_image.clone()));
        }
        Ok(())
    }
}
