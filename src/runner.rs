// src/runner.rs
//! Top-level orchestration: one row, one column, one request at a time.

use std::fs;
use std::thread;

use log::{info, warn};

use crate::config::Config;
use crate::dataset::columns::detect_image_columns;
use crate::dataset::select::{select_rows, shuffle_rows};
use crate::dataset::Dataset;
use crate::error::SwapError;
use crate::fetch::{read_identity, ImageFetcher};
use crate::gemini::{encode_image, CompositionClient};
use crate::output::{sanitize_column_name, save_images};

/// Runs the whole batch. Fatal errors (configuration, dataset, empty
/// stages) bubble up for `main` to report; per-reference failures are
/// logged here and skipped, and the loop always continues to the next
/// column or row.
pub fn run(config: &Config) -> Result<(), SwapError> {
    config.validate()?;

    println!("🚀 Starting identity swap using {}", config.model);
    println!("   Mode: Pure Image-Based (No text description)");

    // The identity reference is loaded and encoded exactly once; every
    // request reuses the same encoding.
    let identity_b64 = encode_image(&read_identity(&config.identity_image)?);

    let dataset = Dataset::load(&config.dataset)?;
    if dataset.rows.is_empty() {
        return Err(SwapError::EmptyDataset);
    }

    println!("\n🔍 Detecting image columns...");
    let image_columns = detect_image_columns(&dataset);
    if image_columns.is_empty() {
        return Err(SwapError::NoImageColumns);
    }
    for col in &image_columns {
        println!("✓ Detected image column: {col}");
    }
    println!(
        "📊 Found {} image column(s): {}\n",
        image_columns.len(),
        image_columns.join(", ")
    );

    let mut rows = select_rows(&dataset, &image_columns);
    if rows.is_empty() {
        return Err(SwapError::NoSelectableRows);
    }
    shuffle_rows(&mut rows);
    println!("🎲 Processing {} rows in random order", rows.len());

    let fetcher = ImageFetcher::new(config.fetch_timeout)?;
    let client = CompositionClient::new(config)?;

    let mut references_processed = 0usize;
    let mut images_saved = 0usize;

    for row in &rows {
        println!("\n{}", "=".repeat(50));
        println!("Processing Row {}", row.index);
        println!("{}", "=".repeat(50));

        let row_dir = config.output_dir.join(format!("row_{}", row.index));
        fs::create_dir_all(&row_dir)?;

        for column in &image_columns {
            let url = match dataset.value(row, column) {
                Some(value) => value.trim(),
                None => continue,
            };
            if url.is_empty() {
                continue;
            }
            println!("🔄 Processing {column}...");

            let structure = match fetcher.fetch(url) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("{e}");
                    continue;
                }
            };
            references_processed += 1;

            match client.compose(&identity_b64, &structure) {
                Ok(response) => {
                    images_saved += save_images(&response, &row_dir, &sanitize_column_name(column));
                }
                Err(e) => warn!("{e}"),
            }

            // Crude pacing between API calls; configurable but unconditional.
            thread::sleep(config.column_delay);
        }
    }

    println!("\n{}", "=".repeat(50));
    println!("SUMMARY");
    println!("{}", "=".repeat(50));
    println!("Rows processed:       {}", rows.len());
    println!("References processed: {references_processed}");
    println!("Images saved:         {images_saved}");
    println!("\n📁 Output: {}/", config.output_dir.display());
    info!(
        "run complete: {} rows, {} references, {} images",
        rows.len(),
        references_processed,
        images_saved
    );

    Ok(())
}
