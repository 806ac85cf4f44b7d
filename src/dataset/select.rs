// src/dataset/select.rs

use rand::seq::SliceRandom;

use super::{Dataset, Row};

/// Keeps the rows that have at least one non-empty (after trimming) value in
/// a detected image column. Rows come back in file order, still carrying
/// their original 1-based index.
pub fn select_rows(dataset: &Dataset, image_columns: &[String]) -> Vec<Row> {
    dataset
        .rows
        .iter()
        .filter(|row| {
            image_columns.iter().any(|col| {
                dataset
                    .value(row, col)
                    .map(|v| !v.trim().is_empty())
                    .unwrap_or(false)
            })
        })
        .cloned()
        .collect()
}

/// Uniformly shuffles the processing order. Seeded from default entropy, so
/// ordering is intentionally not reproducible across runs.
pub fn shuffle_rows(rows: &mut [Row]) {
    rows.shuffle(&mut rand::rng());
}
