// src/dataset/mod.rs
//! Dataset loading and row bookkeeping.
//!
//! The dataset is a delimited text file whose header row names the fields.
//! Rows keep their original 1-based file position so output directories can
//! be named after it even after the processing order is shuffled.

pub mod columns;
pub mod select;

use std::io;
use std::path::Path;

use crate::error::SwapError;

/// One dataset record. `index` is the 1-based position in the original file
/// order; it is assigned at load time and travels with the row through
/// filtering and shuffling, so duplicate rows stay distinguishable.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    values: Vec<String>,
}

impl Row {
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// An ordered, immutable-after-load view of the dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Reads the dataset from `path`. The `csv` reader strips a leading
    /// UTF-8 byte-order marker and takes field names from the header line.
    /// A missing or unreadable file is fatal.
    pub fn load(path: &Path) -> Result<Self, SwapError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|source| SwapError::DatasetRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_csv(reader).map_err(|source| SwapError::DatasetRead {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses dataset content from any reader. Short rows are padded with
    /// empty fields, long rows truncated, so every row lines up with the
    /// header.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, csv::Error> {
        Self::from_csv(csv::ReaderBuilder::new().flexible(true).from_reader(reader))
    }

    fn from_csv<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self, csv::Error> {
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let mut values: Vec<String> = record.iter().map(str::to_string).collect();
            values.resize(headers.len(), String::new());
            rows.push(Row {
                index: i + 1,
                values,
            });
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Looks up a row's value for a named field. Returns `None` for unknown
    /// field names.
    pub fn value<'a>(&self, row: &'a Row, field: &str) -> Option<&'a str> {
        let idx = self.headers.iter().position(|h| h == field)?;
        row.values.get(idx).map(String::as_str)
    }
}
