//! Per-file parse failures.
//!
//! Everything that can go wrong while turning one input file into a [`Frame`](crate::models::Frame)
//! is a [`ParseError`]. The ingestion loop catches it at the file boundary, reports it
//! with the file name, and moves on. Nothing above that boundary matches on the variants,
//! so the rest of the crate uses `anyhow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("unsupported file type '{suffix}' (expected csv, xlsx, xlsm, xls, xlsb or ods)")]
    UnsupportedFormat { suffix: String },

    #[error("file too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("line {line} has {found} fields, but the header has {expected}")]
    RaggedRecord { line: u64, found: usize, expected: usize },
}
