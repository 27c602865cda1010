//! Data models for tabular ingestion.
//!
//! - [`Value`] - A single typed cell, with `Empty` as the missing marker
//! - [`Frame`] - Ordered named columns plus rows of values
//! - [`UploadedFile`] - A named input file, in memory or on disk
//!
//! Frames keep source column order. Appending frames with different column sets
//! unions the columns rather than failing, since themed datasets are free to add
//! indicators over time.

pub mod frame;
pub mod upload;
pub mod value;

pub use frame::{Frame, Row, normalize_headers};
pub use upload::UploadedFile;
pub use value::{Value, is_missing_marker};
