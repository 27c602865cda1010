//! Peer Portal - Load themed country datasets and compare peers
//!
//! This library ingests CSV and spreadsheet files into a [`ThemeStore`], grouping rows
//! by their `Theme` column. It supports:
//!
//! - Parsing CSV and Excel/OpenDocument workbooks into typed [`Frame`]s
//! - Reporting a failed file and carrying on with the rest
//! - Deriving a theme from the file name when the `Theme` column is missing
//! - Appending each theme's rows to what earlier files contributed
//! - Filtering, projecting, aggregating and exporting a theme's rows
//!
//! # Example
//!
//! ```
//! use peer_portal::{IngestOptions, MemoryReporter, ThemeStore, UploadedFile, ingest_files};
//!
//! let files = vec![
//!     UploadedFile::new("health.csv", b"Country,Beds\nKenya,1.4\n".to_vec()),
//!     UploadedFile::new("broken.xlsx", b"not a workbook".to_vec()),
//! ];
//!
//! let mut store = ThemeStore::new();
//! let mut reporter = MemoryReporter::new();
//! let summary = ingest_files(&files, &mut store, &mut reporter, &IngestOptions::default());
//!
//! assert_eq!(summary.files_loaded, 1);
//! assert_eq!(reporter.errors().len(), 1);
//! assert!(store.contains("health"));
//! ```

pub mod cli;
pub mod error;
pub mod filters;
pub mod ingest;
pub mod models;
pub mod parsers;
pub mod query;
pub mod report;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use error::ParseError;
pub use ingest::{IngestOptions, IngestSummary, autoload, ingest_file, ingest_files};
pub use models::{Frame, UploadedFile, Value};
pub use parsers::{DispatchPolicy, FileFormat};
pub use report::{Level, MemoryReporter, Reporter, StderrReporter};
pub use store::ThemeStore;
