//! Ingestion of tabular files into the theme store
//!
//! # Error Handling Strategy
//!
//! - **Per-file failures**: a file that cannot be read or parsed is reported through the
//!   [`Reporter`](crate::report::Reporter) and skipped. Files before and after it are
//!   unaffected and no partial update happens for the failed file.
//!
//! - **Missing grouping column**: reported as a warning; the file's rows are grouped
//!   under a theme derived from its name.
//!
//! - **Directory-level failures**: only [`autoload`] can fail as a whole, when the data
//!   directory exists but cannot be listed or holds an unreasonable number of files.

pub mod discovery;
pub mod loader;
pub mod options;
pub mod recode;
pub mod theme;

pub use discovery::{autoload, discover_data_files};
pub use loader::{IngestSummary, ingest_file, ingest_files};
pub use options::IngestOptions;
pub use theme::{THEME_COLUMN, default_theme, ensure_theme_column, partition_by_theme};
