//! The ingestion loop.
//!
//! # Error Handling Strategy
//!
//! This module follows the same **graceful degradation** approach as the rest of the crate:
//!
//! - **File-level errors**: a file that cannot be read or parsed is reported as an error
//!   naming the file and the cause, then skipped. The store is not touched for that file.
//! - **Missing Theme column**: not an error. A warning names the file and its rows are
//!   grouped under a theme derived from the file name.
//! - **No run-level failure**: one bad file never stops the others. The loop returns an
//!   [`IngestSummary`] instead of a `Result`.

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::options::IngestOptions;
use super::recode::recode_yes_no;
use super::theme::{THEME_COLUMN, count_unthemed, ensure_theme_column, partition_by_theme};
use crate::error::ParseError;
use crate::models::{Frame, UploadedFile};
use crate::parsers::parse_file;
use crate::report::Reporter;
use crate::store::ThemeStore;

/// What one ingestion run did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub files_loaded: usize,
    pub files_failed: usize,
    pub rows_added: usize,
    /// Rows dropped because their Theme cell was empty
    pub rows_without_theme: usize,
    /// Files that got a Theme column from their name
    pub files_defaulted: usize,
    pub themes_touched: BTreeSet<String>,
}

impl IngestSummary {
    pub fn files_seen(&self) -> usize {
        self.files_loaded + self.files_failed
    }

    /// Fold another run's counts into this one
    pub fn merge(&mut self, other: IngestSummary) {
        self.files_loaded += other.files_loaded;
        self.files_failed += other.files_failed;
        self.rows_added += other.rows_added;
        self.rows_without_theme += other.rows_without_theme;
        self.files_defaulted += other.files_defaulted;
        self.themes_touched.extend(other.themes_touched);
    }
}

/// Ingest `files` in order into `store`
///
/// Each file is parsed, given a Theme column if it lacks one, split by theme, and each
/// part is appended after the rows already stored for that theme. Parse failures are
/// reported and skipped.
///
/// With [`IngestOptions::parallel`] the parsing runs on the rayon pool, but results are
/// still reported and merged one file at a time in input order, so the store ends up
/// exactly as it would sequentially.
///
/// # Examples
///
/// ```
/// use peer_portal::{IngestOptions, MemoryReporter, ThemeStore, UploadedFile, ingest_files};
///
/// let files = vec![
///     UploadedFile::new("a.csv", b"Theme,Country\nhealth,Kenya\n".to_vec()),
///     UploadedFile::new("b.csv", b"Theme,Country\nhealth,Peru\n".to_vec()),
/// ];
/// let mut store = ThemeStore::new();
/// let mut reporter = MemoryReporter::new();
///
/// ingest_files(&files, &mut store, &mut reporter, &IngestOptions::default());
/// assert_eq!(store.get("health").map(|f| f.len()), Some(2));
/// ```
#[instrument(level = "debug", skip_all, fields(files = files.len(), parallel = options.parallel))]
pub fn ingest_files<R: Reporter + ?Sized>(
    files: &[UploadedFile],
    store: &mut ThemeStore,
    reporter: &mut R,
    options: &IngestOptions,
) -> IngestSummary {
    let mut summary = IngestSummary::default();

    if options.parallel {
        let parsed: Vec<Result<Frame, ParseError>> = files
            .par_iter()
            .map(|file| parse_file(file, options.dispatch, options.max_file_bytes))
            .collect();

        for (file, result) in files.iter().zip(parsed) {
            absorb(file, result, store, reporter, options, &mut summary);
        }
    } else {
        for file in files {
            let result = parse_file(file, options.dispatch, options.max_file_bytes);
            absorb(file, result, store, reporter, options, &mut summary);
        }
    }

    info!(
        loaded = summary.files_loaded,
        failed = summary.files_failed,
        rows = summary.rows_added,
        themes = summary.themes_touched.len(),
        "ingestion finished"
    );
    summary
}

/// Ingest a single file; same as [`ingest_files`] with one element
pub fn ingest_file<R: Reporter + ?Sized>(
    file: &UploadedFile,
    store: &mut ThemeStore,
    reporter: &mut R,
    options: &IngestOptions,
) -> IngestSummary {
    ingest_files(std::slice::from_ref(file), store, reporter, options)
}

/// Report a failure, or normalize and merge a parsed frame
fn absorb<R: Reporter + ?Sized>(
    file: &UploadedFile,
    result: Result<Frame, ParseError>,
    store: &mut ThemeStore,
    reporter: &mut R,
    options: &IngestOptions,
    summary: &mut IngestSummary,
) {
    let mut frame = match result {
        Ok(frame) => frame,
        Err(e) => {
            reporter.error(&format!("Failed to load {}: {}", file.name(), e));
            summary.files_failed += 1;
            return;
        }
    };

    if options.recode_yes_no {
        let recoded = recode_yes_no(&mut frame);
        if !recoded.is_empty() {
            debug!(file = file.name(), columns = ?recoded, "recoded Yes/No columns");
        }
    }

    if !frame.has_column(THEME_COLUMN) {
        let theme = ensure_theme_column(&mut frame, file.name()).unwrap_or_default();
        reporter.warning(&format!(
            "{} has no {} column; grouping its rows under \"{}\"",
            file.name(),
            THEME_COLUMN,
            theme
        ));
        summary.files_defaulted += 1;
    }

    let unthemed = count_unthemed(&frame);
    if unthemed > 0 {
        info!(file = file.name(), rows = unthemed, "rows with an empty Theme were not stored");
    }

    for (theme, part) in partition_by_theme(&frame) {
        debug!(file = file.name(), theme = %theme, rows = part.len(), "merging partition");
        summary.rows_added += part.len();
        store.append(&theme, part);
        summary.themes_touched.insert(theme);
    }

    summary.rows_without_theme += unthemed;
    summary.files_loaded += 1;
}
