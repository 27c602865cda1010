use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::loader::{IngestSummary, ingest_files};
use super::options::IngestOptions;
use crate::models::UploadedFile;
use crate::report::Reporter;
use crate::store::ThemeStore;

/// Maximum number of dataset files picked up from the data directory
const MAX_DATA_FILES: usize = 1000;

/// Extensions picked up by autoload, in load order
const AUTOLOAD_EXTENSIONS: [&str; 2] = ["xlsx", "csv"];

/// Find the dataset files directly inside `data_dir`
///
/// Returns every `*.xlsx` file sorted by name, followed by every `*.csv` file sorted by
/// name. Subdirectories are not searched and symlinks are skipped. A missing directory
/// gives an empty list.
///
/// # Errors
///
/// Returns an error if:
/// - The directory exists but cannot be read
/// - More than [`MAX_DATA_FILES`] (1000) dataset files are found
pub fn discover_data_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    if !data_dir.exists() {
        debug!(dir = %data_dir.display(), "data directory does not exist");
        return Ok(Vec::new());
    }

    let mut by_extension: Vec<Vec<PathBuf>> = vec![Vec::new(); AUTOLOAD_EXTENSIONS.len()];
    let mut total = 0;

    for entry in WalkDir::new(data_dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to read data directory: {}", data_dir.display()))?;

        if entry.path_is_symlink() {
            warn!(path = %entry.path().display(), "skipping symlinked data file");
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(ext) = entry.path().extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let Some(slot) = AUTOLOAD_EXTENSIONS.iter().position(|known| *known == ext) else {
            continue;
        };

        total += 1;
        if total > MAX_DATA_FILES {
            bail!(
                "Resource limit exceeded: more than {} dataset files in {}",
                MAX_DATA_FILES,
                data_dir.display()
            );
        }
        by_extension[slot].push(entry.into_path());
    }

    Ok(by_extension.into_iter().flatten().collect())
}

/// Load every dataset in `data_dir`, but only into an empty store
///
/// A store that already holds data is left alone and an empty summary is returned, so
/// calling this on every startup never duplicates rows.
pub fn autoload<R: Reporter + ?Sized>(
    data_dir: &Path,
    store: &mut ThemeStore,
    reporter: &mut R,
    options: &IngestOptions,
) -> Result<IngestSummary> {
    if !store.is_empty() {
        debug!(themes = store.len(), "store already populated; skipping autoload");
        return Ok(IngestSummary::default());
    }

    let files: Vec<UploadedFile> =
        discover_data_files(data_dir)?.into_iter().map(UploadedFile::from_path).collect();
    debug!(dir = %data_dir.display(), files = files.len(), "autoloading data directory");

    Ok(ingest_files(&files, store, reporter, options))
}
