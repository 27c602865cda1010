use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::error::ParseError;
use crate::utils::check_file_size;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

/// A named input file, either already in memory or still on disk
///
/// Files opened from a path are only read when the ingestion loop gets to them, so
/// an unreadable file fails inside its own iteration like any other parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    name: String,
    source: Source,
}

impl UploadedFile {
    /// An in-memory upload, as handed over by an uploader widget
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), source: Source::Bytes(bytes) }
    }

    /// A file on disk; the name is the path's final component
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self { name, source: Source::Path(path) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Load the file content, refusing anything over `max_bytes`
    pub fn read_bytes(&self, max_bytes: u64) -> Result<Vec<u8>, ParseError> {
        match &self.source {
            Source::Bytes(bytes) => {
                check_file_size(bytes.len() as u64, max_bytes)?;
                Ok(bytes.clone())
            }
            Source::Path(path) => {
                // Check size on the open handle so the file can't be swapped in between
                let mut file = File::open(path)?;
                let size = file.metadata()?.len();
                check_file_size(size, max_bytes)?;

                let mut buf = Vec::with_capacity(size as usize);
                file.read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }
}
