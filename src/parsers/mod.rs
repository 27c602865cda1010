//! Readers that turn an uploaded file into a [`Frame`].
//!
//! # Dispatch
//!
//! The parser is picked from the file name alone ([`dispatch_for`]). Known suffixes map
//! to one [`FileFormat`] each. What happens to an unknown suffix depends on the
//! [`DispatchPolicy`]: `Strict` fails the file as unsupported, `SpreadsheetFallback`
//! hands it to the spreadsheet reader and lets calamine sniff the bytes.
//!
//! # Error Handling Strategy
//!
//! Every failure is a [`ParseError`] for the one file being read. Parsers never report to
//! the user themselves; the ingestion loop does that and skips the file.

pub mod delimited;
pub mod format;
pub mod spreadsheet;

pub use delimited::parse_csv;
pub use format::{Dispatch, DispatchPolicy, FileFormat, dispatch_for};
pub use spreadsheet::{parse_spreadsheet, parse_spreadsheet_sniffed};

use crate::error::ParseError;
use crate::models::{Frame, UploadedFile};

/// Read and parse one file, choosing the parser from its name
pub fn parse_file(
    file: &UploadedFile,
    policy: DispatchPolicy,
    max_file_bytes: u64,
) -> Result<Frame, ParseError> {
    // Dispatch first so an unsupported file is rejected without being read
    let dispatch = dispatch_for(file.name(), policy)?;
    let bytes = file.read_bytes(max_file_bytes)?;

    match dispatch {
        Dispatch::Known(FileFormat::Csv) => parse_csv(&bytes),
        Dispatch::Known(format) => parse_spreadsheet(&bytes, format),
        Dispatch::SniffSpreadsheet => parse_spreadsheet_sniffed(&bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;

    #[test]
    fn test_parse_file_csv() {
        let file = UploadedFile::new("a.csv", b"Theme,x\nT,1\n".to_vec());
        let frame = parse_file(&file, DispatchPolicy::Strict, 1024).unwrap();
        assert_eq!(frame.get(0, "x"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_parse_file_uppercase_suffix() {
        let file = UploadedFile::new("A.CSV", b"Theme\nT\n".to_vec());
        let err = parse_file(&file, DispatchPolicy::Strict, 1024).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat { ref suffix } if suffix == "CSV"));

        // Under fallback it goes to the workbook reader, which rejects CSV text
        let err = parse_file(&file, DispatchPolicy::SpreadsheetFallback, 1024).unwrap_err();
        assert!(matches!(err, ParseError::Spreadsheet(_)));
    }

    #[test]
    fn test_parse_file_unsupported_is_not_read() {
        // Path does not exist; strict dispatch must fail before any I/O
        let file = UploadedFile::from_path("/nonexistent/notes.txt");
        let err = parse_file(&file, DispatchPolicy::Strict, 1024).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_parse_file_fallback_tries_spreadsheet() {
        let file = UploadedFile::new("notes.txt", b"plain text".to_vec());
        let err = parse_file(&file, DispatchPolicy::SpreadsheetFallback, 1024).unwrap_err();
        assert!(matches!(err, ParseError::Spreadsheet(_)));
    }

    #[test]
    fn test_parse_file_size_limit() {
        let file = UploadedFile::new("a.csv", b"Theme\nT\n".to_vec());
        let err = parse_file(&file, DispatchPolicy::Strict, 4).unwrap_err();
        assert!(matches!(err, ParseError::TooLarge { .. }));
    }
}
