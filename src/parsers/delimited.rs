use std::io::Cursor;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::ParseError;
use crate::models::{Frame, Value, normalize_headers};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse CSV bytes into a [`Frame`]
///
/// The first record is the header. Records shorter than the header are padded with
/// [`Value::Empty`]; a record longer than the header fails the whole file, since there
/// is no column to put the extra cells in. Blank lines are skipped and a zero-byte
/// input gives an empty frame with no columns.
pub fn parse_csv(bytes: &[u8]) -> Result<Frame, ParseError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(Cursor::new(bytes));

    let columns = normalize_headers(reader.headers()?.iter());
    let expected = columns.len();
    let mut frame = Frame::new(columns);

    for record in reader.records() {
        let record = record?;
        if record.len() > expected {
            return Err(ParseError::RaggedRecord {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                found: record.len(),
                expected,
            });
        }
        frame.push_row(record.iter().map(Value::infer).collect());
    }

    debug!(rows = frame.len(), columns = expected, "parsed csv");
    Ok(frame)
}
