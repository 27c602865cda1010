use std::io::Cursor;

use calamine::{Data, DataType, Ods, Reader, Sheets, Xls, Xlsb, Xlsx, open_workbook_auto_from_rs};
use tracing::debug;

use super::delimited::parse_csv;
use super::format::FileFormat;
use crate::error::ParseError;
use crate::models::{Frame, Value, is_missing_marker, normalize_headers};

type Workbook<'a> = Sheets<Cursor<&'a [u8]>>;

/// Parse the first worksheet of a workbook in a known format
pub fn parse_spreadsheet(bytes: &[u8], format: FileFormat) -> Result<Frame, ParseError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Workbook = match format {
        FileFormat::Xlsx | FileFormat::Xlsm => {
            Sheets::Xlsx(Xlsx::new(cursor).map_err(calamine::Error::from)?)
        }
        FileFormat::Xls => Sheets::Xls(Xls::new(cursor).map_err(calamine::Error::from)?),
        FileFormat::Xlsb => Sheets::Xlsb(Xlsb::new(cursor).map_err(calamine::Error::from)?),
        FileFormat::Ods => Sheets::Ods(Ods::new(cursor).map_err(calamine::Error::from)?),
        FileFormat::Csv => return parse_csv(bytes),
    };
    first_sheet_frame(&mut workbook)
}

/// Parse the first worksheet, letting calamine detect the workbook type from the bytes
pub fn parse_spreadsheet_sniffed(bytes: &[u8]) -> Result<Frame, ParseError> {
    let mut workbook: Workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    first_sheet_frame(&mut workbook)
}

/// First row is the header; a workbook without sheets gives an empty frame
fn first_sheet_frame(workbook: &mut Workbook) -> Result<Frame, ParseError> {
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Ok(Frame::default());
    };
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Frame::default());
    };

    let mut frame = Frame::new(normalize_headers(header.iter().map(|c| c.to_string())));
    for row in rows {
        frame.push_row(row.iter().map(cell_value).collect());
    }

    debug!(sheet = %sheet, rows = frame.len(), columns = frame.columns().len(), "parsed worksheet");
    Ok(frame)
}

/// Largest magnitude below which every whole `f64` converts to `i64` exactly
const WHOLE_FLOAT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Map a calamine cell to a [`Value`] the way the CSV reader would infer it
///
/// Workbooks store every number as a float, so whole numbers come back as
/// integers to match `2024` typed into a CSV.
fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Empty,
        Data::String(s) if is_missing_marker(s) => Value::Empty,
        Data::String(s) => Value::Text(s.clone()),
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) if f.fract() == 0.0 && f.abs() <= WHOLE_FLOAT_LIMIT => {
            Value::Int(*f as i64)
        }
        Data::Float(f) => Value::Float(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => {
            cell.as_datetime().map(Value::DateTime).unwrap_or(Value::Float(dt.as_f64()))
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
    }
}
