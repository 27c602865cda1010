use std::io::{Seek, Write};

use anyhow::{Context, Result, anyhow};

use crate::models::{Frame, Value};

/// Name of the single worksheet written by [`write_xlsx`]
pub const XLSX_SHEET_NAME: &str = "Sheet1";

/// Write `frame` as CSV: a header line, then one line per row
///
/// Cells are written in their display form and [`Value::Empty`](crate::models::Value::Empty)
/// becomes an empty field.
pub fn write_csv<W: Write>(frame: &Frame, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);

    out.write_record(frame.columns()).context("Failed to write CSV header")?;
    for row in frame.rows() {
        out.write_record(row.iter().map(|v| v.to_string())).context("Failed to write CSV row")?;
    }
    out.flush().context("Failed to flush CSV output")?;

    Ok(())
}

/// Write `frame` as an XLSX workbook with one worksheet
///
/// The header goes in row 1. Numbers and booleans keep their cell type, date-times are
/// written as text, and empty cells are left unset.
pub fn write_xlsx<W: Write + Seek>(frame: &Frame, writer: W) -> Result<()> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book
        .new_sheet(XLSX_SHEET_NAME)
        .map_err(|e| anyhow!("Failed to create worksheet: {}", e))?;

    for (col, name) in (1u32..).zip(frame.columns()) {
        sheet.get_cell_mut((col, 1)).set_value_string(name.as_str());
    }

    for (row_num, row) in (2u32..).zip(frame.rows()) {
        for (col, value) in (1u32..).zip(row.iter()) {
            match value {
                Value::Empty => {}
                Value::Bool(b) => {
                    sheet.get_cell_mut((col, row_num)).set_value_bool(*b);
                }
                Value::Int(i) => {
                    sheet.get_cell_mut((col, row_num)).set_value_number(*i as f64);
                }
                Value::Float(f) => {
                    sheet.get_cell_mut((col, row_num)).set_value_number(*f);
                }
                Value::DateTime(_) | Value::Text(_) => {
                    sheet.get_cell_mut((col, row_num)).set_value_string(value.to_string());
                }
            }
        }
    }

    umya_spreadsheet::writer::xlsx::write_writer(&book, writer)
        .map_err(|e| anyhow!("Failed to write XLSX output: {}", e))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::parsers::delimited::parse_csv;
    use crate::parsers::{FileFormat, parse_spreadsheet};

    #[test]
    fn test_write_csv() {
        let frame = Frame::from_rows(
            vec!["Country".to_string(), "Score".to_string(), "Note".to_string()],
            vec![
                vec![Value::from("Kenya"), Value::Float(2.0), Value::from("a, b")],
                vec![Value::from("Peru"), Value::Empty, Value::Bool(true)],
            ],
        );

        let mut buf = Vec::new();
        write_csv(&frame, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text, "Country,Score,Note\nKenya,2.0,\"a, b\"\nPeru,,True\n");
    }

    #[test]
    fn test_written_csv_reads_back() {
        let frame = Frame::from_rows(
            vec!["Country".to_string(), "Score".to_string()],
            vec![vec![Value::from("Chad"), Value::Int(7)], vec![Value::from("Mali"), Value::Empty]],
        );

        let mut buf = Vec::new();
        write_csv(&frame, &mut buf).unwrap();
        assert_eq!(parse_csv(&buf).unwrap(), frame);
    }

    #[test]
    fn test_write_header_only() {
        let mut buf = Vec::new();
        write_csv(&Frame::new(vec!["Theme".to_string()]), &mut buf).unwrap();
        assert_eq!(buf, b"Theme\n");
    }

    #[test]
    fn test_written_xlsx_reads_back() {
        let frame = Frame::from_rows(
            vec!["Theme".to_string(), "Country".to_string(), "Score".to_string()],
            vec![
                vec![Value::Int(2024), Value::from("Kenya"), Value::Float(2.5)],
                vec![Value::from("Health"), Value::from("Peru"), Value::Empty],
                vec![Value::from("Health"), Value::from("Chad"), Value::Int(3)],
            ],
        );

        let mut buf = Cursor::new(Vec::new());
        write_xlsx(&frame, &mut buf).unwrap();
        let bytes = buf.into_inner();
        assert!(bytes.starts_with(b"PK"), "XLSX output is a zip archive");

        assert_eq!(parse_spreadsheet(&bytes, FileFormat::Xlsx).unwrap(), frame);
    }

    #[test]
    fn test_write_xlsx_header_only() {
        let frame = Frame::new(vec!["Theme".to_string(), "Country".to_string()]);

        let mut buf = Cursor::new(Vec::new());
        write_xlsx(&frame, &mut buf).unwrap();

        let read = parse_spreadsheet(&buf.into_inner(), FileFormat::Xlsx).unwrap();
        assert_eq!(read.columns(), ["Theme", "Country"]);
        assert!(read.is_empty());
    }
}
