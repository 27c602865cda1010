//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Builder for creating test data directories
pub struct DataDirBuilder {
    temp_dir: TempDir,
}

impl DataDirBuilder {
    /// Create a new builder with an empty data directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the data directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a file with raw bytes
    pub fn with_file(self, name: &str, content: &[u8]) -> Self {
        let mut file = fs::File::create(self.temp_dir.path().join(name))
            .unwrap_or_else(|_| panic!("Failed to create {}", name));
        file.write_all(content).unwrap_or_else(|_| panic!("Failed to write {}", name));
        self
    }

    /// Add a CSV file
    pub fn with_csv(self, name: &str, content: &str) -> Self {
        self.with_file(name, content.as_bytes())
    }

    /// Add an XLSX workbook whose single sheet holds `rows` (first row is the header)
    pub fn with_xlsx(self, name: &str, rows: &[&[Cell]]) -> Self {
        let bytes = xlsx_bytes(rows);
        self.with_file(name, &bytes)
    }

    /// Full path of a file inside the directory
    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for DataDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A worksheet cell for [`xlsx_bytes`]
#[derive(Debug, Clone, Copy)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

fn column_letter(idx: usize) -> String {
    let mut n = idx + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).expect("ASCII column letters")
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn sheet_xml(rows: &[&[Cell]]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_letter(c), r + 1);
            match cell {
                Cell::Text(s) => xml.push_str(&format!(
                    r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    reference,
                    xml_escape(s)
                )),
                Cell::Number(n) => {
                    xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, n))
                }
                Cell::Blank => {}
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Assemble a minimal single-sheet XLSX workbook in memory
pub fn xlsx_bytes(rows: &[&[Cell]]) -> Vec<u8> {
    let parts: [(&str, String); 5] = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#.to_string(),
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#.to_string(),
        ),
        (
            "xl/workbook.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#.to_string(),
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#.to_string(),
        ),
        ("xl/worksheets/sheet1.xml", sheet_xml(rows)),
    ];

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, content) in parts {
        zip.start_file(name, options).expect("Failed to start zip entry");
        zip.write_all(content.as_bytes()).expect("Failed to write zip entry");
    }
    zip.finish().expect("Failed to finish workbook").into_inner()
}

/// A data directory shaped like a real deployment: two themed workbooks, one CSV
/// without a Theme column, and one unreadable file
pub fn realistic_data_dir() -> DataDirBuilder {
    DataDirBuilder::new()
        .with_xlsx("education.xlsx", &[
            &[
                Cell::Text("Theme"),
                Cell::Text("Country"),
                Cell::Text("Region"),
                Cell::Text("Income"),
                Cell::Text("Enrolment"),
            ],
            &[
                Cell::Text("Education"),
                Cell::Text("Kenya"),
                Cell::Text("Sub-Saharan Africa"),
                Cell::Text("Lower middle income"),
                Cell::Number(81.5),
            ],
            &[
                Cell::Text("Education"),
                Cell::Text("Chad"),
                Cell::Text("Sub-Saharan Africa"),
                Cell::Text("Low income"),
                Cell::Number(42.0),
            ],
            &[
                Cell::Text("Education"),
                Cell::Text("Nepal"),
                Cell::Text("South Asia"),
                Cell::Text("Lower middle income"),
                Cell::Blank,
            ],
        ])
        .with_xlsx("governance.xlsx", &[
            &[Cell::Text("Theme"), Cell::Text("Country"), Cell::Text("Region"), Cell::Text("Score")],
            &[
                Cell::Text("Governance"),
                Cell::Text("Peru"),
                Cell::Text("Latin America & Caribbean"),
                Cell::Number(3.0),
            ],
            &[
                Cell::Text("Education"),
                Cell::Text("Peru"),
                Cell::Text("Latin America & Caribbean"),
                Cell::Number(7.0),
            ],
        ])
        .with_csv(
            "health_2023.csv",
            "Country,Region,Income,Beds\n\
             Kenya,Sub-Saharan Africa,Lower middle income,1.4\n\
             Chad,Sub-Saharan Africa,Low income,0.4\n\
             Nepal,South Asia,Lower middle income,0.3\n",
        )
        .with_csv("broken.csv", "Theme,Country\nHealth,Kenya,extra\n")
}
