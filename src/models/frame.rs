use std::collections::HashMap;

use serde_json::Map;

use super::value::Value;

pub type Row = Vec<Value>;

/// An ordered, column-named table of [`Value`]s
///
/// Columns keep the order they had in the source file. Every row holds exactly one
/// value per column; row position is the only row identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Frame {
    /// A frame with the given columns and no rows
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Build a frame from rows, padding short rows with [`Value::Empty`]
    /// and dropping cells past the last column
    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut frame = Self::new(columns);
        for row in rows {
            frame.push_row(row);
        }
        frame
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Value at `row` in column `name`
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(move |row| &row[idx])
    }

    pub fn push_row(&mut self, mut row: Row) {
        row.resize(self.columns.len(), Value::Empty);
        self.rows.push(row);
    }

    /// Append a column holding `value` on every row; replaces an existing column of that name
    pub fn set_constant_column(&mut self, name: &str, value: Value) {
        match self.column_index(name) {
            Some(idx) => {
                for row in &mut self.rows {
                    row[idx] = value.clone();
                }
            }
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(value.clone());
                }
            }
        }
    }

    /// Rewrite every cell of column `idx` in place
    pub fn map_column(&mut self, idx: usize, mut f: impl FnMut(&Value) -> Value) {
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
    }

    /// New frame with the same columns and the rows at `indices`, in that order
    pub fn take_rows(&self, indices: &[usize]) -> Frame {
        let rows = indices.iter().filter_map(|&i| self.rows.get(i).cloned()).collect();
        Frame { columns: self.columns.clone(), rows }
    }

    /// Keep only rows for which `keep` returns true
    pub fn filter_rows(&self, mut keep: impl FnMut(&Frame, usize) -> bool) -> Frame {
        let indices: Vec<usize> = (0..self.rows.len()).filter(|&i| keep(self, i)).collect();
        self.take_rows(&indices)
    }

    /// Project onto `names`; names missing from this frame are skipped
    pub fn select_columns(&self, names: &[&str]) -> Frame {
        let picks: Vec<(usize, &str)> =
            names.iter().filter_map(|n| self.column_index(n).map(|i| (i, *n))).collect();
        let columns = picks.iter().map(|(_, n)| n.to_string()).collect();
        let rows =
            self.rows.iter().map(|row| picks.iter().map(|(i, _)| row[*i].clone()).collect()).collect();
        Frame { columns, rows }
    }

    /// Append `other`'s rows after this frame's rows
    ///
    /// Columns are unioned: this frame's columns first, then any column only `other`
    /// has, in `other`'s order. Cells a side does not have become [`Value::Empty`].
    pub fn append(&mut self, other: Frame) {
        if self.columns.is_empty() && self.rows.is_empty() {
            *self = other;
            return;
        }

        for name in &other.columns {
            if !self.columns.contains(name) {
                self.columns.push(name.clone());
                for row in &mut self.rows {
                    row.push(Value::Empty);
                }
            }
        }

        let positions: HashMap<&str, usize> =
            self.columns.iter().enumerate().map(|(i, c)| (c.as_str(), i)).collect();
        let targets: Vec<usize> = other.columns.iter().map(|c| positions[c.as_str()]).collect();
        let width = self.columns.len();

        self.rows.reserve(other.rows.len());
        for row in other.rows {
            let mut out = vec![Value::Empty; width];
            for (value, &target) in row.into_iter().zip(&targets) {
                out[target] = value;
            }
            self.rows.push(out);
        }
    }

    /// Rows as JSON objects keyed by column name
    pub fn to_records(&self) -> Vec<Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(c, v)| {
                        (c.clone(), serde_json::to_value(v).unwrap_or(serde_json::Value::Null))
                    })
                    .collect()
            })
            .collect()
    }
}

/// Make header names usable as unique column keys
///
/// Blank names become `Unnamed: <index>`; repeats of `X` become `X.1`, `X.2`, ...
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<String> = Vec::new();

    for (i, name) in raw.into_iter().enumerate() {
        let name = name.as_ref();
        let base = if name.trim().is_empty() { format!("Unnamed: {}", i) } else { name.to_string() };

        let mut candidate = base.clone();
        while out.contains(&candidate) {
            let n = seen.entry(base.clone()).or_insert(0);
            *n += 1;
            candidate = format!("{}.{}", base, n);
        }
        out.push(candidate);
    }

    out
}
