use std::collections::HashMap;

use crate::models::{Frame, Value};
use crate::utils::{base_name, strip_final_extension};

/// Column that groups rows into themes
pub const THEME_COLUMN: &str = "Theme";

/// Theme used for a file that has no Theme column: its base name minus the final extension
pub fn default_theme(file_name: &str) -> String {
    strip_final_extension(base_name(file_name)).to_string()
}

/// Add a Theme column derived from `file_name` if the frame lacks one
///
/// Returns the theme that was filled in, or `None` if the column was already there.
pub fn ensure_theme_column(frame: &mut Frame, file_name: &str) -> Option<String> {
    if frame.has_column(THEME_COLUMN) {
        return None;
    }
    let theme = default_theme(file_name);
    frame.set_constant_column(THEME_COLUMN, Value::Text(theme.clone()));
    Some(theme)
}

/// Rows of `frame` split by Theme value
///
/// Groups come out in first-occurrence order and rows keep their original order within
/// each group. The key is the value's display form. Rows with an empty Theme belong to
/// no group and are left out; use [`count_unthemed`] to find out how many.
pub fn partition_by_theme(frame: &Frame) -> Vec<(String, Frame)> {
    let Some(idx) = frame.column_index(THEME_COLUMN) else {
        return Vec::new();
    };

    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();

    for (row, value) in frame.column_values(idx).enumerate() {
        if value.is_empty() {
            continue;
        }
        let key = value.to_string();
        groups
            .entry(key)
            .or_insert_with_key(|k| {
                order.push(k.clone());
                Vec::new()
            })
            .push(row);
    }

    order
        .into_iter()
        .map(|key| {
            let rows = groups.remove(&key).unwrap_or_default();
            let part = frame.take_rows(&rows);
            (key, part)
        })
        .collect()
}

/// Rows whose Theme cell is empty
pub fn count_unthemed(frame: &Frame) -> usize {
    frame
        .column_index(THEME_COLUMN)
        .map(|idx| frame.column_values(idx).filter(|v| v.is_empty()).count())
        .unwrap_or(0)
}
