use anyhow::{Result, bail};

use crate::ingest::THEME_COLUMN;
use crate::models::Frame;

/// Columns that identify a row rather than measure something, in display order
pub const ID_COLUMNS: [&str; 3] = ["Country", "Region", "Income"];

/// Columns holding indicator values: everything except Theme and the id columns
pub fn indicator_columns(frame: &Frame) -> Vec<&str> {
    frame
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|c| *c != THEME_COLUMN && !ID_COLUMNS.contains(c))
        .collect()
}

/// The id columns present in `frame`, followed by `indicators`
///
/// An empty `indicators` list selects every indicator column.
///
/// # Errors
///
/// Returns an error naming the first requested indicator the frame does not have.
pub fn select_view(frame: &Frame, indicators: &[String]) -> Result<Frame> {
    let available = indicator_columns(frame);

    for name in indicators {
        if !available.contains(&name.as_str()) {
            bail!("Unknown indicator: '{}' (available: {})", name, available.join(", "));
        }
    }

    let mut columns: Vec<&str> = ID_COLUMNS.into_iter().filter(|c| frame.has_column(c)).collect();
    if indicators.is_empty() {
        columns.extend(available);
    } else {
        columns.extend(indicators.iter().map(String::as_str));
    }

    Ok(frame.select_columns(&columns))
}
