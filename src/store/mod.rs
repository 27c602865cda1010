//! The grouping store: accumulated rows per theme.
//!
//! A [`ThemeStore`] is owned by the host application. It starts empty, is passed by
//! mutable reference into each ingestion call, and is read by whatever displays or
//! analyses the data. It only ever grows: rows appended under a theme stay there, and
//! appending the same rows again simply adds them a second time.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Frame;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeStore {
    themes: BTreeMap<String, Frame>,
}

/// Row and column counts for one theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeStats {
    pub theme: String,
    pub rows: usize,
    pub columns: usize,
}

impl ThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Number of themes
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn get(&self, theme: &str) -> Option<&Frame> {
        self.themes.get(theme)
    }

    pub fn contains(&self, theme: &str) -> bool {
        self.themes.contains_key(theme)
    }

    /// Theme names in sorted order
    pub fn themes(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Frame)> {
        self.themes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn total_rows(&self) -> usize {
        self.themes.values().map(Frame::len).sum()
    }

    pub fn stats(&self) -> Vec<ThemeStats> {
        self.iter()
            .map(|(theme, frame)| ThemeStats {
                theme: theme.to_string(),
                rows: frame.len(),
                columns: frame.columns().len(),
            })
            .collect()
    }

    /// Add `part`'s rows after whatever is already stored under `theme`
    pub fn append(&mut self, theme: &str, part: Frame) {
        match self.themes.get_mut(theme) {
            Some(existing) => existing.append(part),
            None => {
                self.themes.insert(theme.to_string(), part);
            }
        }
    }
}
