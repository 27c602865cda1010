//! User-facing message channel.
//!
//! Ingestion talks to the user only through [`Reporter`]. The CLI uses
//! [`StderrReporter`]; tests and embedding hosts use [`MemoryReporter`] and inspect what
//! was said. Diagnostic logging goes through `tracing` instead and is not user output.

use std::fmt;

use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Info => "Info",
            Level::Success => "Success",
            Level::Warning => "Warning",
            Level::Error => "Error",
        };
        f.write_str(label)
    }
}

pub trait Reporter {
    fn report(&mut self, level: Level, message: &str);

    fn info(&mut self, message: &str) {
        self.report(Level::Info, message);
    }

    fn success(&mut self, message: &str) {
        self.report(Level::Success, message);
    }

    fn warning(&mut self, message: &str) {
        self.report(Level::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.report(Level::Error, message);
    }
}

/// Prints `Level: message` lines to stderr
#[derive(Debug, Default)]
pub struct StderrReporter;

impl StderrReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for StderrReporter {
    fn report(&mut self, level: Level, message: &str) {
        debug!(%level, "{}", message);
        eprintln!("{}: {}", level, message);
    }
}

/// Keeps every message in order, for inspection after the fact
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    messages: Vec<(Level, String)>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[(Level, String)] {
        &self.messages
    }

    /// Messages at `level`, in the order they were reported
    pub fn at(&self, level: Level) -> Vec<&str> {
        self.messages.iter().filter(|(l, _)| *l == level).map(|(_, m)| m.as_str()).collect()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.at(Level::Warning)
    }

    pub fn errors(&self) -> Vec<&str> {
        self.at(Level::Error)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Reporter for MemoryReporter {
    fn report(&mut self, level: Level, message: &str) {
        self.messages.push((level, message.to_string()));
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, level: Level, message: &str) {
        (**self).report(level, message);
    }
}
