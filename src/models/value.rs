use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Cell text treated as missing, whichever format the cell came from
const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single cell in a [`Frame`](super::Frame)
///
/// `Empty` is the missing-value marker. It serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    DateTime(NaiveDateTime),
    Text(String),
}

impl Value {
    /// Infer a typed value from raw cell text
    ///
    /// Missing markers become [`Value::Empty`], then booleans, integers and floats are
    /// tried in that order. Anything else stays text, untouched.
    pub fn infer(raw: &str) -> Self {
        if is_missing_marker(raw) {
            return Value::Empty;
        }

        match raw {
            "True" | "TRUE" | "true" => return Value::Bool(true),
            "False" | "FALSE" | "false" => return Value::Bool(false),
            _ => {}
        }

        if let Ok(i) = raw.parse::<i64>() {
            return Value::Int(i);
        }
        if looks_numeric(raw)
            && let Ok(f) = raw.parse::<f64>()
        {
            return Value::Float(f);
        }

        Value::Text(raw.to_string())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Numeric view of the cell, coercing numeric text; anything else is `None`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) if f.is_nan() => None,
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Text(s) => {
                let trimmed = s.trim();
                if looks_numeric(trimmed) { trimmed.parse::<f64>().ok() } else { None }
            }
            Value::Empty | Value::DateTime(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Reject words like "inf" or "infinity" that `f64::from_str` would accept
/// True when `raw` is one of the text markers read as a missing value
pub fn is_missing_marker(raw: &str) -> bool {
    NA_MARKERS.contains(&raw)
}

fn looks_numeric(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        && s.chars().any(|c| c.is_ascii_digit())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{}", i),
            // Whole floats keep their ".0" so 3.0 and 3 stay distinct keys
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{:.1}", x)
            }
            Value::Float(x) => write!(f, "{}", x),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}
