use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

use crate::error::ParseError;
use crate::utils::final_extension;

/// Tabular formats the loader knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Csv,
    Xlsx,
    Xlsm,
    Xls,
    Xlsb,
    Ods,
}

impl FileFormat {
    pub const ALL: [FileFormat; 6] = [
        FileFormat::Csv,
        FileFormat::Xlsx,
        FileFormat::Xlsm,
        FileFormat::Xls,
        FileFormat::Xlsb,
        FileFormat::Ods,
    ];

    /// Map a suffix (without the dot) to a format
    ///
    /// Matching is exact: `CSV` is not `csv`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }

    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx => "xlsx",
            FileFormat::Xlsm => "xlsm",
            FileFormat::Xls => "xls",
            FileFormat::Xlsb => "xlsb",
            FileFormat::Ods => "ods",
        }
    }

}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How a file name is turned into a parser choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPolicy {
    /// Only known suffixes are accepted; anything else fails as unsupported
    #[default]
    Strict,
    /// Anything that is not `.csv` is handed to the spreadsheet reader, which
    /// sniffs the workbook type from the bytes
    SpreadsheetFallback,
}

impl FromStr for DispatchPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(DispatchPolicy::Strict),
            "fallback" | "spreadsheet-fallback" => Ok(DispatchPolicy::SpreadsheetFallback),
            _ => Err(anyhow!("Unknown dispatch policy: '{}' (valid: strict, fallback)", s)),
        }
    }
}

/// Which parser a file goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Known(FileFormat),
    /// Unknown suffix under [`DispatchPolicy::SpreadsheetFallback`]
    SniffSpreadsheet,
}

/// Choose a parser for `name` under `policy`
///
/// Pure function of the name: no bytes are inspected here.
pub fn dispatch_for(name: &str, policy: DispatchPolicy) -> Result<Dispatch, ParseError> {
    let ext = final_extension(name).unwrap_or("");

    match (FileFormat::from_extension(ext), policy) {
        (Some(format), _) => Ok(Dispatch::Known(format)),
        (None, DispatchPolicy::SpreadsheetFallback) => Ok(Dispatch::SniffSpreadsheet),
        (None, DispatchPolicy::Strict) => {
            Err(ParseError::UnsupportedFormat { suffix: ext.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_is_case_sensitive() {
        assert_eq!(FileFormat::from_extension("csv"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_extension("CSV"), None);
        assert_eq!(FileFormat::from_extension("Xlsx"), None);
        assert_eq!(FileFormat::from_extension("ods"), Some(FileFormat::Ods));
        assert_eq!(FileFormat::from_extension("txt"), None);
        assert_eq!(FileFormat::from_extension(""), None);
    }

    #[test]
    fn test_dispatch_uses_final_suffix() {
        assert_eq!(
            dispatch_for("report.v2.xlsx", DispatchPolicy::Strict).unwrap(),
            Dispatch::Known(FileFormat::Xlsx)
        );
        assert_eq!(
            dispatch_for("sales.csv.xls", DispatchPolicy::Strict).unwrap(),
            Dispatch::Known(FileFormat::Xls)
        );
    }

    #[test]
    fn test_strict_rejects_unknown() {
        let err = dispatch_for("notes.txt", DispatchPolicy::Strict).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat { ref suffix } if suffix == "txt"));

        let err = dispatch_for("README", DispatchPolicy::Strict).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat { ref suffix } if suffix.is_empty()));
    }

    #[test]
    fn test_fallback_sniffs_unknown() {
        assert_eq!(
            dispatch_for("notes.txt", DispatchPolicy::SpreadsheetFallback).unwrap(),
            Dispatch::SniffSpreadsheet
        );
        assert_eq!(
            dispatch_for("data.csv", DispatchPolicy::SpreadsheetFallback).unwrap(),
            Dispatch::Known(FileFormat::Csv)
        );
    }

    #[test]
    fn test_uppercase_suffix_dispatch() {
        let err = dispatch_for("DATA.CSV", DispatchPolicy::Strict).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat { ref suffix } if suffix == "CSV"));

        assert_eq!(
            dispatch_for("DATA.CSV", DispatchPolicy::SpreadsheetFallback).unwrap(),
            Dispatch::SniffSpreadsheet
        );
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse::<DispatchPolicy>().unwrap(), DispatchPolicy::Strict);
        assert_eq!(
            "Fallback".parse::<DispatchPolicy>().unwrap(),
            DispatchPolicy::SpreadsheetFallback
        );
        assert!("lenient".parse::<DispatchPolicy>().is_err());
    }
}
